#[macro_use]
mod cases;

test_case!(addition, input: "5 + 5", value: Ok("10"));
test_case!(subtraction, input: "15 - 5", value: Ok("10"));
test_case!(division, input: "100 / 10", value: Ok("10"));
test_case!(multiplication, input: "5 * 2", value: Ok("10"));
test_case!(precedence, input: "2 + 3 * 4", value: Ok("14"));
test_case!(truncating_division, input: "7 / 2", value: Ok("3"));
test_case!(float_division, input: "7 / 2.0", value: Ok("3.5"));
test_case!(whole_float_keeps_fraction, input: "2.5 * 2", value: Ok("5.0"));
test_case!(float_division_by_zero, input: "1.0 / 0", value: Ok("inf"));

test_case!(
    integer_division_by_zero,
    input: "1 / 0",
    value: Err("Division by zero"),
);

test_case!(true_literal, input: "true", value: Ok("true"));
test_case!(false_literal, input: "false", value: Ok("false"));
test_case!(and_true, input: "true and true", value: Ok("true"));
test_case!(and_false, input: "true and false", value: Ok("false"));
test_case!(or_true, input: "false or true", value: Ok("true"));
test_case!(not_false, input: "not false", value: Ok("true"));

test_case!(equal, input: "10 == 10", value: Ok("true"));
test_case!(not_equal_values, input: "1 == 2", value: Ok("false"));
test_case!(not_equal, input: "1 != 2", value: Ok("true"));
test_case!(less, input: "1 < 2", value: Ok("true"));
test_case!(less_equal, input: "1 <= 2", value: Ok("true"));
test_case!(greater_equal, input: "1 >= 2", value: Ok("false"));
test_case!(greater, input: "1 > 2", value: Ok("false"));
test_case!(mixed_equality, input: "2 == 2.0", value: Ok("true"));
test_case!(kinds_never_equal, input: "1 == true", value: Ok("false"));

test_case!(
    nested_logic,
    input: "(true or false) and (true and true)",
    value: Ok("true"),
);

test_case!(
    nested_comparisons,
    input: "(10 < 20) and (20 >= 10)",
    value: Ok("true"),
);

test_case!(
    assign_nested_logic,
    input: "a = ( (true or false) and (true and true) )",
    value: Ok("true"),
);

test_case!(
    no_short_circuit,
    input: "a = 0; false and (a = 1); a",
    value: Ok("1"),
);

test_case!(
    boolean_arithmetic,
    input: "true + 1",
    value: Err("Unsupported operand types for `+`: boolean and integer"),
);

test_case!(
    error_signal_arithmetic,
    input: "nope() * 2",
    value: Err("Cannot apply `*` to an error signal: Error! Attempting to use a non-block as a block."),
);

#[test]
fn syntax_error() {
    let message = cases::run("1 + + 2").unwrap_err();
    assert!(message.starts_with("error: Expected"), "{}", message);
    assert!(message.contains("found '+' [P001]"), "{}", message);
}
