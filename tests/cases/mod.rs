use paxl::{Interpreter, Value};

/// Run `source` in a fresh interpreter, rendering the value or the error
/// message as text.
pub fn run(source: &str) -> Result<String, String> {
    Interpreter::new()
        .run(source)
        .map(|value| value.to_string())
        .map_err(|e| e.to_string())
}

/// Declares a test that runs `input` in a fresh interpreter and compares the
/// printed result, or the error message, with `value`.
macro_rules! test_case {
    ($name:ident, input: $input:expr, value: $expected:expr $(,)?) => {
        #[test]
        fn $name() {
            let actual = cases::run($input);
            let expected: Result<&str, &str> = $expected;
            pretty_assertions::assert_eq!(
                actual.as_deref().map_err(String::as_str),
                expected
            );
        }
    };
}

pub struct Scenario {
    pub name: &'static str,
    pub source: &'static str,
    pub value: Value,
}

/// Built per call: `Value` holds `Rc`, so it cannot live in a shared static.
pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "simple_addition",
            source: "5 + 5",
            value: Value::Integer(10),
        },
        Scenario {
            name: "for_loop_sum",
            source: "a = 0; for (i = 0; i < 10; i = i + 1) { a = a + i }; a",
            value: Value::Integer(45),
        },
        Scenario {
            name: "positional_parameters",
            source: "a = { |x,y,z| (x*y) - z }; a(5; 4; 10)",
            value: Value::Integer(10),
        },
        Scenario {
            name: "this_recursion",
            source: "factorial = { |x| if (x == 0) { 1 } else { x * (this(x - 1)) } }; factorial(5)",
            value: Value::Integer(120),
        },
        Scenario {
            name: "zero_parameter_block",
            source: "a = { 10 }; a()",
            value: Value::Integer(10),
        },
        Scenario {
            name: "call_unbound_name",
            source: "a(1)",
            value: Value::ErrorSignal("Error! Attempting to use a non-block as a block.".to_string()),
        },
    ]
}
