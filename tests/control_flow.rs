#[macro_use]
mod cases;

use indoc::indoc;

test_case!(
    if_takes_then_branch,
    input: "a = 5; if (a < 10) { 10 } else { a }",
    value: Ok("10"),
);

test_case!(
    if_takes_else_branch,
    input: "a = 15; if (a < 10) { 10 } else { a }",
    value: Ok("15"),
);

test_case!(
    if_without_else,
    input: "a = 10; if (a == 10) { 10 }",
    value: Ok("10"),
);

test_case!(
    if_without_else_not_taken,
    input: "if (false) { 10 }",
    value: Ok("nil"),
);

test_case!(
    zero_is_truthy,
    input: "if (0) { 1 } else { 2 }",
    value: Ok("1"),
);

test_case!(
    for_loop_sum,
    input: "a = 0; for (i = 0; i < 10; i = i + 1) { a = a + i }; a",
    value: Ok("45"),
);

test_case!(
    for_loop_multiline,
    input: indoc! {"
        fib = 0;
        next = 1;
        for (i = 0; i < 10; i = i + 1) {
          t = fib + next;
          fib = next;
          next = t
        };
        fib"},
    value: Ok("55"),
);

test_case!(
    for_loop_never_runs,
    input: "for (i = 0; false; i = i + 1) { 1 }",
    value: Ok("nil"),
);

test_case!(
    for_header_needs_three_statements,
    input: "for (i = 0; i < 3) { i }",
    value: Err(
        "error: A for loop header needs 3 statements (init; test; increment), found 2 [P003]\n\
         help: Write the header as `for (i = 0; i < n; i = i + 1)`"
    ),
);
