//! Operator implementations.
//!
//! Arithmetic promotes mixed integer/float operands to float. Integer
//! arithmetic wraps on overflow; float arithmetic follows IEEE 754.

use crate::{
    ast::{ArithmeticOp, ComparisonOp, LogicalOp},
    evaluator::EvalError,
    values::Value,
};
use core::cmp::Ordering;

/// Evaluate a binary operation on two integers.
///
/// Uses wrapping arithmetic to prevent panics on overflow.
/// Division truncates toward zero; division by zero returns an error.
pub(super) fn eval_binary_int(op: ArithmeticOp, left: i64, right: i64) -> Result<i64, EvalError> {
    match op {
        ArithmeticOp::Add => Ok(left.wrapping_add(right)),
        ArithmeticOp::Sub => Ok(left.wrapping_sub(right)),
        ArithmeticOp::Mul => Ok(left.wrapping_mul(right)),
        ArithmeticOp::Div => {
            if right == 0 {
                Err(EvalError::DivisionByZero)
            } else {
                // Use wrapping_div to handle i64::MIN / -1 case
                Ok(left.wrapping_div(right))
            }
        }
    }
}

/// Evaluate a binary operation on two floats.
///
/// Follows IEEE 754 semantics (produces inf/nan rather than panicking).
pub(super) fn eval_binary_float(op: ArithmeticOp, left: f64, right: f64) -> f64 {
    match op {
        ArithmeticOp::Add => left + right,
        ArithmeticOp::Sub => left - right,
        ArithmeticOp::Mul => left * right,
        ArithmeticOp::Div => left / right, // Division by zero produces inf
    }
}

/// Apply an arithmetic operator to two evaluated operands.
pub(super) fn eval_arithmetic(
    op: ArithmeticOp,
    left: &Value,
    right: &Value,
) -> Result<Value, EvalError> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => Ok(Value::Integer(eval_binary_int(op, *l, *r)?)),
        (Value::Integer(l), Value::Float(r)) => Ok(Value::Float(eval_binary_float(op, *l as f64, *r))),
        (Value::Float(l), Value::Integer(r)) => Ok(Value::Float(eval_binary_float(op, *l, *r as f64))),
        (Value::Float(l), Value::Float(r)) => Ok(Value::Float(eval_binary_float(op, *l, *r))),
        _ => Err(operand_error(op.symbol(), left, right)),
    }
}

/// Apply a comparison operator to two evaluated operands.
///
/// Equality is defined for every pair of values; ordering only for numbers.
pub(super) fn eval_comparison(
    op: ComparisonOp,
    left: &Value,
    right: &Value,
) -> Result<bool, EvalError> {
    match op {
        ComparisonOp::Eq => Ok(values_equal(left, right)),
        ComparisonOp::Neq => Ok(!values_equal(left, right)),
        // NaN is unordered: every ordering test fails
        ComparisonOp::Le => Ok(numeric_ordering(op, left, right)?.is_some_and(Ordering::is_le)),
        ComparisonOp::Ge => Ok(numeric_ordering(op, left, right)?.is_some_and(Ordering::is_ge)),
        ComparisonOp::Lt => Ok(numeric_ordering(op, left, right)?.is_some_and(Ordering::is_lt)),
        ComparisonOp::Gt => Ok(numeric_ordering(op, left, right)?.is_some_and(Ordering::is_gt)),
    }
}

/// Combine two evaluated operands by truthiness. `not` looks only at `left`.
pub(super) fn eval_logical(op: LogicalOp, left: &Value, right: &Value) -> bool {
    match op {
        LogicalOp::And => left.is_truthy() && right.is_truthy(),
        LogicalOp::Or => left.is_truthy() || right.is_truthy(),
        LogicalOp::Not => !left.is_truthy(),
    }
}

/// Language-level equality: numbers compare after promotion, other values
/// compare within their own kind, and mismatched kinds are unequal.
pub(super) fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Integer(l), Value::Float(r)) => (*l as f64) == *r,
        (Value::Float(l), Value::Integer(r)) => *l == (*r as f64),
        _ => left == right,
    }
}

fn numeric_ordering(
    op: ComparisonOp,
    left: &Value,
    right: &Value,
) -> Result<Option<Ordering>, EvalError> {
    let (l, r) = match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => return Ok(Some(l.cmp(r))),
        (Value::Integer(l), Value::Float(r)) => (*l as f64, *r),
        (Value::Float(l), Value::Integer(r)) => (*l, *r as f64),
        (Value::Float(l), Value::Float(r)) => (*l, *r),
        _ => return Err(operand_error(op.symbol(), left, right)),
    };
    Ok(l.partial_cmp(&r))
}

fn operand_error(op: &'static str, left: &Value, right: &Value) -> EvalError {
    if let Some(message) = left.as_error_signal().or_else(|| right.as_error_signal()) {
        return EvalError::ErrorSignalOperand {
            op,
            message: message.to_string(),
        };
    }
    EvalError::TypeMismatch {
        op,
        left: left.type_name(),
        right: right.type_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_add() {
        assert_eq!(eval_binary_int(ArithmeticOp::Add, 2, 3).unwrap(), 5);
        assert_eq!(eval_binary_int(ArithmeticOp::Add, -5, 3).unwrap(), -2);
    }

    #[test]
    fn test_int_sub() {
        assert_eq!(eval_binary_int(ArithmeticOp::Sub, 10, 4).unwrap(), 6);
        assert_eq!(eval_binary_int(ArithmeticOp::Sub, 3, 10).unwrap(), -7);
    }

    #[test]
    fn test_int_div_truncates_toward_zero() {
        assert_eq!(eval_binary_int(ArithmeticOp::Div, 7, 2).unwrap(), 3);
        assert_eq!(eval_binary_int(ArithmeticOp::Div, -7, 2).unwrap(), -3);
    }

    #[test]
    fn test_int_div_by_zero() {
        let result = eval_binary_int(ArithmeticOp::Div, 10, 0);
        assert!(matches!(result, Err(EvalError::DivisionByZero)));
    }

    #[test]
    fn test_int_wrapping_overflow() {
        // Test that we wrap on overflow rather than panic
        assert_eq!(eval_binary_int(ArithmeticOp::Add, i64::MAX, 1).unwrap(), i64::MIN);
        assert_eq!(eval_binary_int(ArithmeticOp::Div, i64::MIN, -1).unwrap(), i64::MIN);
    }

    #[test]
    fn test_float_div_by_zero() {
        // Float division by zero produces infinity (IEEE 754)
        let result = eval_binary_float(ArithmeticOp::Div, 10.0, 0.0);
        assert!(result.is_infinite() && result.is_sign_positive());
        assert!(eval_binary_float(ArithmeticOp::Div, 0.0, 0.0).is_nan());
    }

    #[test]
    fn test_mixed_arithmetic_promotes_to_float() {
        let result = eval_arithmetic(ArithmeticOp::Add, &Value::Integer(1), &Value::Float(0.5));
        assert_eq!(result, Ok(Value::Float(1.5)));
        let result = eval_arithmetic(ArithmeticOp::Div, &Value::Float(1.0), &Value::Integer(0));
        assert_eq!(result, Ok(Value::Float(f64::INFINITY)));
    }

    #[test]
    fn test_arithmetic_on_boolean_is_type_mismatch() {
        let result = eval_arithmetic(ArithmeticOp::Sub, &Value::Boolean(true), &Value::Integer(1));
        assert_eq!(
            result,
            Err(EvalError::TypeMismatch {
                op: "-",
                left: "boolean",
                right: "integer",
            })
        );
    }

    #[test]
    fn test_arithmetic_on_error_signal_carries_message() {
        let signal = Value::error_signal("boom");
        let result = eval_arithmetic(ArithmeticOp::Mul, &Value::Integer(2), &signal);
        assert_eq!(
            result,
            Err(EvalError::ErrorSignalOperand {
                op: "*",
                message: "boom".to_string(),
            })
        );
    }

    #[test]
    fn test_equality_promotes_numbers() {
        assert!(values_equal(&Value::Integer(1), &Value::Float(1.0)));
        assert!(!values_equal(&Value::Integer(1), &Value::Boolean(true)));
        assert!(values_equal(&Value::Absent, &Value::Absent));
    }

    #[test]
    fn test_ordering_comparisons() {
        let one = Value::Integer(1);
        let two = Value::Float(2.0);
        assert_eq!(eval_comparison(ComparisonOp::Lt, &one, &two), Ok(true));
        assert_eq!(eval_comparison(ComparisonOp::Le, &one, &one), Ok(true));
        assert_eq!(eval_comparison(ComparisonOp::Ge, &one, &two), Ok(false));
        assert_eq!(eval_comparison(ComparisonOp::Gt, &two, &one), Ok(true));
    }

    #[test]
    fn test_nan_is_unordered() {
        let nan = Value::Float(f64::NAN);
        assert_eq!(eval_comparison(ComparisonOp::Lt, &nan, &nan), Ok(false));
        assert_eq!(eval_comparison(ComparisonOp::Ge, &nan, &nan), Ok(false));
        assert_eq!(eval_comparison(ComparisonOp::Neq, &nan, &nan), Ok(true));
    }

    #[test]
    fn test_ordering_non_numbers_is_fatal() {
        let result = eval_comparison(ComparisonOp::Lt, &Value::Absent, &Value::Integer(1));
        assert!(matches!(result, Err(EvalError::TypeMismatch { .. })));
    }

    #[test]
    fn test_logical_uses_truthiness() {
        let zero = Value::Integer(0);
        let nil = Value::Absent;
        assert!(eval_logical(LogicalOp::And, &zero, &zero));
        assert!(!eval_logical(LogicalOp::And, &zero, &nil));
        assert!(eval_logical(LogicalOp::Or, &nil, &zero));
        assert!(eval_logical(LogicalOp::Not, &nil, &Value::Boolean(true)));
    }
}
