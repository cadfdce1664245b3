//! Operator type-checks and compute rules.
//!
//! Grounded directly in the original source's `node_check.go` (the
//! type-check predicate table) and `node_calculator.go` (the compute
//! table). Every arm below exists because the corresponding Go `case`
//! exists — no operator gained or lost a capability in translation.
//!
//! Ternary operators are handled in [`crate::evaluator`] instead of here:
//! their "compute" step is inseparable from the short-circuit carry, so
//! folding them into this module would just mean threading
//! `ShortCircuitState` through a module that otherwise never needs it.

use crate::error::EvalError;
use crate::value::Value;
use vexpr_parse::Op;

/// Binary operator compute, assuming `left`/`right` already passed
/// [`check_binary`] for `op`.
pub fn compute_binary(op: Op, left: &Value, right: &Value) -> Result<Value, EvalError> {
    check_binary(op, left, right)?;
    Ok(match op {
        Op::Add => match (left.as_number(), right.as_number()) {
            (Some(a), Some(b)) => Value::Number(a + b),
            // Type-checked to require at least one string operand when not
            // both numeric; the original stringifies both sides with
            // `fmt.Sprintf("%v%v", ...)` regardless of which side is the
            // string.
            _ => Value::Str(format!("{left}{right}")),
        },
        Op::Sub => Value::Number(must_number(left, op)? - must_number(right, op)?),
        Op::Mul => Value::Number(must_number(left, op)? * must_number(right, op)?),
        // No zero-check: division and remainder by zero propagate IEEE-754
        // infinity/NaN exactly as the original's untyped `float64` math
        // does.
        Op::Quo => Value::Number(must_number(left, op)? / must_number(right, op)?),
        Op::Rem => Value::Number(must_number(left, op)? % must_number(right, op)?),
        Op::And => bitwise(left, right, op, |a, b| a & b)?,
        Op::Or => bitwise(left, right, op, |a, b| a | b)?,
        Op::Xor => bitwise(left, right, op, |a, b| a ^ b)?,
        Op::Shl => bitwise(left, right, op, |a, b| a << b)?,
        Op::Shr => bitwise(left, right, op, |a, b| a >> b)?,
        Op::Eq => Value::Bool(left == right),
        Op::NotEq => Value::Bool(left != right),
        Op::Gt => compare(left, right, op, |o| o == std::cmp::Ordering::Greater)?,
        Op::Lt => compare(left, right, op, |o| o == std::cmp::Ordering::Less)?,
        Op::Geq => compare(left, right, op, |o| o != std::cmp::Ordering::Less)?,
        Op::Leq => compare(left, right, op, |o| o != std::cmp::Ordering::Greater)?,
        Op::LAnd => Value::Bool(must_bool(left, op)? && must_bool(right, op)?),
        Op::LOr => Value::Bool(must_bool(left, op)? || must_bool(right, op)?),
        other => unreachable!("{other:?} is not a binary compute op"),
    })
}

pub fn compute_unary(op: Op, operand: &Value) -> Result<Value, EvalError> {
    match op {
        Op::Not => Ok(Value::Bool(!must_bool(operand, op)?)),
        Op::Neg => Ok(Value::Number(-must_number(operand, op)?)),
        other => unreachable!("{other:?} is not a unary compute op"),
    }
}

/// The type-check predicate table from `node_check.go`. `Eq`/`NotEq` have
/// no predicate at all in the original — any pairing is comparable via
/// structural equality — and `TernaryElse` likewise never fails a
/// type-check (only `TernaryIf`'s condition does, handled in the
/// evaluator).
fn check_binary(op: Op, left: &Value, right: &Value) -> Result<(), EvalError> {
    let ok = match op {
        Op::Add => (is_number(left) && is_number(right)) || is_string(left) || is_string(right),
        Op::Sub | Op::Mul | Op::Quo | Op::Rem | Op::And | Op::Or | Op::Xor | Op::Shl | Op::Shr => {
            is_number(left) && is_number(right)
        }
        Op::Gt | Op::Lt | Op::Geq | Op::Leq => {
            (is_number(left) && is_number(right)) || (is_string(left) && is_string(right))
        }
        Op::LAnd | Op::LOr => is_bool(left) && is_bool(right),
        Op::Eq | Op::NotEq => true,
        other => unreachable!("{other:?} is not a binary check op"),
    };
    if ok {
        Ok(())
    } else {
        // Report whichever operand actually fails the per-op shape; if both
        // do, the left operand wins, matching the original's single
        // `fmt.Errorf` call site per node rather than per operand.
        let offender = if passes_operand_shape(op, left) { right } else { left };
        Err(EvalError::TypeMismatch {
            value: offender.clone(),
            op,
        })
    }
}

fn passes_operand_shape(op: Op, value: &Value) -> bool {
    match op {
        Op::Add => is_number(value) || is_string(value),
        Op::LAnd | Op::LOr => is_bool(value),
        Op::Gt | Op::Lt | Op::Geq | Op::Leq => is_number(value) || is_string(value),
        Op::Eq | Op::NotEq => true,
        _ => is_number(value),
    }
}

fn must_number(value: &Value, op: Op) -> Result<f64, EvalError> {
    value.as_number().ok_or_else(|| EvalError::TypeMismatch {
        value: value.clone(),
        op,
    })
}

fn must_bool(value: &Value, op: Op) -> Result<bool, EvalError> {
    value.is_truthy_bool().ok_or_else(|| EvalError::TypeMismatch {
        value: value.clone(),
        op,
    })
}

fn is_number(value: &Value) -> bool {
    value.as_number().is_some()
}

fn is_string(value: &Value) -> bool {
    value.as_str().is_some()
}

fn is_bool(value: &Value) -> bool {
    value.is_truthy_bool().is_some()
}

/// Truncating cast matching the original's `int64(float64Value)`.
fn to_i64(n: f64) -> i64 {
    n as i64
}

fn bitwise(
    left: &Value,
    right: &Value,
    op: Op,
    f: impl Fn(i64, i64) -> i64,
) -> Result<Value, EvalError> {
    let a = to_i64(must_number(left, op)?);
    let b = to_i64(must_number(right, op)?);
    Ok(Value::Number(f(a, b) as f64))
}

fn compare(
    left: &Value,
    right: &Value,
    op: Op,
    accept: impl Fn(std::cmp::Ordering) -> bool,
) -> Result<Value, EvalError> {
    let ordering = match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => a.partial_cmp(&b).ok_or_else(|| EvalError::TypeMismatch {
            value: left.clone(),
            op,
        })?,
        _ => match (left.as_str(), right.as_str()) {
            (Some(a), Some(b)) => a.cmp(b),
            _ => {
                return Err(EvalError::TypeMismatch {
                    value: left.clone(),
                    op,
                })
            }
        },
    };
    Ok(Value::Bool(accept(ordering)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sums_two_numbers() {
        let result = compute_binary(Op::Add, &Value::Number(1.0), &Value::Number(2.0)).unwrap();
        assert_eq!(result, Value::Number(3.0));
    }

    #[test]
    fn add_concatenates_when_either_side_is_a_string() {
        let result =
            compute_binary(Op::Add, &Value::Str("n=".into()), &Value::Number(3.5)).unwrap();
        assert_eq!(result, Value::Str("n=3.5".into()));
    }

    #[test]
    fn add_rejects_bool_operands() {
        let err = compute_binary(Op::Add, &Value::Bool(true), &Value::Number(1.0)).unwrap_err();
        assert!(matches!(err, EvalError::TypeMismatch { .. }));
    }

    #[test]
    fn sub_requires_both_numbers() {
        assert!(compute_binary(Op::Sub, &Value::Str("1".into()), &Value::Number(1.0)).is_err());
    }

    #[test]
    fn shl_truncates_like_int64_cast() {
        // 3.9 << 1 == 6.0 (3.9 truncates to 3 before shifting).
        let result = compute_binary(Op::Shl, &Value::Number(3.9), &Value::Number(1.0)).unwrap();
        assert_eq!(result, Value::Number(6.0));
    }

    #[test]
    fn comparators_accept_number_or_string_pairs_only() {
        assert!(compute_binary(Op::Gt, &Value::Number(2.0), &Value::Number(1.0)).is_ok());
        assert!(compute_binary(Op::Gt, &Value::Str("b".into()), &Value::Str("a".into())).is_ok());
        assert!(compute_binary(Op::Gt, &Value::Number(2.0), &Value::Str("a".into())).is_err());
    }

    #[test]
    fn equality_has_no_type_check() {
        let result = compute_binary(Op::Eq, &Value::Number(1.0), &Value::Str("1".into())).unwrap();
        assert_eq!(result, Value::Bool(false));
    }

    #[test]
    fn logical_and_requires_bools() {
        assert!(compute_binary(Op::LAnd, &Value::Bool(true), &Value::Bool(false)).is_ok());
        assert!(compute_binary(Op::LAnd, &Value::Number(1.0), &Value::Bool(false)).is_err());
    }

    #[test]
    fn neg_negates_a_number() {
        assert_eq!(compute_unary(Op::Neg, &Value::Number(4.0)).unwrap(), Value::Number(-4.0));
    }

    #[test]
    fn not_negates_a_bool() {
        assert_eq!(compute_unary(Op::Not, &Value::Bool(true)).unwrap(), Value::Bool(false));
    }
}
