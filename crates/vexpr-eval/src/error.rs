//! Evaluator error taxonomy.

use crate::value::Value;
use thiserror::Error;
use vexpr_parse::Op;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Covers every type-check failure: a numeric operator applied to a
    /// non-number, a logical operator applied to a non-bool, a comparator
    /// applied to an unsupported pairing, a non-bool ternary condition, a
    /// prefix operator on the wrong kind. The original source routes all
    /// of these through one `fmt.Errorf(node.err, ...)` call keyed by a
    /// per-node error template string; `op` plays the same role here.
    #[error("value '{value}' cannot be used with operator {op:?}")]
    TypeMismatch { value: Value, op: Op },

    #[error("no parameter '{0}' found")]
    UndefinedVariable(String),

    #[error("invalid index '{0}'")]
    InvalidIndex(String),

    #[error("field '{field}' not found on {container}")]
    FieldNotFound {
        container: &'static str,
        field: String,
    },

    #[error("{0} does not support path resolution")]
    UnsupportedContainer(&'static str),
}
