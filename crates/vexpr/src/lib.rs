//! `vexpr`: an embeddable expression engine.
//!
//! Compiles a small expression language — arithmetic, comparisons, logical
//! and ternary operators, and dotted/bracketed path lookups against a
//! host-supplied [`Environment`] — into a reusable [`CompiledExpression`],
//! then evaluates it with no allocation beyond what the expression's own
//! containers need.
//!
//! ```
//! use vexpr::{compile, MapEnvironment, Value};
//!
//! let expr = compile("age >= 18 ? \"adult\" : \"minor\"").unwrap();
//! let env = MapEnvironment::new().insert("age", Value::Number(21.0));
//! assert_eq!(expr.evaluate(&env).unwrap(), Value::Str("adult".to_string()));
//! ```
//!
//! The three phases — [`vexpr_lex`], [`vexpr_parse`], [`vexpr_eval`] — are
//! independently usable crates; this one just wires them into the single
//! `compile`/`evaluate` entry point described by the crate's design
//! document.

use thiserror::Error;
use vexpr_eval::{EvalError, Evaluator};
use vexpr_lex::{LexError, Lexer};
use vexpr_parse::{Node, ParseError, Parser};

pub use vexpr_eval::{EmptyEnvironment, Environment, MapEnvironment, Record, Value};

/// Failure during [`compile`]: lexing and parsing are the only two phases
/// that can fail before an expression is ever evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A parsed, ready-to-evaluate expression. Immutable and side-effect-free
/// to compile; cheap to clone and to evaluate repeatedly against different
/// environments.
#[derive(Debug, Clone)]
pub struct CompiledExpression {
    root: Node,
}

/// Lexes and parses `text` into a [`CompiledExpression`]. Never evaluates
/// it — a successfully compiled expression can still fail at
/// [`CompiledExpression::evaluate`] time (undefined variables, type
/// mismatches), which `compile` has no way to detect ahead of evaluation.
pub fn compile(text: &str) -> Result<CompiledExpression, CompileError> {
    let tokens = Lexer::scan(text)?;
    let root = Parser::parse(tokens)?;
    Ok(CompiledExpression { root })
}

impl CompiledExpression {
    /// Evaluates the compiled tree against `env`. Safe to call repeatedly,
    /// concurrently, and with different environments — no evaluator state
    /// survives across calls (see `vexpr_eval::evaluator`'s module docs).
    pub fn evaluate(&self, env: &dyn Environment) -> Result<Value, EvalError> {
        Evaluator::eval(&self.root, env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_rejects_unbalanced_input() {
        assert!(matches!(compile("(1 + 2"), Err(CompileError::Lex(_))));
    }

    #[test]
    fn compile_rejects_trailing_operator() {
        assert!(matches!(compile("1 +"), Err(CompileError::Parse(_))));
    }

    #[test]
    fn evaluate_runs_after_successful_compile() {
        let expr = compile("1 + 2 * 3").unwrap();
        assert_eq!(expr.evaluate(&EmptyEnvironment).unwrap(), Value::Number(7.0));
    }
}
