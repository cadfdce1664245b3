//! Lexical-phase errors.

use thiserror::Error;
use vexpr_util::Span;

#[derive(Debug, Error, PartialEq)]
pub enum LexError {
    #[error("literal string unclosed at {span:?}")]
    UnterminatedString { span: Span },

    #[error("more than 1 character for char type at {span:?}")]
    MalformedChar { span: Span },

    #[error("{kind} at tail of token '{text}'")]
    TrailingDot { kind: &'static str, text: String },

    #[error("invalid token '{text}'")]
    UnknownPunctuation { text: String },

    #[error("unbalanced parenthesis or bracket")]
    Unbalanced,
}
