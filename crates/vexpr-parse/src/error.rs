//! Parser error taxonomy.

use thiserror::Error;
use vexpr_lex::Token;
use vexpr_util::Span;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unexpected token {found:?} at {at:?}")]
    UnexpectedToken { found: Token, at: Span },

    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A `Selector`/`Accessor` immediately followed by `(` reads as a
    /// function-call shape the grammar has no registry for (see §9 of the
    /// design notes). Rejected here rather than built into an inert node
    /// that would need to panic or invent call semantics at eval time.
    #[error("function calls are not supported ('{name}(...)' at {at:?})")]
    UnsupportedFunctionCall { name: String, at: Span },
}
