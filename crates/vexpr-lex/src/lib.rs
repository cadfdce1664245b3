//! Lexical scanner for the expression engine.
//!
//! Converts source text into an ordered [`Token`] sequence via [`Lexer`],
//! driven by a per-token-class [successor table](successor) that
//! disambiguates the one context-sensitive lexing decision this grammar
//! has: whether a bare `-` is unary negation or binary subtraction.

mod cursor;
mod error;
mod lexer;
pub mod successor;
mod token;

pub use cursor::Cursor;
pub use error::LexError;
pub use lexer::Lexer;
pub use successor::SuccessorRule;
pub use token::{Precedence, Token, TokenData, TokenKind};
