//! Recursive-descent parser for the expression language, plus the
//! associativity fixer that follows it.
//!
//! Pipeline: [`TokenStream`] wraps the lexer's output, [`Parser::parse`]
//! builds a right-leaning tree over the precedence ladder, and
//! [`associativity::fix`] straightens same-precedence runs into the
//! left-associative shape evaluation expects.

pub mod ast;
pub mod associativity;
mod error;
mod parser;
mod token_stream;

pub use ast::{Literal, Node, Op};
pub use error::ParseError;
pub use parser::Parser;
pub use token_stream::TokenStream;
