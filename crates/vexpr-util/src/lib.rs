//! Shared foundation types for the expression engine pipeline.
//!
//! Every phase crate (`vexpr-lex`, `vexpr-parse`, `vexpr-eval`) depends on
//! this crate for source location tracking ([`Span`]) and identifier
//! interning ([`Symbol`]), the same way the wider pipeline's earlier phases
//! share a common utility layer rather than each rolling its own.

mod span;
mod symbol;

pub use span::Span;
pub use symbol::Symbol;

pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;
