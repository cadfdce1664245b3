//! Per-token-class successor rules.
//!
//! Each [`TokenKind`] has a [`SuccessorRule`] describing what may
//! legitimately follow it. The lexer seeds the "previous" rule with
//! [`TokenKind::Illegal`]'s rule, which enumerates the kinds allowed to
//! open an expression, and re-seeds it after every emitted token.
//!
//! In practice only one query is load-bearing: whether the rule for the
//! previously emitted token permits [`TokenKind::Neg`] to follow, which is
//! how the lexer tells a unary minus from a binary subtraction apart
//! without any lookahead past the `-` itself. The `startable`/`terminable`
//! flags are carried because the source data model defines them, but (as
//! in the original engine) nothing downstream consults them yet.

use crate::token::TokenKind;
use std::collections::HashSet;

pub struct SuccessorRule {
    /// May this kind open an expression?
    pub startable: bool,
    /// May this kind be the last token of an expression?
    pub terminable: bool,
    /// May this kind be skipped when checking paren/bracket balance (i.e.
    /// is it structurally inert)?
    pub skippable: bool,
    next_allowable: HashSet<TokenKind>,
}

impl SuccessorRule {
    fn new(startable: bool, terminable: bool, skippable: bool, next: &[TokenKind]) -> Self {
        Self {
            startable,
            terminable,
            skippable,
            next_allowable: next.iter().copied().collect(),
        }
    }

    pub fn allows(&self, kind: TokenKind) -> bool {
        self.next_allowable.contains(&kind)
    }
}

use TokenKind::*;

/// Rule for the synthetic kind that seeds the lexer before anything has
/// been scanned. Its `next_allowable` set is exactly the set of kinds
/// allowed to open an expression.
pub fn illegal_rule() -> SuccessorRule {
    SuccessorRule::new(
        false,
        false,
        false,
        &[Char, Str, Number, Bool, Variable, Not, Neg, LParen, Selector],
    )
}

/// Looks up the successor rule for a just-emitted token kind.
pub fn rule_for(kind: TokenKind) -> SuccessorRule {
    match kind {
        Illegal => illegal_rule(),
        Char => SuccessorRule::new(
            true,
            true,
            false,
            &[Eq, NotEq, Lt, Gt, Leq, Geq, LAnd, LOr, TernaryIf, TernaryElse, RParen],
        ),
        Str => SuccessorRule::new(
            true,
            true,
            false,
            &[Eq, NotEq, Lt, Gt, Leq, Geq, Add, LAnd, LOr, TernaryIf, TernaryElse, RParen],
        ),
        Number => SuccessorRule::new(
            true,
            true,
            false,
            &[
                Eq, NotEq, Lt, Gt, Leq, Geq, Add, Sub, Mul, Quo, Rem, And, Or, Xor, Shl, Shr,
                LAnd, LOr, TernaryIf, TernaryElse, RParen,
            ],
        ),
        Bool => SuccessorRule::new(
            true,
            true,
            false,
            &[Eq, NotEq, LAnd, LOr, TernaryIf, TernaryElse, RParen],
        ),
        Variable => SuccessorRule::new(
            true,
            true,
            false,
            &[
                Eq, NotEq, Lt, Gt, Leq, Geq, Add, Sub, Mul, Quo, Rem, And, Or, Xor, Shl, Shr,
                LAnd, LOr, TernaryIf, TernaryElse, RParen, LBracket, RBracket,
            ],
        ),
        Accessor => SuccessorRule::new(
            false,
            true,
            false,
            &[
                Eq, NotEq, Lt, Gt, Leq, Geq, Add, Sub, Mul, Quo, Rem, And, Or, Xor, Shl, Shr,
                LAnd, LOr, TernaryIf, TernaryElse, RParen, LBracket, RBracket,
            ],
        ),
        Selector => SuccessorRule::new(
            true,
            true,
            false,
            &[
                Eq, NotEq, Lt, Gt, Leq, Geq, Add, Sub, Mul, Quo, Rem, And, Or, Xor, Shl, Shr,
                LAnd, LOr, TernaryIf, TernaryElse, RParen, LBracket, RBracket,
            ],
        ),
        LParen => SuccessorRule::new(
            true,
            false,
            true,
            &[Char, Str, Number, Bool, Variable, Not, Neg, LParen, RParen, Selector],
        ),
        RParen => SuccessorRule::new(
            false,
            false,
            true,
            &[
                Char, Str, Number, Bool, Variable, Not, Neg, Selector, Accessor, LParen, RParen,
                LBracket, RBracket,
            ],
        ),
        LBracket => {
            SuccessorRule::new(false, true, false, &[Str, Number, Variable, LParen, Selector])
        }
        RBracket => SuccessorRule::new(
            false,
            true,
            false,
            &[
                Eq, NotEq, Lt, Gt, Leq, Geq, Add, Sub, Mul, Quo, Rem, And, Or, Xor, Shl, Shr,
                LAnd, LOr, TernaryIf, TernaryElse, RParen, Selector, Accessor,
            ],
        ),
        Add => SuccessorRule::new(false, false, false, &[Neg, Char, Str, Number, Variable, Selector]),
        Sub => SuccessorRule::new(false, false, false, &[Neg, Char, Number, Variable, Selector]),
        Mul => SuccessorRule::new(false, false, false, &[Neg, Number, Variable, Selector]),
        Quo => SuccessorRule::new(false, false, false, &[Neg, Number, Variable, Selector]),
        Rem => SuccessorRule::new(false, false, false, &[Neg, Number, Variable, Selector]),
        And => SuccessorRule::new(false, false, false, &[Number, Variable, Selector]),
        Or => SuccessorRule::new(false, false, false, &[Number, Variable, Selector]),
        Xor => SuccessorRule::new(false, false, false, &[Number, Variable, Selector]),
        Shl => SuccessorRule::new(false, false, false, &[Number, Variable, Selector]),
        Shr => SuccessorRule::new(false, false, false, &[Number, Variable, Selector]),
        Eq | NotEq | Lt | Gt | Leq | Geq | LAnd | LOr | TernaryIf | TernaryElse => {
            SuccessorRule::new(
                false,
                false,
                false,
                &[Char, Str, Number, Bool, Variable, Not, Neg, LParen],
            )
        }
        Not => SuccessorRule::new(true, false, false, &[Bool, Variable, LParen, Selector]),
        Neg => SuccessorRule::new(true, false, false, &[Number, Variable, LParen, Selector]),
        Eof => illegal_rule(),
    }
}
