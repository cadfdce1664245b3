//! Recursive-descent parser over the precedence ladder.
//!
//! Built from one generic binary-level helper
//! (`Parser::parse_binary_level`), parameterized per level by the set of
//! tokens that belong to it and the next-higher level's parse function.
//! This is a function-pointer re-expression of the original's
//! `buildParserWithPkg` factory (a struct of nilable fields); it is the one
//! place this port simplifies the source's shape while keeping its
//! algorithm — see the crate-level docs for why.

use crate::ast::{Literal, Node, Op};
use crate::error::ParseError;
use crate::token_stream::TokenStream;
use vexpr_lex::{Precedence, Token, TokenData, TokenKind};

pub struct Parser {
    stream: TokenStream,
}

type LevelFn = fn(&mut Parser) -> Result<Option<Node>, ParseError>;

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            stream: TokenStream::new(tokens),
        }
    }

    /// Parses the full token stream into a single expression tree and
    /// straightens right-leaning same-precedence chains.
    pub fn parse(tokens: Vec<Token>) -> Result<Node, ParseError> {
        let mut parser = Parser::new(tokens);
        let node = parser.parse_expr()?.ok_or(ParseError::UnexpectedEof)?;
        Ok(crate::associativity::fix(node))
    }

    /// Entry point: inspects the lowest remaining precedence class and
    /// dispatches to the matching level. `Literal`/`Prefix`/`Clause` (and
    /// the `Unranked` grouping/ternary fallback) all route to
    /// `parse_path_or_value`.
    pub fn parse_expr(&mut self) -> Result<Option<Node>, ParseError> {
        if !self.stream.has_more() {
            return Ok(None);
        }
        match self.stream.lowest_remaining_precedence() {
            Precedence::Literal | Precedence::Prefix | Precedence::Clause => {
                self.parse_path_or_value()
            }
            Precedence::Multiplicative => self.parse_multiplicative(),
            Precedence::Additive => self.parse_additive(),
            Precedence::Shift => self.parse_shift(),
            Precedence::Comparator => self.parse_comparator(),
            Precedence::Bitwise => self.parse_bitwise(),
            Precedence::LogicalAnd => self.parse_logical_and(),
            Precedence::LogicalOr => self.parse_logical_or(),
            Precedence::Unranked | Precedence::Ternary => self.parse_ternary(),
        }
    }

    fn parse_ternary(&mut self) -> Result<Option<Node>, ParseError> {
        self.parse_binary_level(
            &[TokenKind::TernaryIf, TokenKind::TernaryElse],
            Self::parse_logical_or,
            Self::parse_ternary,
        )
    }

    fn parse_logical_or(&mut self) -> Result<Option<Node>, ParseError> {
        self.parse_binary_level(
            &[TokenKind::LOr],
            Self::parse_logical_and,
            Self::parse_logical_or,
        )
    }

    fn parse_logical_and(&mut self) -> Result<Option<Node>, ParseError> {
        self.parse_binary_level(&[TokenKind::LAnd], Self::parse_bitwise, Self::parse_logical_and)
    }

    fn parse_bitwise(&mut self) -> Result<Option<Node>, ParseError> {
        self.parse_binary_level(
            &[TokenKind::And, TokenKind::Or, TokenKind::Xor],
            Self::parse_comparator,
            Self::parse_bitwise,
        )
    }

    fn parse_comparator(&mut self) -> Result<Option<Node>, ParseError> {
        self.parse_binary_level(
            &[
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::Gt,
                TokenKind::Lt,
                TokenKind::Geq,
                TokenKind::Leq,
            ],
            Self::parse_shift,
            Self::parse_comparator,
        )
    }

    fn parse_shift(&mut self) -> Result<Option<Node>, ParseError> {
        self.parse_binary_level(
            &[TokenKind::Shl, TokenKind::Shr],
            Self::parse_additive,
            Self::parse_shift,
        )
    }

    fn parse_additive(&mut self) -> Result<Option<Node>, ParseError> {
        self.parse_binary_level(
            &[TokenKind::Add, TokenKind::Sub],
            Self::parse_multiplicative,
            Self::parse_additive,
        )
    }

    fn parse_multiplicative(&mut self) -> Result<Option<Node>, ParseError> {
        self.parse_binary_level(
            &[TokenKind::Mul, TokenKind::Quo, TokenKind::Rem],
            Self::parse_path_or_value,
            Self::parse_multiplicative,
        )
    }

    /// Generic binary-level parse: left operand via `next_level`, then
    /// while the next token belongs to `valid`, consume it and recurse
    /// into `same_level` for the right operand (producing a right-leaning
    /// chain the associativity fixer later straightens).
    fn parse_binary_level(
        &mut self,
        valid: &[TokenKind],
        next_level: LevelFn,
        same_level: LevelFn,
    ) -> Result<Option<Node>, ParseError> {
        let left = match next_level(self)? {
            Some(node) => node,
            None => return Ok(None),
        };

        if !self.stream.has_more() {
            return Ok(Some(left));
        }

        let token = self.stream.advance();
        if !valid.contains(&token.kind()) {
            self.stream.retreat();
            return Ok(Some(left));
        }

        let op = op_for_token_kind(token.kind());
        let right = same_level(self)?.ok_or(ParseError::UnexpectedEof)?;
        let span = left.span.to(right.span);
        Ok(Some(Node::binary(op, left, right, span)))
    }

    fn parse_prefix(&mut self) -> Result<Option<Node>, ParseError> {
        if !self.stream.has_more() {
            return Ok(None);
        }
        let token = self.stream.advance();
        let op = match token.kind() {
            TokenKind::Neg => Op::Neg,
            TokenKind::Not => Op::Not,
            _ => {
                self.stream.retreat();
                return self.parse_path_or_value();
            }
        };
        let operand = self.parse_path_or_value()?.ok_or(ParseError::UnexpectedEof)?;
        let span = token.span.to(operand.span);
        Ok(Some(Node::unary(op, operand, span)))
    }

    /// Path roots (`Variable`/`Selector`/`Accessor`) collect a chain of
    /// trailing steps: bracketed sub-expressions, further `Selector`
    /// tokens, further `Accessor` tokens. Everything else falls through to
    /// [`Parser::parse_value`].
    fn parse_path_or_value(&mut self) -> Result<Option<Node>, ParseError> {
        if !self.stream.has_more() {
            return Ok(None);
        }
        let token = self.stream.advance();
        let literal = match &token.kind {
            TokenData::Variable(name) => Literal::Variable(name.clone()),
            TokenData::Selector(path) => Literal::Selector(path.clone()),
            TokenData::Accessor(path) => Literal::Accessor(path.clone()),
            _ => {
                self.stream.retreat();
                return self.parse_value();
            }
        };

        // `name(...)` shape: a Selector/Accessor immediately followed by
        // `(` reads as a function call, but the grammar has no function
        // registry to dispatch through (see crate docs / design notes and
        // spec §9) — reject it at parse time rather than building a node
        // that would need invented call semantics at eval time.
        if matches!(token.kind(), TokenKind::Selector | TokenKind::Accessor)
            && self.stream.has_more()
        {
            let next = self.stream.advance();
            if next.kind() == TokenKind::LParen {
                let name = match &literal {
                    Literal::Selector(segments) | Literal::Accessor(segments) => {
                        segments.join(".")
                    }
                    _ => unreachable!(),
                };
                return Err(ParseError::UnsupportedFunctionCall {
                    name,
                    at: token.span.to(next.span),
                });
            }
            self.stream.retreat();
        }

        let mut steps = Vec::new();
        let mut end_span = token.span;
        while self.stream.has_more() {
            let next = self.stream.advance();
            match &next.kind {
                TokenData::LBracket => {
                    let index = self.parse_expr()?.ok_or(ParseError::UnexpectedEof)?;
                    // Balance was already verified at lex time; jump over
                    // whichever closer follows without checking which one.
                    let close_span = if self.stream.has_more() {
                        self.stream.advance().span
                    } else {
                        index.span
                    };
                    end_span = close_span;
                    steps.push(Node::clause(index, next.span.to(close_span)));
                }
                TokenData::Selector(path) => {
                    end_span = next.span;
                    steps.push(Node::leaf(Literal::Selector(path.clone()), next.span));
                }
                TokenData::Accessor(path) => {
                    end_span = next.span;
                    steps.push(Node::leaf(Literal::Accessor(path.clone()), next.span));
                }
                _ => {
                    self.stream.retreat();
                    break;
                }
            }
        }

        let span = token.span.to(end_span);
        let (right, right_list) = reset_right_and_right_list(steps);
        Ok(Some(Node::path(literal, right, right_list, span)))
    }

    /// Grouping, prefix, and plain-literal atoms.
    fn parse_value(&mut self) -> Result<Option<Node>, ParseError> {
        if !self.stream.has_more() {
            return Ok(None);
        }
        let token = self.stream.advance();
        match &token.kind {
            TokenData::LParen | TokenData::LBracket => {
                let inner = self.parse_expr()?.ok_or(ParseError::UnexpectedEof)?;
                // Balance was already verified at lex time; jump over
                // whichever closer follows without checking which one —
                // matching the original's count-only balance check.
                let closer_span = if self.stream.has_more() {
                    self.stream.advance().span
                } else {
                    inner.span
                };
                let span = token.span.to(closer_span);
                Ok(Some(Node::clause(inner, span)))
            }
            TokenData::Neg | TokenData::Not => {
                self.stream.retreat();
                self.parse_prefix()
            }
            TokenData::Number(n) => Ok(Some(Node::leaf(Literal::Number(*n), token.span))),
            TokenData::Str(s) => Ok(Some(Node::leaf(Literal::Str(s.clone()), token.span))),
            TokenData::Char(c) => Ok(Some(Node::leaf(Literal::Char(*c), token.span))),
            TokenData::Bool(b) => Ok(Some(Node::leaf(Literal::Bool(*b), token.span))),
            _ => Err(ParseError::UnexpectedToken {
                found: token.clone(),
                at: token.span,
            }),
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if !self.stream.has_more() {
            return Err(ParseError::UnexpectedEof);
        }
        let token = self.stream.advance();
        if token.kind() != kind {
            return Err(ParseError::UnexpectedToken {
                found: token.clone(),
                at: token.span,
            });
        }
        Ok(())
    }
}

fn op_for_token_kind(kind: TokenKind) -> Op {
    match kind {
        TokenKind::TernaryIf => Op::TernaryIf,
        TokenKind::TernaryElse => Op::TernaryElse,
        TokenKind::LOr => Op::LOr,
        TokenKind::LAnd => Op::LAnd,
        TokenKind::And => Op::And,
        TokenKind::Or => Op::Or,
        TokenKind::Xor => Op::Xor,
        TokenKind::Eq => Op::Eq,
        TokenKind::NotEq => Op::NotEq,
        TokenKind::Gt => Op::Gt,
        TokenKind::Lt => Op::Lt,
        TokenKind::Geq => Op::Geq,
        TokenKind::Leq => Op::Leq,
        TokenKind::Shl => Op::Shl,
        TokenKind::Shr => Op::Shr,
        TokenKind::Add => Op::Add,
        TokenKind::Sub => Op::Sub,
        TokenKind::Mul => Op::Mul,
        TokenKind::Quo => Op::Quo,
        TokenKind::Rem => Op::Rem,
        other => unreachable!("{other:?} is not a binary-level operator token"),
    }
}

/// A path's trailing steps reduce to a single `right` child if there is
/// exactly one, a `right_list` if there are more than one, or neither if
/// the path has no trailing steps at all.
fn reset_right_and_right_list(mut steps: Vec<Node>) -> (Option<Node>, Vec<Node>) {
    match steps.len() {
        0 => (None, Vec::new()),
        1 => (Some(steps.remove(0)), Vec::new()),
        _ => (None, steps),
    }
}
