//! Restartable cursor over a [`Token`] sequence.

use vexpr_lex::{Precedence, Token};

pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn has_more(&self) -> bool {
        self.pos < self.tokens.len()
    }

    /// Returns the next token and advances past it. Caller must gate on
    /// [`TokenStream::has_more`] first.
    pub fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        self.pos += 1;
        token
    }

    /// Un-reads the most recently returned token.
    pub fn retreat(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Scans from the current position to the end and returns the
    /// numerically lowest precedence class seen — this is how the parser
    /// picks which recursion level to enter first. Grouping tokens and the
    /// ternary operators share the lowest rank (see [`Precedence`]), so an
    /// expression containing parens/brackets or a `?`/`:` anywhere always
    /// routes through the full recursive-descent chain starting at the
    /// ternary level.
    pub fn lowest_remaining_precedence(&self) -> Precedence {
        self.tokens[self.pos..]
            .iter()
            .map(|t| t.kind().precedence())
            .min()
            .unwrap_or(Precedence::Literal)
    }
}
