//! Character-level cursor over the expression source.
//!
//! Unlike a byte cursor, [`Cursor`] walks Unicode scalar values one at a
//! time so that `retreat` can always step back exactly one logical
//! character regardless of its UTF-8 width — the lexer relies on this to
//! "un-consume" a closing quote after a sub-scan already read past it.

pub struct Cursor {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
}

impl Cursor {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the next code point and advances past it. Callers must gate
    /// on [`Cursor::has_more`] first; advancing past the end is caller
    /// misuse, not a recoverable condition.
    pub fn advance(&mut self) -> char {
        let ch = self.chars[self.pos];
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        ch
    }

    /// Moves the cursor back `n` positions. Line/column bookkeeping is
    /// approximate across a retreat that crosses a newline — the engine
    /// only ever retreats by one or two positions within a single token, so
    /// this never actually straddles a line boundary in practice.
    pub fn retreat(&mut self, n: usize) {
        self.pos = self.pos.saturating_sub(n);
        self.column = self.column.saturating_sub(n as u32);
    }

    pub fn has_more(&self) -> bool {
        self.pos < self.chars.len()
    }

    /// Returns the next code point without consuming it. Caller must gate
    /// on [`Cursor::has_more`] first.
    pub fn peek(&self) -> char {
        self.chars[self.pos]
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_through_ascii() {
        let mut c = Cursor::new("ab");
        assert_eq!(c.advance(), 'a');
        assert_eq!(c.advance(), 'b');
        assert!(!c.has_more());
    }

    #[test]
    fn advances_through_multibyte_code_points() {
        let mut c = Cursor::new("a\u{1F600}b");
        assert_eq!(c.advance(), 'a');
        assert_eq!(c.advance(), '\u{1F600}');
        assert_eq!(c.advance(), 'b');
    }

    #[test]
    fn retreat_allows_re_reading() {
        let mut c = Cursor::new("xyz");
        c.advance();
        c.advance();
        c.retreat(1);
        assert_eq!(c.advance(), 'y');
    }
}
