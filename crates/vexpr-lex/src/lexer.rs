//! Greedy, single-pass scanner: text in, [`Token`] sequence out.

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::successor::{self, SuccessorRule};
use crate::token::{Token, TokenData, TokenKind};
use vexpr_util::Span;

pub struct Lexer {
    cursor: Cursor,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Scans `source` into an ordered token sequence, then verifies
    /// parenthesis/bracket balance. Whitespace between tokens is dropped.
    pub fn scan(source: &str) -> Result<Vec<Token>, LexError> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        // Seeded with the rule for the synthetic ILLEGAL entry, which
        // enumerates the kinds allowed to open an expression.
        let mut prev_rule = successor::illegal_rule();

        while let Some(token) = lexer.scan_one(&prev_rule)? {
            prev_rule = successor::rule_for(token.kind());
            tokens.push(token);
        }

        check_balance(&tokens)?;
        Ok(tokens)
    }

    /// Scans and returns a single token, or `None` once the cursor is
    /// exhausted. `prev` is the successor rule of the previously emitted
    /// token — consulted only to disambiguate a bare `-` between [`NEG`]
    /// and [`SUB`].
    ///
    /// [`NEG`]: TokenKind::Neg
    /// [`SUB`]: TokenKind::Sub
    fn scan_one(&mut self, prev: &SuccessorRule) -> Result<Option<Token>, LexError> {
        while self.cursor.has_more() {
            let start = self.cursor.position();
            let start_line = self.cursor.line();
            let start_col = self.cursor.column();
            let ch = self.cursor.advance();

            if ch.is_whitespace() {
                continue;
            }

            let data = if ch.is_ascii_digit() {
                self.scan_number(ch)?
            } else if ch.is_alphabetic() {
                self.scan_identifier(ch)?
            } else if ch == '.' {
                self.scan_accessor(ch)?
            } else if ch == '"' {
                self.scan_string(start, start_line, start_col)?
            } else if ch == '\'' {
                self.scan_char(start, start_line, start_col)?
            } else if ch == '(' {
                TokenData::LParen
            } else if ch == ')' {
                TokenData::RParen
            } else if ch == '[' {
                TokenData::LBracket
            } else if ch == ']' {
                TokenData::RBracket
            } else {
                self.scan_operator(ch, prev)?
            };

            let span = Span::new(start, self.cursor.position(), start_line, start_col);
            return Ok(Some(Token::new(data, span)));
        }
        Ok(None)
    }

    fn scan_number(&mut self, first: char) -> Result<TokenData, LexError> {
        let mut text = String::new();
        text.push(first);
        while self.cursor.has_more() {
            let ch = self.peek();
            if ch.is_ascii_digit() || ch == '.' {
                text.push(self.cursor.advance());
            } else {
                break;
            }
        }
        // The grammar doesn't distinguish malformed numbers from the parser's
        // job; an input like "1.2.3" parses as a float up to the first
        // failure and `parse` simply rejects it the same way the Go source's
        // `strconv.ParseFloat` does.
        text.parse::<f64>()
            .map(TokenData::Number)
            .map_err(|_| LexError::UnknownPunctuation { text })
    }

    fn scan_identifier(&mut self, first: char) -> Result<TokenData, LexError> {
        let mut text = String::new();
        text.push(first);
        while self.cursor.has_more() {
            let ch = self.peek();
            if ch.is_alphanumeric() || ch == '_' || ch == '.' {
                text.push(self.cursor.advance());
            } else {
                break;
            }
        }

        let upper = text.to_uppercase();
        if upper == "TRUE" {
            return Ok(TokenData::Bool(true));
        }
        if upper == "FALSE" {
            return Ok(TokenData::Bool(false));
        }
        if text.contains('.') {
            if text.ends_with('.') {
                return Err(LexError::TrailingDot {
                    kind: "selector",
                    text,
                });
            }
            let segments = text.split('.').map(str::to_owned).collect();
            return Ok(TokenData::Selector(segments));
        }
        Ok(TokenData::Variable(text))
    }

    fn scan_accessor(&mut self, first_dot: char) -> Result<TokenData, LexError> {
        let mut text = String::new();
        text.push(first_dot);
        while self.cursor.has_more() {
            let ch = self.peek();
            if ch.is_alphanumeric() || ch == '_' || ch == '.' {
                text.push(self.cursor.advance());
            } else {
                break;
            }
        }
        if text.ends_with('.') {
            return Err(LexError::TrailingDot {
                kind: "accessor",
                text,
            });
        }
        // Split on '.' and discard the leading empty segment produced by
        // the leading dot itself.
        let mut segments: Vec<String> = text.split('.').map(str::to_owned).collect();
        if !segments.is_empty() {
            segments.remove(0);
        }
        Ok(TokenData::Accessor(segments))
    }

    fn scan_string(&mut self, start: usize, line: u32, col: u32) -> Result<TokenData, LexError> {
        let mut text = String::new();
        loop {
            if !self.cursor.has_more() {
                return Err(LexError::UnterminatedString {
                    span: Span::new(start, self.cursor.position(), line, col),
                });
            }
            let ch = self.cursor.advance();
            if ch == '"' {
                return Ok(TokenData::Str(text));
            }
            text.push(ch);
        }
    }

    fn scan_char(&mut self, start: usize, line: u32, col: u32) -> Result<TokenData, LexError> {
        if !self.cursor.has_more() {
            return Err(LexError::MalformedChar {
                span: Span::new(start, self.cursor.position(), line, col),
            });
        }
        let value = self.cursor.advance();
        if !self.cursor.has_more() || self.cursor.advance() != '\'' {
            return Err(LexError::MalformedChar {
                span: Span::new(start, self.cursor.position(), line, col),
            });
        }
        Ok(TokenData::Char(value))
    }

    fn scan_operator(&mut self, first: char, prev: &SuccessorRule) -> Result<TokenData, LexError> {
        let mut text = String::new();
        text.push(first);
        while self.cursor.has_more() {
            let ch = self.peek();
            if is_operator_char(ch) {
                text.push(self.cursor.advance());
            } else {
                break;
            }
        }

        // The sole context-sensitive lexing decision: a bare `-` is `NEG`
        // rather than `SUB` exactly when the previous token's successor
        // rule permits a prefix negation here.
        if text == "-" && prev.allows(TokenKind::Neg) {
            return Ok(TokenData::Neg);
        }

        punctuation(&text).ok_or(LexError::UnknownPunctuation { text })
    }

    fn peek(&self) -> char {
        self.cursor.peek()
    }
}

fn is_operator_char(ch: char) -> bool {
    !ch.is_whitespace()
        && !ch.is_alphanumeric()
        && ch != '('
        && ch != ')'
        && ch != '['
        && ch != ']'
}

fn punctuation(text: &str) -> Option<TokenData> {
    use TokenData::*;
    Some(match text {
        "!" => Not,
        "+" => Add,
        "-" => Sub,
        "*" => Mul,
        "/" => Quo,
        "%" => Rem,
        "&" => And,
        "|" => Or,
        "^" => Xor,
        "<<" => Shl,
        ">>" => Shr,
        "?" => TernaryIf,
        ":" => TernaryElse,
        "&&" => LAnd,
        "||" => LOr,
        "==" => Eq,
        "!=" => NotEq,
        "<" => Lt,
        ">" => Gt,
        "<=" => Leq,
        ">=" => Geq,
        _ => return None,
    })
}

/// Checks `(`/`)` and `[`/`]` counts balance. This is only a count check —
/// it does not enforce correct nesting order, so `(]` and `[)` both pass.
fn check_balance(tokens: &[Token]) -> Result<(), LexError> {
    let mut parens = 0i32;
    let mut brackets = 0i32;
    for token in tokens {
        match token.kind() {
            TokenKind::LParen => parens += 1,
            TokenKind::RParen => parens -= 1,
            TokenKind::LBracket => brackets += 1,
            TokenKind::RBracket => brackets -= 1,
            _ => {}
        }
    }
    if parens != 0 || brackets != 0 {
        return Err(LexError::Unbalanced);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::scan(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind())
            .collect()
    }

    #[test]
    fn scans_arithmetic_expression() {
        use TokenKind::*;
        assert_eq!(kinds("1 + 2 * 3"), vec![Number, Add, Number, Mul, Number]);
    }

    #[test]
    fn leading_minus_is_neg() {
        assert_eq!(kinds("-1")[0], TokenKind::Neg);
    }

    #[test]
    fn minus_after_value_is_sub() {
        assert_eq!(kinds("1 - 2")[1], TokenKind::Sub);
    }

    #[test]
    fn minus_after_operator_is_neg() {
        assert_eq!(kinds("1 + -2"), vec![
            TokenKind::Number,
            TokenKind::Add,
            TokenKind::Neg,
            TokenKind::Number
        ]);
    }

    #[test]
    fn dotted_identifier_is_selector() {
        let tokens = Lexer::scan("a.b.c").unwrap();
        assert_eq!(tokens.len(), 1);
        match &tokens[0].kind {
            TokenData::Selector(segs) => assert_eq!(segs, &["a", "b", "c"]),
            other => panic!("expected selector, got {other:?}"),
        }
    }

    #[test]
    fn leading_dot_is_accessor_without_empty_head() {
        let tokens = Lexer::scan(".a.b").unwrap();
        match &tokens[0].kind {
            TokenData::Accessor(segs) => assert_eq!(segs, &["a", "b"]),
            other => panic!("expected accessor, got {other:?}"),
        }
    }

    #[test]
    fn trailing_dot_selector_is_an_error() {
        assert!(matches!(
            Lexer::scan("a.b."),
            Err(LexError::TrailingDot { .. })
        ));
    }

    #[test]
    fn case_insensitive_bool_literals() {
        let tokens = Lexer::scan("TruE").unwrap();
        assert_eq!(tokens[0].kind, TokenData::Bool(true));
    }

    #[test]
    fn string_literal_has_no_escape_handling() {
        let tokens = Lexer::scan(r#""a\b""#).unwrap();
        assert_eq!(tokens[0].kind, TokenData::Str("a\\b".to_string()));
    }

    #[test]
    fn unterminated_string_is_an_error() {
        assert!(matches!(
            Lexer::scan("\"abc"),
            Err(LexError::UnterminatedString { .. })
        ));
    }

    #[test]
    fn char_literal_reads_one_code_point() {
        let tokens = Lexer::scan("'u'").unwrap();
        assert_eq!(tokens[0].kind, TokenData::Char('u'));
    }

    #[test]
    fn malformed_char_literal_is_an_error() {
        assert!(matches!(Lexer::scan("'ab'"), Err(LexError::MalformedChar { .. })));
    }

    #[test]
    fn unbalanced_parens_fail_compile() {
        assert!(matches!(Lexer::scan("(1 + 2"), Err(LexError::Unbalanced)));
    }

    #[test]
    fn mismatched_but_balanced_brackets_still_pass_lexing() {
        // The balance check only counts, it doesn't check nesting order.
        assert!(Lexer::scan("(]").is_ok());
        assert!(Lexer::scan("[)").is_ok());
    }

    #[test]
    fn unknown_punctuation_is_an_error() {
        assert!(matches!(
            Lexer::scan("1 @ 2"),
            Err(LexError::UnknownPunctuation { .. })
        ));
    }
}
