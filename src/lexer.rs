//! The lexer: turns a stream of characters into `Token`s.
//!
//! Structural characters become single-character tokens. Everything made
//! of letters, digits and the identifier symbols `. - _ $ + ! ( )` is read
//! greedily as one run and then classified as a `Number`, a `Boolean` or a
//! plain `Ident`. String bodies are not special here: a quote is its own
//! token and the parser stitches the body back together.

use crate::error::{LexError, LexResult};
use crate::source::{CharSource, ReaderSource, StrSource};
use crate::token::{Position, Token, TokenKind};
use std::collections::VecDeque;
use std::io::{self, Read};
use tracing::trace;

#[inline]
fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

#[inline]
fn is_ident_symbol(c: char) -> bool {
    matches!(c, '.' | '-' | '_' | '$' | '+' | '!' | '(' | ')')
}

/// Characters that may appear anywhere in a run.
#[inline]
fn is_run_char(c: char) -> bool {
    c.is_alphanumeric() || is_ident_symbol(c)
}

#[inline]
fn is_numeral_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == '-'
}

/// Decides what a run is. `all_numeral` is tracked by the caller as the run
/// grows, so this never rescans the run.
fn classify(run: &str, all_numeral: bool) -> TokenKind {
    if run.len() <= 5 && (run == "true" || run == "false") {
        TokenKind::Boolean
    } else if all_numeral {
        TokenKind::Number
    } else {
        TokenKind::Ident
    }
}

/// The lexer.
///
/// It owns its character source and its position, and keeps at most two
/// characters of lookahead: a comma inside a run can only be judged by the
/// character after it.
pub struct Lexer<S: CharSource> {
    source: S,
    lookahead: VecDeque<char>,
    /// Position of the last consumed character.
    position: Position,
    /// Set once the source is exhausted; from then on only `EndOfInput` comes out.
    exhausted: bool,
    /// Set once the iterator has handed out `EndOfInput` or an error.
    done: bool,
}

impl<'a> Lexer<StrSource<'a>> {
    /// Creates a lexer over a string slice.
    pub fn new(input: &'a str) -> Self {
        Lexer::with_source(StrSource::new(input))
    }
}

impl<R: Read> Lexer<ReaderSource<R>> {
    /// Creates a lexer decoding UTF-8 from `reader`.
    pub fn from_reader(reader: R) -> Self {
        Lexer::with_source(ReaderSource::new(reader))
    }
}

impl<S: CharSource> Lexer<S> {
    pub fn with_source(source: S) -> Self {
        Lexer {
            source,
            lookahead: VecDeque::with_capacity(2),
            position: Position::START,
            exhausted: false,
            done: false,
        }
    }

    /// The position of the last consumed character.
    pub fn position(&self) -> Position {
        self.position
    }

    fn stream_error(&self, source: io::Error) -> LexError {
        LexError::Stream {
            source,
            position: self.position,
        }
    }

    /// Looks `n` characters ahead without consuming anything.
    fn peek_nth(&mut self, n: usize) -> LexResult<Option<char>> {
        while self.lookahead.len() <= n {
            match self.source.next_char() {
                Ok(Some(c)) => self.lookahead.push_back(c),
                Ok(None) => return Ok(None),
                Err(e) => return Err(self.stream_error(e)),
            }
        }
        Ok(self.lookahead.get(n).copied())
    }

    /// Consumes one character and moves the position past it.
    fn bump(&mut self) -> LexResult<Option<char>> {
        let next = match self.lookahead.pop_front() {
            Some(c) => Some(c),
            None => self
                .source
                .next_char()
                .map_err(|e| self.stream_error(e))?,
        };
        if let Some(c) = next {
            self.position.advance(c);
        }
        Ok(next)
    }

    /// Reads the next token.
    ///
    /// Returns `EndOfInput` once the source is exhausted, and keeps returning
    /// it on every later call. A failing source is reported immediately.
    pub fn next_token(&mut self) -> LexResult<Token> {
        if self.exhausted {
            return Ok(Token::end_of_input(self.position));
        }

        loop {
            let c = match self.bump()? {
                Some(c) => c,
                None => {
                    self.exhausted = true;
                    trace!(position = %self.position, "end of input");
                    return Ok(Token::end_of_input(self.position));
                }
            };

            let kind = match c {
                c if is_whitespace(c) => continue,
                '{' => TokenKind::CurlyOpen,
                '}' => TokenKind::CurlyClose,
                '[' => TokenKind::SquareOpen,
                ']' => TokenKind::SquareClose,
                ':' => TokenKind::Colon,
                ',' => TokenKind::Comma,
                '"' => TokenKind::Quote,
                c if is_run_char(c) => return self.lex_run(c),
                _ => TokenKind::Illegal,
            };

            let token = Token::new(self.position, kind, c);
            trace!(kind = ?token.kind, position = %token.position, "token");
            return Ok(token);
        }
    }

    /// Scans the rest of a run whose first character was `first`.
    fn lex_run(&mut self, first: char) -> LexResult<Token> {
        let start = self.position;
        let mut run = String::from(first);
        let mut all_numeral = is_numeral_char(first);

        loop {
            let next = match self.peek_nth(0)? {
                Some(c) => c,
                None => break,
            };

            let joins = is_run_char(next)
                || (next == ',' && self.comma_continues_run(classify(&run, all_numeral))?);
            if !joins {
                break;
            }
            self.bump()?;
            run.push(next);
            all_numeral &= is_numeral_char(next);
        }

        let token = Token::new(start, classify(&run, all_numeral), run);
        trace!(kind = ?token.kind, text = %token.text, position = %token.position, "run");
        Ok(token)
    }

    /// Whether the comma waiting in the lookahead belongs to the run scanned
    /// so far, currently classified as `kind`.
    ///
    /// It does when it sits inside free text: the run so far is not already a
    /// complete number or boolean, and the comma is followed by whitespace,
    /// a letter or a digit. Otherwise it separates members or elements.
    fn comma_continues_run(&mut self, kind: TokenKind) -> LexResult<bool> {
        if kind != TokenKind::Ident {
            return Ok(false);
        }
        Ok(matches!(
            self.peek_nth(1)?,
            Some(c) if is_whitespace(c) || c.is_alphanumeric()
        ))
    }
}

impl<S: CharSource> Iterator for Lexer<S> {
    type Item = LexResult<Token>;

    /// Yields every token up to and including `EndOfInput`, then `None`.
    /// Iteration also stops after a stream error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.next_token();
        match &result {
            Ok(token) if token.kind == TokenKind::EndOfInput => self.done = true,
            Err(_) => self.done = true,
            Ok(_) => {}
        }
        Some(result)
    }
}

/// Tokenizes a string slice. The last token is always `EndOfInput`.
pub fn tokenize(input: &str) -> Vec<Token> {
    // A `StrSource` cannot fail, so every item is `Ok`.
    Lexer::new(input).map_while(Result::ok).collect()
}

/// Tokenizes everything `reader` yields. The last token is always
/// `EndOfInput`; a read or decoding failure aborts with `LexError::Stream`.
pub fn tokenize_reader<R: Read>(reader: R) -> LexResult<Vec<Token>> {
    Lexer::from_reader(reader).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper to collect tokens into just their kinds for easy comparison
    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    fn texts(input: &str) -> Vec<String> {
        tokenize(input).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_lexer_structurals() {
        use TokenKind::*;
        assert_eq!(
            kinds("{}[]:,\""),
            vec![CurlyOpen, CurlyClose, SquareOpen, SquareClose, Colon, Comma, Quote, EndOfInput]
        );
    }

    #[test]
    fn test_lexer_empty_input() {
        let tokens = tokenize("");
        assert_eq!(tokens, vec![Token::end_of_input(Position::START)]);
        assert_eq!(kinds(" \n\t\r "), vec![TokenKind::EndOfInput]);
    }

    #[test]
    fn test_lexer_run_classification() {
        use TokenKind::*;
        assert_eq!(
            kinds("123 -0.5 true false abc1 truex 1e5 ."),
            vec![Number, Number, Boolean, Boolean, Ident, Ident, Ident, Number, EndOfInput]
        );
        assert_eq!(texts("-0.5 $x_y(1)!"), vec!["-0.5", "$x_y(1)!", ""]);
    }

    #[test]
    fn test_lexer_positions() {
        let tokens = tokenize("{\n  \"ab\": 12\n}");
        let positions: Vec<(TokenKind, usize, usize)> = tokens
            .iter()
            .map(|t| (t.kind, t.position.line, t.position.column))
            .collect();
        assert_eq!(
            positions,
            vec![
                (TokenKind::CurlyOpen, 1, 1),
                (TokenKind::Quote, 2, 3),
                (TokenKind::Ident, 2, 4),
                (TokenKind::Quote, 2, 6),
                (TokenKind::Colon, 2, 7),
                (TokenKind::Number, 2, 9),
                (TokenKind::CurlyClose, 3, 1),
                (TokenKind::EndOfInput, 3, 1),
            ]
        );
    }

    #[test]
    fn test_lexer_separating_commas() {
        use TokenKind::*;
        assert_eq!(
            kinds("[1,2,3]"),
            vec![SquareOpen, Number, Comma, Number, Comma, Number, SquareClose, EndOfInput]
        );
        assert_eq!(
            kinds("[true, false]"),
            vec![SquareOpen, Boolean, Comma, Boolean, SquareClose, EndOfInput]
        );
        assert_eq!(
            texts("\"a\",\"b\""),
            vec!["\"", "a", "\"", ",", "\"", "b", "\"", ""]
        );
    }

    #[test]
    fn test_lexer_interior_commas() {
        // Comma followed by a space or a letter stays inside free text.
        assert_eq!(texts("hello, world"), vec!["hello,", "world", ""]);
        assert_eq!(texts("a,b,c"), vec!["a,b,c", ""]);
        // Comma followed by anything else ends the run.
        assert_eq!(texts("abc,\"x\""), vec!["abc", ",", "\"", "x", "\"", ""]);
        assert_eq!(texts("abc,"), vec!["abc", ",", ""]);
        // Comma position is reported where it sits.
        let tokens = tokenize("ab,]");
        assert_eq!(tokens[1].kind, TokenKind::Comma);
        assert_eq!(tokens[1].position, Position::new(1, 3));
    }

    #[test]
    fn test_lexer_illegal() {
        let tokens = tokenize("[1, &]");
        assert_eq!(tokens[3].kind, TokenKind::Illegal);
        assert_eq!(tokens[3].text, "&");
        assert_eq!(tokens[3].position, Position::new(1, 5));
        assert_eq!(kinds("/"), vec![TokenKind::Illegal, TokenKind::EndOfInput]);
    }

    #[test]
    fn test_lexer_whitespace_skipping() {
        let compact: Vec<_> = kinds("{\"a\":1}");
        let spaced: Vec<_> = kinds(" { \"a\" : 1 } ");
        assert_eq!(compact, spaced);
    }

    #[test]
    fn test_lexer_is_fused() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Ident);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EndOfInput);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EndOfInput);

        let mut lexer = Lexer::new("x");
        assert!(lexer.next().is_some());
        assert!(lexer.next().is_some());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_lexer_position_tracks_consumed_chars() {
        let mut lexer = Lexer::new("[ab,\n 1]");
        assert_eq!(lexer.position(), Position::START);

        lexer.next_token().unwrap(); // '['
        assert_eq!(lexer.position(), Position::new(1, 1));

        // The comma joins the run; the newline after it is only peeked.
        let run = lexer.next_token().unwrap();
        assert_eq!(run.text, "ab,");
        assert_eq!(lexer.position(), Position::new(1, 4));

        let number = lexer.next_token().unwrap();
        assert_eq!(number.position, Position::new(2, 2));
        assert_eq!(lexer.position(), Position::new(2, 2));

        lexer.next_token().unwrap(); // ']'
        assert_eq!(lexer.next_token().unwrap().position, Position::new(2, 3));
    }

    #[test]
    fn test_lexer_long_run_with_many_commas() {
        // Each interior comma is judged without rescanning the run.
        let n = 400_000;
        let input = "1".repeat(n) + "a" + &",a".repeat(n / 2);
        let tokens = tokenize(&input);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].text.len(), input.len());

        let numeral = "7".repeat(n);
        let tokens = tokenize(&(numeral.clone() + ",1"));
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].text, numeral);
        assert_eq!(tokens[1].kind, TokenKind::Comma);
    }

    #[test]
    fn test_tokenize_reader_matches_str() {
        let input = "{\"name\": \"Ada, Countess\", \"born\": 1815, \"ok\": true}";
        let from_reader = tokenize_reader(input.as_bytes()).unwrap();
        assert_eq!(from_reader, tokenize(input));
    }

    #[test]
    fn test_tokenize_reader_stream_error() {
        let bytes: &[u8] = &[b'[', b'1', 0xFF];
        let err = tokenize_reader(bytes).unwrap_err();
        let LexError::Stream { source, position } = err;
        assert_eq!(source.kind(), io::ErrorKind::InvalidData);
        assert_eq!(position, Position::new(1, 2));
    }
}
