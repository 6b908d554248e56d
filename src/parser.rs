//! Contains the recursive-descent `Parser`.
//!
//! The parser walks a token slice with a single forward cursor. All reads
//! go through `kind`/`text`/`position`, which report `EndOfInput` once the
//! cursor is past the last token, and all movement goes through `advance`,
//! which never moves past the end. Running out of tokens is therefore an
//! ordinary result (`Parsed::EndOfInput`), never an out-of-range access.

use crate::config::ParseOptions;
use crate::error::{ParseError, ParseResult};
use crate::node::{Node, NodeKind, Span};
use crate::token::{Position, Token, TokenKind};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// The outcome of one `parse_value` step.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    /// A complete value.
    Node(Node),
    /// The tokens ran out before a value started.
    EndOfInput,
}

/// The recursive-descent parser.
pub struct Parser<'t> {
    tokens: &'t [Token],
    /// Index of the current token. Never exceeds `tokens.len()`.
    cursor: usize,
    /// How many containers are currently open.
    depth: usize,
    max_depth: usize,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Parser::with_options(tokens, &ParseOptions::default())
    }

    pub fn with_options(tokens: &'t [Token], options: &ParseOptions) -> Self {
        Parser {
            tokens,
            cursor: 0,
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    // --- Cursor ---

    fn kind(&self) -> TokenKind {
        self.tokens
            .get(self.cursor)
            .map_or(TokenKind::EndOfInput, |t| t.kind)
    }

    fn text(&self) -> &'t str {
        self.tokens.get(self.cursor).map_or("", |t| t.text.as_str())
    }

    /// Position of the current token, or of the last token once past the end.
    fn position(&self) -> Position {
        self.tokens
            .get(self.cursor)
            .or_else(|| self.tokens.last())
            .map_or(Position::START, |t| t.position)
    }

    fn advance(&mut self) {
        if self.cursor < self.tokens.len() {
            self.cursor += 1;
        }
    }

    /// The span of the current token alone.
    fn single_span(&self) -> Span {
        let position = self.position();
        Span {
            start: position,
            end: position,
            token_start: self.cursor,
            token_end: self.cursor,
        }
    }

    // --- Errors ---

    fn premature_end(&self) -> ParseError {
        ParseError::PrematureEndOfInput {
            index: self.cursor,
            position: self.position(),
        }
    }

    fn unexpected(&self, found: TokenKind) -> ParseError {
        ParseError::UnexpectedToken {
            found,
            index: self.cursor,
            position: self.position(),
        }
    }

    fn expect_opener(&self, expected: TokenKind) -> ParseResult<()> {
        let found = self.kind();
        if found != expected {
            return Err(ParseError::UnexpectedBracket {
                expected,
                found,
                index: self.cursor,
                position: self.position(),
            });
        }
        Ok(())
    }

    fn expect_closer(&self, expected: TokenKind) -> ParseResult<()> {
        let found = self.kind();
        if found != expected {
            return Err(ParseError::UnexpectedCloser {
                expected,
                found,
                index: self.cursor,
                position: self.position(),
            });
        }
        Ok(())
    }

    /// Opens a container, enforcing the nesting limit.
    fn enter(&mut self) -> ParseResult<()> {
        if self.depth >= self.max_depth {
            return Err(ParseError::MaxDepthExceeded {
                limit: self.max_depth,
                index: self.cursor,
                position: self.position(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    // --- Grammar ---

    /// Parses the next value.
    ///
    /// Colons and commas at a value position are skipped. Stray closing
    /// brackets are skipped only at the top level; inside a container the
    /// container consumes its own closer, so meeting one here is an error.
    pub fn parse_value(&mut self) -> ParseResult<Parsed> {
        loop {
            match self.kind() {
                TokenKind::CurlyOpen => return self.parse_object().map(Parsed::Node),
                TokenKind::SquareOpen => return self.parse_array().map(Parsed::Node),
                TokenKind::Quote | TokenKind::Ident => {
                    return self.parse_string().map(Parsed::Node)
                }
                TokenKind::Boolean => return Ok(Parsed::Node(self.parse_boolean())),
                TokenKind::Number => return Ok(Parsed::Node(self.parse_number())),
                TokenKind::Colon | TokenKind::Comma => self.advance(),
                kind if kind.is_closer() && self.depth == 0 => {
                    trace!(index = self.cursor, ?kind, "skipping stray closer");
                    self.advance();
                }
                TokenKind::EndOfInput => return Ok(Parsed::EndOfInput),
                found => return Err(self.unexpected(found)),
            }
        }
    }

    /// Parses a quoted string, or a bare identifier used as a string.
    fn parse_string(&mut self) -> ParseResult<Node> {
        if self.kind() == TokenKind::Ident {
            let span = self.single_span();
            let value = self.text().to_string();
            self.advance();
            return Ok(Node::new(NodeKind::String(value), span));
        }

        let open_index = self.cursor;
        let open_position = self.position();
        self.advance(); // Skip the opening quote

        let token_start = self.cursor;
        let start = self.position();
        let mut value = String::new();
        // Last character of the previous token, starting with the opening quote.
        let mut last = open_position;

        loop {
            match self.kind() {
                TokenKind::Quote => break,
                TokenKind::EndOfInput => {
                    return Err(ParseError::UnterminatedString {
                        index: open_index,
                        position: open_position,
                    })
                }
                _ => {
                    let position = self.position();
                    let text = self.text();
                    push_gap(&mut value, last, position);
                    value.push_str(text);
                    last = Position::new(
                        position.line,
                        position.column + text.chars().count().saturating_sub(1),
                    );
                    self.advance();
                }
            }
        }
        push_gap(&mut value, last, self.position());

        let span = Span {
            start,
            end: self.position(),
            token_start,
            token_end: self.cursor,
        };
        self.advance(); // Skip the closing quote
        Ok(Node::new(NodeKind::String(value), span))
    }

    /// Parses a number token. A separator after it is left to the enclosing
    /// container. Numerals that do not parse as `f64` become `0.0`.
    fn parse_number(&mut self) -> Node {
        let span = self.single_span();
        let text = self.text();
        let value = text.parse::<f64>().unwrap_or_else(|_| {
            debug!(numeral = text, index = span.token_start, "malformed numeral, using 0.0");
            0.0
        });
        self.advance();
        Node::new(NodeKind::Number(value), span)
    }

    /// Parses a boolean token, keeping its literal text.
    fn parse_boolean(&mut self) -> Node {
        let span = self.single_span();
        let text = self.text().to_string();
        self.advance();
        Node::new(NodeKind::Boolean(text), span)
    }

    fn parse_array(&mut self) -> ParseResult<Node> {
        self.expect_opener(TokenKind::SquareOpen)?;
        self.enter()?;
        trace!(index = self.cursor, depth = self.depth, "array");
        self.advance(); // Skip '['

        let token_start = self.cursor;
        let start = self.position();
        let mut elements = Vec::new();

        while !self.kind().is_closer() {
            match self.parse_value()? {
                Parsed::Node(node) => elements.push(node),
                Parsed::EndOfInput => return Err(self.premature_end()),
            }
            if self.kind() == TokenKind::Comma {
                self.advance();
            }
        }

        self.expect_closer(TokenKind::SquareClose)?;
        let span = Span {
            start,
            end: self.position(),
            token_start,
            token_end: self.cursor,
        };
        self.advance(); // Skip ']'
        self.leave();
        Ok(Node::new(NodeKind::Array(elements), span))
    }

    fn parse_object(&mut self) -> ParseResult<Node> {
        self.expect_opener(TokenKind::CurlyOpen)?;
        self.enter()?;
        trace!(index = self.cursor, depth = self.depth, "object");
        self.advance(); // Skip '{'

        let token_start = self.cursor;
        let start = self.position();
        let mut members = BTreeMap::new();

        while !self.kind().is_closer() {
            let key = match self.parse_value()? {
                Parsed::Node(node) => node,
                Parsed::EndOfInput => return Err(self.premature_end()),
            };
            let value = match self.parse_value()? {
                Parsed::Node(node) => node,
                Parsed::EndOfInput => return Err(self.premature_end()),
            };

            let name = match key.kind {
                NodeKind::String(name) => name,
                _ => {
                    return Err(ParseError::InvalidObjectKey {
                        index: key.span.token_start,
                        position: key.span.start,
                    })
                }
            };
            members.insert(name, value);

            if self.kind() == TokenKind::Comma {
                self.advance();
            }
        }

        self.expect_closer(TokenKind::CurlyClose)?;
        let span = Span {
            start,
            end: self.position(),
            token_start,
            token_end: self.cursor,
        };
        self.advance(); // Skip '}'
        self.leave();
        Ok(Node::new(NodeKind::Object(members), span))
    }

    /// Parses values until the tokens run out, returning every root value.
    pub fn parse_all(mut self) -> ParseResult<Vec<Node>> {
        let mut roots = Vec::new();
        loop {
            match self.parse_value() {
                Ok(Parsed::Node(node)) => roots.push(node),
                Ok(Parsed::EndOfInput) => break,
                Err(e) => {
                    debug!(error = %e, "parse failed");
                    return Err(e);
                }
            }
        }
        debug!(roots = roots.len(), tokens = self.tokens.len(), "parsed");
        Ok(roots)
    }
}

/// Restores the whitespace the lexer dropped between a token ending at
/// `last` and one starting at `next`. Every skipped character on a line
/// comes back as a space and every line break as `\n`.
fn push_gap(value: &mut String, last: Position, next: Position) {
    if next.line == last.line {
        let spaces = next.column.saturating_sub(last.column + 1);
        value.extend(std::iter::repeat(' ').take(spaces));
    } else {
        let breaks = next.line.saturating_sub(last.line);
        value.extend(std::iter::repeat('\n').take(breaks));
        value.extend(std::iter::repeat(' ').take(next.column.saturating_sub(1)));
    }
}

/// Parses a token sequence with the default options.
pub fn parse(tokens: &[Token]) -> ParseResult<Vec<Node>> {
    Parser::new(tokens).parse_all()
}

/// Parses a token sequence with explicit limits.
pub fn parse_with_options(tokens: &[Token], options: &ParseOptions) -> ParseResult<Vec<Node>> {
    Parser::with_options(tokens, options).parse_all()
}
