//! Defines `Position`, `Token` and `TokenKind`.
//!
//! These are the vocabulary shared between the `Lexer` and the `Parser`.
//! The parser never looks at raw characters, only at these values.

use std::fmt;

/// A location in the source text.
///
/// `line` is 1-indexed. `column` counts the characters consumed on the
/// current line, so the first character of a line sits at column 1 and a
/// freshly started line is at column 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// The 1-indexed line number.
    pub line: usize,
    /// The number of characters consumed on this line.
    pub column: usize,
}

impl Position {
    /// The position before any character has been consumed.
    pub const START: Position = Position { line: 1, column: 0 };

    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }

    /// Moves past `c`. A newline starts the next line at column 0.
    pub(crate) fn advance(&mut self, c: char) {
        self.column += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The specific kind of a `Token`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `{`
    CurlyOpen,
    /// `}`
    CurlyClose,
    /// `[`
    SquareOpen,
    /// `]`
    SquareClose,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `"`. String bodies are separate tokens between two quotes.
    Quote,
    /// A run made only of digits, `.` and `-`.
    Number,
    /// Exactly `true` or `false`.
    Boolean,
    /// Any other run of letters, digits and identifier symbols.
    Ident,
    /// A character that cannot start any token.
    Illegal,
    /// The input is exhausted.
    EndOfInput,
}

impl TokenKind {
    /// Whether this kind closes a container (`}` or `]`).
    pub fn is_closer(self) -> bool {
        matches!(self, TokenKind::CurlyClose | TokenKind::SquareClose)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::CurlyOpen => "'{'",
            TokenKind::CurlyClose => "'}'",
            TokenKind::SquareOpen => "'['",
            TokenKind::SquareClose => "']'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::Quote => "'\"'",
            TokenKind::Number => "number",
            TokenKind::Boolean => "boolean",
            TokenKind::Ident => "identifier",
            TokenKind::Illegal => "illegal character",
            TokenKind::EndOfInput => "end of input",
        };
        f.write_str(name)
    }
}

/// A single token produced by the `Lexer`.
///
/// `text` is the raw lexeme exactly as it appeared in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Where the token's first character is.
    pub position: Position,
    /// The type of the token.
    pub kind: TokenKind,
    /// The raw lexeme.
    pub text: String,
}

impl Token {
    pub fn new(position: Position, kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            position,
            kind,
            text: text.into(),
        }
    }

    /// The token returned once the input is exhausted.
    pub fn end_of_input(position: Position) -> Self {
        Token::new(position, TokenKind::EndOfInput, "")
    }
}
