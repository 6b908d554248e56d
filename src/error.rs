//! Error types for the lexer, the parser, and the convenience entry points.
//!
//! Every parser error records the token index and source position where it
//! was detected, which is what a caller needs to point at the bad input.

use crate::token::{Position, TokenKind};
use std::io;
use thiserror::Error;

/// Failure of the character source feeding the `Lexer`.
#[derive(Debug, Error)]
pub enum LexError {
    /// The underlying reader failed or produced invalid UTF-8.
    #[error("failed to read input at {position}: {source}")]
    Stream {
        #[source]
        source: io::Error,
        position: Position,
    },
}

/// A fatal condition met while building the tree.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("unterminated string starting at {position} (token {index})")]
    UnterminatedString { index: usize, position: Position },

    #[error("expected {expected} but found {found} at {position} (token {index})")]
    UnexpectedBracket {
        expected: TokenKind,
        found: TokenKind,
        index: usize,
        position: Position,
    },

    #[error("expected closing {expected} but found {found} at {position} (token {index})")]
    UnexpectedCloser {
        expected: TokenKind,
        found: TokenKind,
        index: usize,
        position: Position,
    },

    #[error("expected string key at {position} (token {index})")]
    InvalidObjectKey { index: usize, position: Position },

    #[error("unexpected end of input at {position} (token {index})")]
    PrematureEndOfInput { index: usize, position: Position },

    #[error("unexpected {found} at {position} (token {index}), expected a value")]
    UnexpectedToken {
        found: TokenKind,
        index: usize,
        position: Position,
    },

    #[error("maximum nesting depth of {limit} exceeded at {position} (token {index})")]
    MaxDepthExceeded {
        limit: usize,
        index: usize,
        position: Position,
    },
}

impl ParseError {
    /// The index of the token at which the error was detected.
    pub fn token_index(&self) -> usize {
        match self {
            ParseError::UnterminatedString { index, .. }
            | ParseError::UnexpectedBracket { index, .. }
            | ParseError::UnexpectedCloser { index, .. }
            | ParseError::InvalidObjectKey { index, .. }
            | ParseError::PrematureEndOfInput { index, .. }
            | ParseError::UnexpectedToken { index, .. }
            | ParseError::MaxDepthExceeded { index, .. } => *index,
        }
    }

    /// The source position at which the error was detected.
    pub fn position(&self) -> Position {
        match self {
            ParseError::UnterminatedString { position, .. }
            | ParseError::UnexpectedBracket { position, .. }
            | ParseError::UnexpectedCloser { position, .. }
            | ParseError::InvalidObjectKey { position, .. }
            | ParseError::PrematureEndOfInput { position, .. }
            | ParseError::UnexpectedToken { position, .. }
            | ParseError::MaxDepthExceeded { position, .. } => *position,
        }
    }

    /// True when the input ran out inside an array or object.
    pub fn is_premature_end(&self) -> bool {
        matches!(self, ParseError::PrematureEndOfInput { .. })
    }
}

/// Errors returned by `parse_str` and `parse_reader`.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("input of {size} bytes exceeds the limit of {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },
}

pub type LexResult<T> = std::result::Result<T, LexError>;

pub type ParseResult<T> = std::result::Result<T, ParseError>;

pub type Result<T> = std::result::Result<T, Error>;
