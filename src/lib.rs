//! # json-tree
//!
//! `json-tree` is a small, lenient JSON tokenizer and recursive-descent
//! parser. It turns text into a tree of `Node`s where every node records
//! its source positions (line/column) and the range of tokens it was built
//! from.
//!
//! ## Key Features
//!
//! * **Two explicit stages:** `tokenize` produces the full token list, then
//!   `parse` builds the tree from it. Both are usable on their own.
//! * **Positions everywhere:** tokens carry their line and column, nodes
//!   carry a `Span` with start/end positions and token indices.
//! * **Lenient input:** bare (unquoted) strings and keys, trailing commas,
//!   several top-level values in one document, and malformed numerals
//!   (which decode to `0.0`) are all accepted.
//! * **Never panics on bad input:** running out of tokens is an ordinary
//!   result, every structural problem is a `ParseError` carrying the token
//!   index and position, and nesting depth is bounded.
//!
//! ## Quick Start
//!
//! ```
//! use json_tree::{parse, tokenize};
//!
//! let tokens = tokenize(r#"{ "name": "Babbage", "id": 1815 }"#);
//! let roots = parse(&tokens).unwrap();
//!
//! let id = roots[0].get("id").and_then(|n| n.as_f64());
//! assert_eq!(id, Some(1815.0));
//! ```
//!
//! String bodies are rebuilt from the tokens between two quotes and the
//! gaps between them. Spaces and line breaks come back as written, tabs
//! come back as spaces, and escape sequences are not interpreted.
//!
//! A bare value followed directly by a comma and another bare word lexes as
//! one run: `{a:b,c:d}` does not parse. Quote the value or put a space
//! before the comma (`{a: b , c: d}`).

/// Contains `ParseOptions` and the default limits.
pub mod config;
/// Contains the error types for every stage.
pub mod error;
/// Contains the `Lexer` and the `tokenize` functions.
pub mod lexer;
/// Contains the `Node` tree and its `Span`.
pub mod node;
/// Contains the recursive-descent `Parser`.
pub mod parser;
/// Contains the `CharSource` trait and its string/reader implementations.
pub mod source;
/// Contains `Position`, `Token` and `TokenKind`.
pub mod token;

pub use config::{ParseOptions, DEFAULT_MAX_DEPTH, MAX_INPUT_BYTES};
pub use error::{Error, LexError, ParseError, Result};
pub use lexer::{tokenize, tokenize_reader, Lexer};
pub use node::{Node, NodeKind, Span};
pub use parser::{parse, parse_with_options, Parsed, Parser};
pub use token::{Position, Token, TokenKind};

use std::io::Read;
use tracing::debug;

/// Tokenizes and parses a string slice with the default options.
///
/// # Errors
/// Returns `Error::InputTooLarge` if the input exceeds `MAX_INPUT_BYTES`
/// (10MB) *before* tokenizing begins, or `Error::Parse` for any structural
/// problem.
///
/// # Examples
/// ```
/// use json_tree::parse_str;
///
/// let roots = parse_str("[1, 2, 3]").unwrap();
/// let values: Vec<f64> = roots[0]
///     .as_array()
///     .unwrap()
///     .iter()
///     .filter_map(|n| n.as_f64())
///     .collect();
/// assert_eq!(values, vec![1.0, 2.0, 3.0]);
/// ```
pub fn parse_str(input: &str) -> Result<Vec<Node>> {
    parse_str_with_options(input, &ParseOptions::default())
}

/// Like `parse_str`, with explicit limits.
pub fn parse_str_with_options(input: &str, options: &ParseOptions) -> Result<Vec<Node>> {
    if input.len() > options.max_input_bytes {
        return Err(Error::InputTooLarge {
            size: input.len(),
            limit: options.max_input_bytes,
        });
    }
    let tokens = tokenize(input);
    debug!(bytes = input.len(), tokens = tokens.len(), "tokenized");
    Ok(parse_with_options(&tokens, options)?)
}

/// Tokenizes and parses everything `reader` yields.
///
/// # Errors
/// Returns `Error::Lex` if reading fails or the bytes are not valid UTF-8,
/// or `Error::Parse` for any structural problem.
pub fn parse_reader<R: Read>(reader: R) -> Result<Vec<Node>> {
    parse_reader_with_options(reader, &ParseOptions::default())
}

/// Like `parse_reader`, with explicit limits.
pub fn parse_reader_with_options<R: Read>(reader: R, options: &ParseOptions) -> Result<Vec<Node>> {
    let tokens = tokenize_reader(reader)?;
    debug!(tokens = tokens.len(), "tokenized reader");
    Ok(parse_with_options(&tokens, options)?)
}
