//! Character sources for the `Lexer`.
//!
//! The lexer pulls one `char` at a time through the `CharSource` trait, so
//! the same scanning code runs over an in-memory `&str` and over any
//! `io::Read`. Only the reader-backed source can fail.

use std::io::{self, BufReader, Read};
use std::str::{self, Chars};

/// A fallible stream of characters.
pub trait CharSource {
    /// Returns the next character, `Ok(None)` once the input is exhausted.
    fn next_char(&mut self) -> io::Result<Option<char>>;
}

/// A source over a string slice. Never fails.
pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    pub fn new(input: &'a str) -> Self {
        StrSource {
            chars: input.chars(),
        }
    }
}

impl CharSource for StrSource<'_> {
    #[inline]
    fn next_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.chars.next())
    }
}

/// A source decoding UTF-8 from a buffered reader.
///
/// Invalid or truncated UTF-8 sequences are reported as
/// `io::ErrorKind::InvalidData`.
pub struct ReaderSource<R: Read> {
    inner: BufReader<R>,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        ReaderSource {
            inner: BufReader::new(reader),
        }
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

/// The length of the UTF-8 sequence introduced by `lead`, 0 if `lead`
/// cannot start a sequence.
fn sequence_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

fn invalid_utf8(message: &'static str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

impl<R: Read> CharSource for ReaderSource<R> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        let lead = match self.read_byte()? {
            Some(b) => b,
            None => return Ok(None),
        };

        let len = sequence_len(lead);
        if len == 0 {
            return Err(invalid_utf8("invalid UTF-8 lead byte"));
        }

        let mut buf = [lead, 0, 0, 0];
        for slot in buf.iter_mut().take(len).skip(1) {
            *slot = self
                .read_byte()?
                .ok_or_else(|| invalid_utf8("truncated UTF-8 sequence"))?;
        }

        let decoded = str::from_utf8(&buf[..len]).map_err(|_| invalid_utf8("invalid UTF-8 sequence"))?;
        Ok(decoded.chars().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<S: CharSource>(mut source: S) -> io::Result<String> {
        let mut out = String::new();
        while let Some(c) = source.next_char()? {
            out.push(c);
        }
        Ok(out)
    }

    #[test]
    fn test_str_source() {
        assert_eq!(drain(StrSource::new("a{é}")).unwrap(), "a{é}");
        assert_eq!(drain(StrSource::new("")).unwrap(), "");
    }

    #[test]
    fn test_reader_source_multibyte() {
        let input = "x: \"héllo ✓ 𝄞\"";
        assert_eq!(drain(ReaderSource::new(input.as_bytes())).unwrap(), input);
    }

    #[test]
    fn test_reader_source_invalid_lead() {
        let bytes: &[u8] = &[b'[', 0xFF, b']'];
        let err = drain(ReaderSource::new(bytes)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert_eq!(err.to_string(), "invalid UTF-8 lead byte");
    }

    #[test]
    fn test_reader_source_truncated() {
        let bytes: &[u8] = &[b'a', 0xE2, 0x9C];
        let err = drain(ReaderSource::new(bytes)).unwrap_err();
        assert_eq!(err.to_string(), "truncated UTF-8 sequence");
    }

    #[test]
    fn test_reader_source_bad_continuation() {
        let bytes: &[u8] = &[0xC3, b'a'];
        let err = drain(ReaderSource::new(bytes)).unwrap_err();
        assert_eq!(err.to_string(), "invalid UTF-8 sequence");
    }
}
