//! Hand-written raw scanner producing `(RawTag, len)` pairs.
//!
//! The scanner operates on a sentinel-terminated [`Cursor`] and produces
//! [`RawToken`] values with zero heap allocation. Each lexical context a
//! batch splitter must respect (string literal, bracketed identifier, line
//! comment, block comment) is scanned as a single token, so no separator
//! keyword can ever be seen inside one.
//!
//! # Design
//!
//! Main dispatch covers all 256 byte values. Each arm calls a focused method
//! that advances the cursor and returns `RawToken { tag, len }`. The sentinel
//! byte (`0x00`) naturally dispatches to `eof()`. Malformed input never fails:
//! an unclosed context becomes an `Unterminated*` token ending at EOF.

use crate::cursor::Cursor;
use crate::tag::{RawTag, RawToken};

/// Pure, allocation-free scanner.
///
/// Produces one token at a time as a `(tag, length)` pair.
/// Unterminated contexts are encoded as `RawTag` variants, not as `Result::Err`.
pub struct RawScanner<'a> {
    cursor: Cursor<'a>,
}

impl<'a> RawScanner<'a> {
    /// Create a new scanner from a cursor.
    pub fn new(cursor: Cursor<'a>) -> Self {
        Self { cursor }
    }

    /// Byte offset of the next token.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.cursor.pos()
    }

    /// Produce the next raw token.
    ///
    /// Returns `RawTag::Eof` with `len == 0` when the script is exhausted.
    /// Subsequent calls after EOF continue to return `Eof`.
    #[inline]
    pub fn next_token(&mut self) -> RawToken {
        let start = self.cursor.pos();
        match self.cursor.current() {
            0 => self.eof(start),
            b' ' | b'\t' | 0x0B | 0x0C => self.whitespace(start),
            b'\r' => self.carriage_return(start),
            b'\n' => self.single(start, RawTag::Newline),
            b'\'' => self.string(start),
            b'[' => self.bracket_ident(start),
            b'-' => self.minus_or_comment(start),
            b'/' => self.slash_or_comment(start),
            b';' => self.single(start, RawTag::Semicolon),
            b if is_word_byte(b) => self.word(start),
            _ => self.single(start, RawTag::Punct),
        }
    }

    // ─── EOF ───────────────────────────────────────────────────────

    fn eof(&mut self, start: u32) -> RawToken {
        if self.cursor.is_eof() {
            RawToken {
                tag: RawTag::Eof,
                len: 0,
            }
        } else {
            // Interior null byte: ordinary script content.
            self.single(start, RawTag::InteriorNull)
        }
    }

    // ─── Whitespace & Newlines ─────────────────────────────────────

    #[inline]
    fn whitespace(&mut self, start: u32) -> RawToken {
        self.cursor.eat_whitespace();
        self.token(start, RawTag::Whitespace)
    }

    fn carriage_return(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume '\r'
        if self.cursor.current() == b'\n' {
            // CRLF normalization: \r\n -> single Newline with len=2
            self.cursor.advance();
            self.token(start, RawTag::Newline)
        } else {
            // Lone \r: horizontal whitespace
            self.token(start, RawTag::Whitespace)
        }
    }

    // ─── Words & Punctuation ───────────────────────────────────────

    #[inline]
    fn word(&mut self, start: u32) -> RawToken {
        self.cursor.eat_while(is_word_byte);
        self.token(start, RawTag::Word)
    }

    /// Single-byte token: advance one byte and emit the given tag.
    fn single(&mut self, start: u32, tag: RawTag) -> RawToken {
        self.cursor.advance();
        self.token(start, tag)
    }

    // ─── Comments ──────────────────────────────────────────────────

    fn minus_or_comment(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume first '-'
        if self.cursor.current() == b'-' {
            self.cursor.advance(); // consume second '-'
            self.cursor.eat_until_newline_or_eof();
            self.token(start, RawTag::LineComment)
        } else {
            self.token(start, RawTag::Punct)
        }
    }

    fn slash_or_comment(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume '/'
        if self.cursor.current() != b'*' {
            return self.token(start, RawTag::Punct);
        }
        self.cursor.advance(); // consume '*'
        loop {
            if !self.cursor.skip_to(b'*') {
                return self.token(start, RawTag::UnterminatedBlockComment);
            }
            self.cursor.advance(); // consume '*'
            if self.cursor.current() == b'/' {
                self.cursor.advance();
                return self.token(start, RawTag::BlockComment);
            }
        }
    }

    // ─── Strings & Bracketed Identifiers ───────────────────────────

    fn string(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume opening '\''
        if self.eat_doubled_delimited(b'\'') {
            self.token(start, RawTag::String)
        } else {
            self.token(start, RawTag::UnterminatedString)
        }
    }

    fn bracket_ident(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume opening '['
        if self.eat_doubled_delimited(b']') {
            self.token(start, RawTag::BracketIdent)
        } else {
            self.token(start, RawTag::UnterminatedBracketIdent)
        }
    }

    /// Consume a span body closed by `close`, where `close close` is an escaped
    /// literal. Returns `false` if EOF is reached before a lone `close`.
    fn eat_doubled_delimited(&mut self, close: u8) -> bool {
        loop {
            if !self.cursor.skip_to(close) {
                return false;
            }
            self.cursor.advance(); // consume delimiter
            if self.cursor.current() == close {
                self.cursor.advance(); // escaped: stay inside the span
            } else {
                return true;
            }
        }
    }

    #[inline]
    fn token(&self, start: u32, tag: RawTag) -> RawToken {
        RawToken {
            tag,
            len: self.cursor.pos() - start,
        }
    }
}

impl Iterator for RawScanner<'_> {
    type Item = RawToken;

    fn next(&mut self) -> Option<RawToken> {
        let tok = self.next_token();
        if tok.tag == RawTag::Eof {
            None
        } else {
            Some(tok)
        }
    }
}

/// 256-byte lookup table for word bytes.
/// `true` for a-z, A-Z, 0-9, `_`, `@`, `#`, `$` and every non-ASCII byte, so a
/// multi-byte UTF-8 character never splits a word.
/// The sentinel byte (0x00) maps to `false`, naturally terminating loops.
#[allow(
    clippy::cast_possible_truncation,
    reason = "loop counter i is 0..=255, always fits in u8"
)]
static IS_WORD_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let mut i = 0u16;
    while i < 256 {
        table[i as usize] = matches!(
            i as u8,
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | b'@' | b'#' | b'$' | 0x80..=0xFF
        );
        i += 1;
    }
    table
};

/// Returns `true` if `b` can be part of a word token.
#[inline]
pub fn is_word_byte(b: u8) -> bool {
    IS_WORD_TABLE[b as usize]
}

/// Convenience function: tokenize a script and collect all raw tokens.
///
/// Returns a `Vec<RawToken>` containing all tokens except the final `Eof`.
/// For streaming access, construct a `SourceBuffer` + `RawScanner` directly.
pub fn tokenize(source: &str) -> Vec<RawToken> {
    let buf = crate::SourceBuffer::new(source);
    RawScanner::new(buf.cursor()).collect()
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    reason = "test assertions use expect for clarity"
)]
mod tests;
