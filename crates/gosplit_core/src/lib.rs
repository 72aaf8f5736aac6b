//! Low-level scanner for SQL scripts.
//!
//! Splits a script into raw `(tag, len)` tokens covering exactly the lexical
//! contexts a batch splitter has to respect: string literals, bracketed
//! identifiers, line comments and block comments. Everything else is words,
//! punctuation and trivia. No SQL grammar is understood here.
//!
//! The crate is standalone so that other tools can reuse the scanner without
//! pulling in the `gosplit` batch splitter.

mod cursor;
mod raw_scanner;
mod source_buffer;
mod tag;

pub use cursor::Cursor;
pub use raw_scanner::{is_word_byte, tokenize, RawScanner};
pub use source_buffer::{EncodingIssue, EncodingIssueKind, SourceBuffer};
pub use tag::{RawTag, RawToken};
