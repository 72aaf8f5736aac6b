//! Raw token tags produced by the scanner.
//!
//! Discriminants are grouped into semantic ranges so a tag fits in one byte
//! and related tags can be recognized by range:
//!
//! | Range   | Group                |
//! |---------|----------------------|
//! | 0-15    | Words & punctuation  |
//! | 16-31   | Delimited spans      |
//! | 112-127 | Trivia               |
//! | 240-254 | Unterminated / error |
//! | 255     | Control              |

/// Kind of a raw token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RawTag {
    // === Words & punctuation ===
    /// Run of word bytes: identifiers, keywords, numbers, variables.
    Word = 0,
    /// `;`
    Semicolon = 1,
    /// Any other single byte outside a delimited span.
    Punct = 2,

    // === Delimited spans ===
    /// `'...'` with `''` as an escaped quote.
    String = 16,
    /// `[...]` with `]]` as an escaped bracket.
    BracketIdent = 17,
    /// `/* ... */`, non-nesting.
    BlockComment = 18,

    // === Trivia ===
    /// Horizontal whitespace, including a lone `\r`.
    Whitespace = 112,
    /// `\n` or `\r\n`.
    Newline = 113,
    /// `--` up to, not including, the newline.
    LineComment = 114,

    // === Unterminated spans (extend to end of input) ===
    UnterminatedString = 240,
    UnterminatedBracketIdent = 241,
    UnterminatedBlockComment = 242,
    /// Null byte inside the script content.
    InteriorNull = 245,

    // === Control ===
    Eof = 255,
}

impl RawTag {
    /// Human-readable description for diagnostics and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Semicolon => "`;`",
            Self::Punct => "punctuation",
            Self::String => "string literal",
            Self::BracketIdent => "bracketed identifier",
            Self::BlockComment => "block comment",
            Self::Whitespace => "whitespace",
            Self::Newline => "newline",
            Self::LineComment => "line comment",
            Self::UnterminatedString => "unterminated string",
            Self::UnterminatedBracketIdent => "unterminated bracketed identifier",
            Self::UnterminatedBlockComment => "unterminated block comment",
            Self::InteriorNull => "interior null byte",
            Self::Eof => "end of file",
        }
    }

    /// Returns `true` for spans whose closing delimiter was never found.
    pub fn is_unterminated(self) -> bool {
        matches!(
            self,
            Self::UnterminatedString | Self::UnterminatedBracketIdent | Self::UnterminatedBlockComment
        )
    }
}

/// A raw token: tag plus byte length. Positions are tracked by the consumer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawToken {
    pub tag: RawTag,
    pub len: u32,
}
