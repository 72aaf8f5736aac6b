//! Batches and their source locations.

use std::borrow::Cow;
use std::fmt;

/// Byte range of a batch within the script.
///
/// Layout: 8 bytes total
/// - start: u32 - byte offset from script start
/// - end: u32 - byte offset (exclusive)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Create from a byte range, saturating offsets past `u32::MAX`.
    #[inline]
    pub fn saturating_from_range(range: std::ops::Range<usize>) -> Self {
        Span {
            start: u32::try_from(range.start).unwrap_or(u32::MAX),
            end: u32::try_from(range.end).unwrap_or(u32::MAX),
        }
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Check if span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Convert to a `std::ops::Range`.
    #[inline]
    pub fn to_range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

const _: () = assert!(std::mem::size_of::<Span>() == 8);

/// One independently executable unit of SQL, borrowed from the script.
///
/// The text is trimmed and never empty. It keeps the script's original line
/// endings; use [`to_normalized()`](Self::to_normalized) for `\n`-only text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Batch<'a> {
    text: &'a str,
    span: Span,
    line: u32,
}

impl<'a> Batch<'a> {
    pub(crate) fn new(text: &'a str, span: Span, line: u32) -> Self {
        debug_assert!(!text.is_empty(), "batches are never empty");
        Self { text, span, line }
    }

    /// The trimmed batch text.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Byte range of [`text()`](Self::text) within the script.
    pub fn span(&self) -> Span {
        self.span
    }

    /// 1-based line of the script on which the batch starts.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// The batch text with `\r\n` folded to `\n`. Borrows when there is
    /// nothing to fold.
    pub fn to_normalized(&self) -> Cow<'a, str> {
        normalize_newlines(self.text)
    }
}

impl fmt::Display for Batch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

/// Fold every `\r\n` in `text` to `\n`.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if memchr::memmem::find(text.as_bytes(), b"\r\n").is_some() {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}
