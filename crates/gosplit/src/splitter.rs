//! Batch splitter over raw scanner tokens.
//!
//! The raw scanner already folds every string literal, bracketed identifier
//! and comment into a single token, so a separator keyword hidden inside one
//! of them is never visible here. What remains is line bookkeeping: a
//! top-level line is a separator line when its tokens are
//!
//! ```text
//! [whitespace] KEYWORD [whitespace] [;] [whitespace] [line comment] (newline | EOF)
//! ```
//!
//! The keyword and terminator close the current batch. A trailing line
//! comment is kept and opens the next batch.

use gosplit_core::{RawScanner, RawTag, SourceBuffer};

use crate::batch::{normalize_newlines, Batch, Span};
use crate::config::SplitterConfig;

/// Splits SQL scripts into batches on separator lines.
///
/// Stateless between calls: every split scans the script afresh, so one
/// splitter can be shared across threads.
#[derive(Clone, Debug, Default)]
pub struct BatchSplitter {
    config: SplitterConfig,
}

impl BatchSplitter {
    pub fn new(config: SplitterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SplitterConfig {
        &self.config
    }

    /// Split `script` into owned, trimmed, non-empty batches in source order.
    ///
    /// `\r\n` is folded to `\n` unless the config turns normalization off.
    pub fn split(&self, script: &str) -> Vec<String> {
        self.split_batches(script)
            .iter()
            .map(|batch| {
                if self.config.normalize_newlines() {
                    normalize_newlines(batch.text()).into_owned()
                } else {
                    batch.text().to_owned()
                }
            })
            .collect()
    }

    /// Split `script` into batches borrowed from it, with their locations.
    ///
    /// Never fails: an unterminated string, bracket or comment extends to the
    /// end of the script and is folded into the last batch.
    #[tracing::instrument(level = "debug", skip_all, fields(len = script.len()))]
    pub fn split_batches<'a>(&self, script: &'a str) -> Vec<Batch<'a>> {
        let buf = SourceBuffer::new(script);
        if buf.has_bom() {
            tracing::debug!("skipping UTF-8 byte order mark");
        }

        let mut scanner = RawScanner::new(buf.body_cursor());
        let mut collector = Collector::new(script, buf.bom_len() as usize);
        let mut line = LineState::Start;

        loop {
            let start = scanner.pos() as usize;
            let tok = scanner.next_token();
            let end = start + tok.len as usize;

            match tok.tag {
                RawTag::Eof => {
                    if let Some(keyword_start) = line.separator_start() {
                        collector.boundary(keyword_start, start);
                    }
                    break;
                }
                RawTag::Newline => {
                    if let Some(keyword_start) = line.separator_start() {
                        collector.boundary(keyword_start, start);
                    }
                    line = LineState::Start;
                }
                RawTag::LineComment => {
                    if let Some(keyword_start) = line.separator_start() {
                        collector.boundary(keyword_start, start);
                    }
                    line = LineState::Content;
                }
                RawTag::Whitespace => {}
                RawTag::Word => {
                    line = line.word(start, &script[start..end], self.config.separator());
                }
                RawTag::Semicolon => line = line.terminator(),
                tag => {
                    if tag.is_unterminated() {
                        tracing::debug!(
                            context = tag.name(),
                            offset = start,
                            "unterminated context runs to end of script"
                        );
                    }
                    line = LineState::Content;
                }
            }
        }

        let batches = collector.finish();
        tracing::debug!(count = batches.len(), "split complete");
        batches
    }
}

/// Progress through the current top-level line towards a separator match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LineState {
    /// Nothing but whitespace so far.
    Start,
    /// The separator keyword, starting at the given offset.
    Keyword(usize),
    /// The separator keyword followed by `;`.
    Terminated(usize),
    /// Ordinary SQL: this line cannot be a separator.
    Content,
}

impl LineState {
    /// Non-ASCII whitespace scans as word bytes, so a word may carry
    /// Unicode whitespace around the keyword or consist of nothing else.
    fn word(self, start: usize, text: &str, separator: &str) -> Self {
        let trimmed = text.trim_start();
        let leading = text.len() - trimmed.len();
        let trimmed = trimmed.trim_end();
        if trimmed.is_empty() {
            return self;
        }
        match self {
            Self::Start if trimmed.eq_ignore_ascii_case(separator) => {
                Self::Keyword(start + leading)
            }
            _ => Self::Content,
        }
    }

    fn terminator(self) -> Self {
        match self {
            Self::Keyword(start) => Self::Terminated(start),
            _ => Self::Content,
        }
    }

    /// Offset of the separator keyword if the line so far is a complete
    /// separator.
    fn separator_start(self) -> Option<usize> {
        match self {
            Self::Keyword(start) | Self::Terminated(start) => Some(start),
            Self::Start | Self::Content => None,
        }
    }
}

/// Accumulates batches as separator boundaries are found.
struct Collector<'a> {
    script: &'a str,
    /// Start of the batch currently being accumulated.
    batch_start: usize,
    /// Offset up to which newlines have been counted into `line`.
    counted: usize,
    line: u32,
    batches: Vec<Batch<'a>>,
}

impl<'a> Collector<'a> {
    fn new(script: &'a str, body_start: usize) -> Self {
        Self {
            script,
            batch_start: body_start,
            counted: 0,
            line: 1,
            batches: Vec::new(),
        }
    }

    /// Close the current batch before the separator keyword and start the
    /// next one at `resume`.
    fn boundary(&mut self, keyword_start: usize, resume: usize) {
        self.emit(keyword_start);
        self.batch_start = resume;
    }

    fn finish(mut self) -> Vec<Batch<'a>> {
        self.emit(self.script.len());
        self.batches
    }

    fn emit(&mut self, end: usize) {
        let raw = &self.script[self.batch_start..end];
        let text = raw.trim();
        if text.is_empty() {
            if !raw.is_empty() {
                tracing::trace!(offset = self.batch_start, "dropping blank batch");
            }
            return;
        }

        let start = self.batch_start + (raw.len() - raw.trim_start().len());
        let span = Span::saturating_from_range(start..start + text.len());
        let line = self.line_at(start);
        tracing::trace!(%span, line, "batch");
        self.batches.push(Batch::new(text, span, line));
    }

    /// 1-based line number of `offset`. Offsets must not decrease between calls.
    fn line_at(&mut self, offset: usize) -> u32 {
        let newlines =
            memchr::memchr_iter(b'\n', &self.script.as_bytes()[self.counted..offset]).count();
        self.line = self
            .line
            .saturating_add(u32::try_from(newlines).unwrap_or(u32::MAX));
        self.counted = offset;
        self.line
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    reason = "test assertions use expect for clarity"
)]
