//! Splitter configuration.

use gosplit_core::is_word_byte;

/// Separator keyword used by `sqlcmd`, SSMS and most migration runners.
pub const DEFAULT_SEPARATOR: &str = "GO";

/// Error building a [`SplitterConfig`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The separator keyword is the empty string.
    #[error("batch separator must not be empty")]
    EmptySeparator,
    /// The separator keyword would not scan as a single word.
    #[error("batch separator `{0}` must contain only letters, digits, `_`, `@`, `#` or `$`")]
    InvalidSeparator(String),
}

/// How a script is split into batches.
///
/// ```
/// use gosplit::SplitterConfig;
///
/// let config = SplitterConfig::default()
///     .with_separator("BATCH")?
///     .with_normalize_newlines(false);
/// assert_eq!(config.separator(), "BATCH");
/// # Ok::<(), gosplit::ConfigError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitterConfig {
    separator: String,
    normalize_newlines: bool,
}

impl SplitterConfig {
    /// Configuration with a custom separator keyword.
    pub fn new(separator: impl Into<String>) -> Result<Self, ConfigError> {
        Self::default().with_separator(separator)
    }

    /// Replace the separator keyword. Matching is ASCII case-insensitive.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Result<Self, ConfigError> {
        let separator = separator.into();
        validate_separator(&separator)?;
        self.separator = separator;
        Ok(self)
    }

    /// Whether owned batches fold `\r\n` line endings to `\n`.
    #[must_use]
    pub fn with_normalize_newlines(mut self, normalize: bool) -> Self {
        self.normalize_newlines = normalize;
        self
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn normalize_newlines(&self) -> bool {
        self.normalize_newlines
    }
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_owned(),
            normalize_newlines: true,
        }
    }
}

/// The keyword has to be exactly one word token, or no line could match it.
fn validate_separator(separator: &str) -> Result<(), ConfigError> {
    if separator.is_empty() {
        return Err(ConfigError::EmptySeparator);
    }
    if !separator.bytes().all(is_word_byte) || separator.contains(char::is_whitespace) {
        return Err(ConfigError::InvalidSeparator(separator.to_owned()));
    }
    Ok(())
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    reason = "test assertions use expect for clarity"
)]
