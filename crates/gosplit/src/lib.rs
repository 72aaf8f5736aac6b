//! Splits SQL scripts into batches on `GO` separator lines.
//!
//! A batch ends at every top-level line holding only the separator keyword,
//! optionally followed by `;` and a line comment. Separators inside string
//! literals, bracketed identifiers and comments are ignored.
//!
//! ```
//! let batches = gosplit::split("CREATE TABLE t (id INT)\nGO\nINSERT INTO t VALUES (1)\n");
//! assert_eq!(batches, vec!["CREATE TABLE t (id INT)", "INSERT INTO t VALUES (1)"]);
//! ```
//!
//! Scanning is done by the standalone [`gosplit_core`] crate.

mod batch;
mod config;
mod splitter;

pub use batch::{normalize_newlines, Batch, Span};
pub use config::{ConfigError, SplitterConfig, DEFAULT_SEPARATOR};
pub use splitter::BatchSplitter;

use std::sync::Once;

/// Split `script` into trimmed, non-empty batches using the default `GO`
/// separator.
pub fn split(script: &str) -> Vec<String> {
    BatchSplitter::default().split(script)
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=gosplit=debug` or `RUST_LOG=gosplit=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the host application.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
