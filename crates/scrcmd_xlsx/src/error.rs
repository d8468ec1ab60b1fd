//! Top-level error type. Every variant aborts the whole run.

use std::path::PathBuf;

use rust_xlsxwriter::XlsxError;
use thiserror::Error;

/// Fatal failures of a workbook generation run.
#[derive(Debug, Error)]
pub enum ScrcmdXlsxError {
    /// Input, style or output file could not be read or listed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// File is not valid JSON or does not match the expected shape.
    #[error("malformed JSON in {}: {source}", path.display())]
    Json {
        /// Offending path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// Source document has no object-valued command table.
    #[error("missing \"scrcmd\" table in {}", path.display())]
    MissingCommandTable {
        /// Offending path.
        path: PathBuf,
    },
    /// Source file pattern is not a valid glob.
    #[error("invalid source file pattern {pattern:?}: {message}")]
    InvalidPattern {
        /// Pattern as given.
        pattern: String,
        /// Glob compiler message.
        message: String,
    },
    /// No file in the source directory matched the pattern.
    #[error("no source matching {pattern:?} in {}", dir.display())]
    NoSources {
        /// Scanned directory.
        dir: PathBuf,
        /// Pattern used.
        pattern: String,
    },
    /// Workbook sink rejected an operation.
    #[error("xlsx write error: {0}")]
    Xlsx(String),
    /// Writer used after `close()`.
    #[error("cannot write after close()")]
    WriterClosed,
    /// Row or column index beyond what the sink accepts.
    #[error("{axis} index overflow: {value}")]
    IndexOverflow {
        /// `row` or `column`.
        axis: &'static str,
        /// Offending index.
        value: usize,
    },
}

impl From<XlsxError> for ScrcmdXlsxError {
    fn from(err: XlsxError) -> Self {
        Self::Xlsx(err.to_string())
    }
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, ScrcmdXlsxError>;
