//! Error types for the catalog crate.
//!
//! Every variant means the same thing to a caller: the catalog is
//! unavailable for this request. The variants only differ in how much
//! context they carry for the message shown to the user.

use thiserror::Error;

/// Errors that can occur while loading a course catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be found or opened
    #[error("Catalog file not found: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the source
    #[error("I/O error while reading catalog: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader rejected a record
    ///
    /// `line` is the 1-based line in the source when the reader knows it.
    #[error("Malformed catalog record in {source_label} at line {line}: {reason}")]
    ParseError {
        source_label: String,
        line: u64,
        reason: String,
    },

    /// A column the course record needs is not in the header row
    #[error("Catalog {source_label} is missing required column '{column}'")]
    MissingColumn {
        source_label: String,
        column: &'static str,
    },
}

impl CatalogError {
    pub(crate) fn from_csv(source_label: &str, err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        match err.into_kind() {
            csv::ErrorKind::Io(io) => CatalogError::IoError(io),
            kind => CatalogError::ParseError {
                source_label: source_label.to_string(),
                line,
                reason: describe_csv_error(kind),
            },
        }
    }
}

fn describe_csv_error(kind: csv::ErrorKind) -> String {
    match kind {
        csv::ErrorKind::Utf8 { err, .. } => format!("invalid UTF-8: {err}"),
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {expected_len} fields but found {len}"),
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        other => format!("{other:?}"),
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
