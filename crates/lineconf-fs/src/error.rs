//! Error types for lineconf-fs

use std::path::PathBuf;

/// Result type for lineconf-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in lineconf-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Unsupported file {path}: expected a .{expected} file")]
    UnsupportedExtension { path: PathBuf, expected: &'static str },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: lineconf_format::Error,
    },

    /// Typed read failures and entries refused by the writer
    #[error(transparent)]
    Value(#[from] lineconf_format::Error),

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error means the target file does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
