//! Error types for lineconf-format

/// Result type for lineconf-format operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing, reading or writing a document
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Malformed line {line}: {message}: {content:?}")]
    Format {
        line: usize,
        content: String,
        message: String,
    },

    #[error("Key not found: {key}")]
    KeyNotFound { key: String },

    #[error("Cannot convert value {value:?} of key {key} to {target}")]
    TypeConversion {
        key: String,
        value: String,
        target: String,
    },

    /// An entry the line format cannot hold without changing it
    #[error("Cannot write key {key:?}: {message}")]
    Unwritable { key: String, message: String },
}

impl Error {
    pub fn format(line: usize, content: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            content: content.into(),
            message: message.into(),
        }
    }

    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    pub fn conversion(
        key: impl Into<String>,
        value: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self::TypeConversion {
            key: key.into(),
            value: value.into(),
            target: target.into(),
        }
    }

    pub fn unwritable(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unwritable {
            key: key.into(),
            message: message.into(),
        }
    }
}
