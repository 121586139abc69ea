use thiserror::Error;

/// Classifies word list load errors for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// Source not configured (e.g. the nil source)
    NotConfigured,
    /// File open/read failure
    FileError,
    /// Download failure (connection, non-2xx status, body read)
    DownloadFailed,
    /// Content could not be decoded as UTF-8 text
    InvalidData,
}

/// Sensitive filter error types
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Sensitive filter not initialized")]
    Uninitialized,

    #[error("Word list load error: {message}")]
    LoadError {
        kind: LoadErrorKind,
        message: String,
    },

    #[error("Parse error at line {line}: {message}")]
    ParseErrorAtLine { line: usize, message: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl FilterError {
    pub(crate) fn load(kind: LoadErrorKind, message: impl Into<String>) -> Self {
        FilterError::LoadError {
            kind,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
