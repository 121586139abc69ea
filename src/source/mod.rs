//! Word list sources.
//!
//! A source yields the raw newline-delimited text of a word list. Parsing and
//! trie construction live in [`loader`].

pub mod loader;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{FilterError, LoadErrorKind, Result};

pub use loader::{parse_word_list, WordListLoader};

/// Default word list path, relative to the working directory
pub const DEFAULT_WORD_LIST_PATH: &str = "sensitive-words.txt";

/// Default timeout for downloading a word list
pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait for fetching raw word list text
pub trait WordSource: Send + Sync {
    /// Fetch the full word list text
    fn fetch(&self) -> Result<String>;

    /// Human-readable location, used in log messages
    fn describe(&self) -> String;
}

/// File-based word source
#[derive(Debug, Clone)]
pub struct FileWordSource {
    path: PathBuf,
}

impl FileWordSource {
    /// Create a source reading the given file
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the word list file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileWordSource {
    fn default() -> Self {
        Self::new(DEFAULT_WORD_LIST_PATH)
    }
}

impl WordSource for FileWordSource {
    fn fetch(&self) -> Result<String> {
        let bytes = fs::read(&self.path).map_err(|e| {
            FilterError::load(
                LoadErrorKind::FileError,
                format!("Failed to read {}: {}", self.path.display(), e),
            )
        })?;
        decode_utf8(bytes, &self.describe())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// HTTP word source
#[derive(Debug, Clone)]
pub struct HttpWordSource {
    url: String,
    timeout: Duration,
}

impl HttpWordSource {
    /// Create a source downloading from the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_DOWNLOAD_TIMEOUT,
        }
    }

    /// Set the overall request timeout
    /// Default is 30 seconds (DEFAULT_DOWNLOAD_TIMEOUT)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Download URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl WordSource for HttpWordSource {
    fn fetch(&self) -> Result<String> {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(self.timeout))
            .build()
            .into();

        let response = agent.get(self.url.as_str()).call().map_err(|e| {
            FilterError::load(LoadErrorKind::DownloadFailed, format!("Download failed: {}", e))
        })?;

        let (_, body) = response.into_parts();
        let mut reader = body.into_reader();
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(|e| {
            FilterError::load(
                LoadErrorKind::DownloadFailed,
                format!("Failed to read response body: {}", e),
            )
        })?;

        decode_utf8(bytes, &self.url)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// In-memory word source.
///
/// Pairs with `include_str!` for a word list embedded at build time.
#[derive(Debug, Clone, Default)]
pub struct StaticWordSource {
    text: String,
}

impl StaticWordSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl WordSource for StaticWordSource {
    fn fetch(&self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        "<static>".to_string()
    }
}

/// Nil word source - fails every fetch
#[derive(Debug, Clone, Copy, Default)]
pub struct NilWordSource;

impl WordSource for NilWordSource {
    fn fetch(&self) -> Result<String> {
        Err(FilterError::load(
            LoadErrorKind::NotConfigured,
            "Word list source not available",
        ))
    }

    fn describe(&self) -> String {
        "<nil>".to_string()
    }
}

fn decode_utf8(bytes: Vec<u8>, location: &str) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| {
        FilterError::load(
            LoadErrorKind::InvalidData,
            format!("{} is not valid UTF-8: {}", location, e),
        )
    })
}
