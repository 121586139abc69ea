use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use super::WordSource;
use crate::error::Result;
use crate::matcher::PatternTrie;

/// Split word list text into patterns.
///
/// One pattern per line; surrounding whitespace is trimmed and blank lines
/// are dropped. There is no comment or escape syntax.
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Builds a [`PatternTrie`] from a [`WordSource`]
#[derive(Clone)]
pub struct WordListLoader {
    source: Arc<dyn WordSource>,
}

impl WordListLoader {
    /// Create a loader over the given source
    pub fn new(source: impl WordSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    /// Create a loader over a shared source
    pub fn from_shared(source: Arc<dyn WordSource>) -> Self {
        Self { source }
    }

    /// Fetch and parse the word list, propagating fetch errors
    pub fn try_load(&self) -> Result<PatternTrie> {
        let text = self.source.fetch()?;
        Ok(PatternTrie::from_words(parse_word_list(&text)))
    }

    /// Fetch and parse the word list.
    ///
    /// Never fails: on any error the failure is logged and an empty trie is
    /// returned, so filtering becomes inactive instead of blocking callers.
    pub fn load(&self) -> PatternTrie {
        let location = self.source.describe();
        match self.try_load() {
            Ok(trie) => {
                info!(
                    source = %location,
                    patterns = trie.pattern_count(),
                    "Loaded sensitive word list"
                );
                trie
            }
            Err(e) => {
                warn!(source = %location, error = %e, "Failed to load sensitive words");
                PatternTrie::new()
            }
        }
    }
}

impl fmt::Debug for WordListLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordListLoader")
            .field("source", &self.source.describe())
            .finish()
    }
}
