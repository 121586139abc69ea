mod trie;

pub use trie::{PatternTrie, TrieNode};

use crate::types::Detection;

/// Trait for multi-pattern text matchers
pub trait TextMatcher: Send + Sync {
    /// Return the first match when scanning start positions left to right
    fn contains_match<'t>(&self, text: &'t str) -> Option<&'t str>;

    /// Return every distinct matched substring, in first-seen order
    fn find_all_matches<'t>(&self, text: &'t str) -> Vec<&'t str>;

    /// Owned form of [`TextMatcher::contains_match`]
    fn detect(&self, text: &str) -> Detection {
        self.contains_match(text).into()
    }
}
