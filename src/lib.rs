//! Sensitive Filter - a trie-based sensitive word filter for Rust
//!
//! This library screens user-submitted text before it reaches downstream
//! generation APIs:
//! - Prefix-tree matching of a banned word list (first match or all matches)
//! - Masking of detected words with a replacement character
//! - Word lists loaded from a file, a URL, or embedded text
//! - Single-flight lazy initialization with a synchronous hot path
//! - Fail-open checks: nothing is ever blocked before the filter is loaded
//! - Endpoint exemptions and JSON request-body screening
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use sensitive_filter_r::{
//!     ContentGuard, FilterRegistry, GuardOptions, StaticWordSource, WordListLoader,
//! };
//!
//! let loader = WordListLoader::new(StaticWordSource::new("badword\nworse\n"));
//! let registry = Arc::new(FilterRegistry::new(loader));
//! let guard = ContentGuard::new(registry, GuardOptions::new().with_show_notification(false));
//!
//! // Not loaded yet: every text is allowed
//! assert!(guard.check_text("this is a badword here").is_valid);
//!
//! guard.init_blocking();
//!
//! let result = guard.check_text("this is a badword here");
//! assert!(!result.is_valid);
//! assert_eq!(result.invalid_words, vec!["badword"]);
//! assert_eq!(guard.replace_text("this is a badword here"), "this is a ******* here");
//! ```
//!
//! # Word List Format
//!
//! ```text
//! badword
//!   worse      <- surrounding whitespace is trimmed
//!
//! 敏感词       <- blank lines are ignored
//! ```
//!
//! Matching is exact and case-sensitive over Unicode scalar values.
//!
//! ## Matching Rules
//!
//! | Query | Behavior |
//! |-------|----------|
//! | `contains_match` | First match scanning start positions left to right |
//! | `find_all_matches` | Every distinct match, one per start position |
//! | `mask` | Every character covered by a match is masked |
//!
//! At each start position the shortest completed pattern wins: with
//! patterns `ab` and `abc`, the text `xxabcxx` matches `ab`.

pub mod error;
pub mod guard;
pub mod matcher;
pub mod registry;
pub mod source;
pub mod types;

// Re-export commonly used items
pub use error::{FilterError, LoadErrorKind, Result};
pub use guard::{
    scan_json, ContentGuard, ExemptRule, ExemptionPolicy, GuardOptions, InputHandler, Rejection,
    Screening, DEFAULT_CACHE_SIZE, DEFAULT_EXEMPT_ENDPOINTS, DEFAULT_MASK_CHAR,
    NOTIFICATION_MESSAGE,
};
pub use matcher::{PatternTrie, TextMatcher, TrieNode};
pub use registry::{FilterRegistry, RegistryState};
pub use source::{
    parse_word_list, FileWordSource, HttpWordSource, NilWordSource, StaticWordSource,
    WordListLoader, WordSource, DEFAULT_DOWNLOAD_TIMEOUT, DEFAULT_WORD_LIST_PATH,
};
pub use types::{CheckResult, Detection};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_full_workflow() {
        let words = r#"
badword
  ab
abc

敏感词
"#;

        // Load word list
        let loader = WordListLoader::new(StaticWordSource::new(words));
        let registry = Arc::new(FilterRegistry::new(loader));
        assert_eq!(registry.state(), RegistryState::Uninitialized);

        let guard = ContentGuard::new(
            registry.clone(),
            GuardOptions::new()
                .with_show_notification(false)
                .with_auto_replace(true),
        );

        // Fail open before initialization
        assert!(guard.check_text("badword").is_valid);
        assert!(matches!(
            registry.get_current(),
            Err(FilterError::Uninitialized)
        ));

        let trie = guard.init_blocking();
        assert_eq!(trie.pattern_count(), 4);
        assert_eq!(registry.state(), RegistryState::Ready);

        // Shortest pattern at the first matching start position
        assert_eq!(trie.detect("xxabcxx"), Detection::found("ab"));
        assert_eq!(trie.detect("clean"), Detection::none());

        // Check + replace
        let result = guard.check_text("this is a badword here");
        assert!(!result.is_valid);
        assert_eq!(
            guard.replace_text("this is a badword here"),
            "this is a ******* here"
        );

        // Input handler masks in place
        let handler = guard.create_input_handler(|_| {});
        let mut value = "含有敏感词的句子".to_string();
        handler.handle(&mut value);
        assert_eq!(value, "含有***的句子");

        // Exempt endpoints
        assert!(!guard.should_check("/api/ai/generateContent"));
        assert!(guard.should_check("/api/novel/save"));
    }
}
