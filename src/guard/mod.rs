//! Consumer-facing content guard.
//!
//! Wraps a [`FilterRegistry`] with a fail-open check, a stateful masking
//! transform, an endpoint exemption policy, an input-change handler, and
//! request-body screening.

mod body;
mod exempt;
mod input;

pub use body::{scan_json, Rejection, Screening, REJECTION_DETAIL, REJECTION_ERROR};
pub use exempt::{ExemptRule, ExemptionPolicy, DEFAULT_EXEMPT_ENDPOINTS};
pub use input::InputHandler;

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::matcher::{PatternTrie, TextMatcher};
use crate::registry::FilterRegistry;
use crate::types::CheckResult;

/// Message raised when a check finds a sensitive word
pub const NOTIFICATION_MESSAGE: &str = "Content contains inappropriate words";

/// Default mask character
pub const DEFAULT_MASK_CHAR: char = '*';

/// Default LRU cache size for single-match results
pub const DEFAULT_CACHE_SIZE: usize = 1024;

/// Callback receiving the detected words
type DetectCallback = Box<dyn Fn(&[String]) + Send + Sync>;

/// Callback receiving a user-visible notification message
type NotifyCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Content guard options.
pub struct GuardOptions {
    /// Raise a notification when a check finds a word (default true)
    pub show_notification: bool,
    /// Mask detected words in the input handler (default false)
    pub auto_replace: bool,
    /// Character used for masking
    pub mask_char: char,
    /// LRU cache size for single-match results
    pub cache_size: usize,
    /// Called with the detected words
    pub on_detect: Option<DetectCallback>,
    /// Receives notifications; when unset they are logged as warnings
    pub notifier: Option<NotifyCallback>,
}

impl Default for GuardOptions {
    fn default() -> Self {
        Self {
            show_notification: true,
            auto_replace: false,
            mask_char: DEFAULT_MASK_CHAR,
            cache_size: DEFAULT_CACHE_SIZE,
            on_detect: None,
            notifier: None,
        }
    }
}

impl GuardOptions {
    /// Create new guard options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable notifications.
    pub fn with_show_notification(mut self, show: bool) -> Self {
        self.show_notification = show;
        self
    }

    /// Enable or disable masking in the input handler.
    pub fn with_auto_replace(mut self, auto_replace: bool) -> Self {
        self.auto_replace = auto_replace;
        self
    }

    /// Set mask character.
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    /// Set cache size.
    pub fn with_cache_size(mut self, size: usize) -> Self {
        self.cache_size = size;
        self
    }

    /// Set detection callback.
    pub fn with_on_detect<F>(mut self, on_detect: F) -> Self
    where
        F: Fn(&[String]) + Send + Sync + 'static,
    {
        self.on_detect = Some(Box::new(on_detect));
        self
    }

    /// Set notification receiver.
    pub fn with_notifier<F>(mut self, notifier: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.notifier = Some(Box::new(notifier));
        self
    }
}

impl fmt::Debug for GuardOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardOptions")
            .field("show_notification", &self.show_notification)
            .field("auto_replace", &self.auto_replace)
            .field("mask_char", &self.mask_char)
            .field("cache_size", &self.cache_size)
            .field("on_detect", &self.on_detect.is_some())
            .field("notifier", &self.notifier.is_some())
            .finish()
    }
}

/// Outcome of the most recent check
#[derive(Debug)]
struct GuardState {
    is_valid: bool,
    invalid_words: Vec<String>,
}

impl Default for GuardState {
    fn default() -> Self {
        Self {
            is_valid: true,
            invalid_words: Vec::new(),
        }
    }
}

/// Fail-open façade over a [`FilterRegistry`].
///
/// Until the registry is ready every check reports valid text. Once ready,
/// checks read the trie synchronously and remember the words they found;
/// [`ContentGuard::replace_text`] masks those remembered words.
pub struct ContentGuard {
    registry: Arc<FilterRegistry>,
    options: GuardOptions,
    exemptions: ExemptionPolicy,
    state: RwLock<GuardState>,
    cache: Mutex<LruCache<String, Option<String>>>,
}

impl ContentGuard {
    /// Create a guard over a shared registry
    pub fn new(registry: Arc<FilterRegistry>, options: GuardOptions) -> Self {
        let cache_size =
            NonZeroUsize::new(options.cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            registry,
            options,
            exemptions: ExemptionPolicy::default(),
            state: RwLock::new(GuardState::default()),
            cache: Mutex::new(LruCache::new(cache_size)),
        }
    }

    /// Replace the endpoint exemption policy
    pub fn with_exemptions(mut self, exemptions: ExemptionPolicy) -> Self {
        self.exemptions = exemptions;
        self
    }

    /// The shared registry
    pub fn registry(&self) -> &Arc<FilterRegistry> {
        &self.registry
    }

    /// Guard options
    pub fn options(&self) -> &GuardOptions {
        &self.options
    }

    /// Endpoint exemption policy
    pub fn exemptions(&self) -> &ExemptionPolicy {
        &self.exemptions
    }

    /// Warm up the registry
    #[cfg(feature = "async")]
    pub async fn init(&self) -> Arc<PatternTrie> {
        self.registry.ensure_ready().await
    }

    /// Warm up the registry, blocking the calling thread
    pub fn init_blocking(&self) -> Arc<PatternTrie> {
        self.registry.ensure_ready_blocking()
    }

    /// Check if the filter is loaded
    pub fn is_ready(&self) -> bool {
        self.registry.is_ready()
    }

    /// Whether the most recently checked text was valid
    pub fn is_valid(&self) -> bool {
        self.state.read().is_valid
    }

    /// Words found by the most recent check
    pub fn invalid_words(&self) -> Vec<String> {
        self.state.read().invalid_words.clone()
    }

    /// Check a text for the first sensitive word.
    ///
    /// Reports valid text when the filter is not ready yet.
    pub fn check_text(&self, text: &str) -> CheckResult {
        let Some(trie) = self.current_trie() else {
            return CheckResult::valid();
        };

        let words: Vec<String> = self.lookup(&trie, text).into_iter().collect();
        self.record(words)
    }

    /// Check a text for every distinct sensitive word.
    ///
    /// Like [`ContentGuard::check_text`], the words are remembered for
    /// [`ContentGuard::replace_text`].
    pub fn check_all(&self, text: &str) -> CheckResult {
        let Some(trie) = self.current_trie() else {
            return CheckResult::valid();
        };

        let words = trie
            .find_all_matches(text)
            .into_iter()
            .map(String::from)
            .collect();
        self.record(words)
    }

    /// Mask every occurrence of the words found by the most recent check.
    ///
    /// Each occurrence is replaced by one mask character per character of
    /// the word, so the character count of the text is preserved.
    pub fn replace_text(&self, text: &str) -> String {
        let words = self.invalid_words();
        words.iter().fold(text.to_string(), |masked, word| {
            mask_word(&masked, word, self.options.mask_char)
        })
    }

    /// Mask every match in a text without touching the check state.
    pub fn mask_text(&self, text: &str) -> String {
        match self.current_trie() {
            Some(trie) => trie.mask(text, self.options.mask_char),
            None => text.to_string(),
        }
    }

    /// Whether calls to the endpoint should be filtered
    pub fn should_check(&self, endpoint: &str) -> bool {
        !self.exemptions.is_exempt(endpoint)
    }

    /// Create a handler for text input changes
    pub fn create_input_handler<F>(&self, on_change: F) -> InputHandler<'_, F>
    where
        F: Fn(&str),
    {
        InputHandler::new(self, on_change)
    }

    /// The active trie, or `None` while the filter is not usable
    fn current_trie(&self) -> Option<Arc<PatternTrie>> {
        if !self.registry.is_ready() {
            return None;
        }
        match self.registry.get_current() {
            Ok(trie) => Some(trie),
            Err(e) => {
                debug!(error = %e, "Sensitive filter unavailable, allowing text");
                None
            }
        }
    }

    /// First match with LRU caching
    fn lookup(&self, trie: &PatternTrie, text: &str) -> Option<String> {
        let mut cache = self.cache.lock();

        if let Some(cached) = cache.get(text) {
            return cached.clone();
        }

        let result = trie.contains_match(text).map(String::from);
        cache.put(text.to_string(), result.clone());
        result
    }

    /// Store the outcome of a check and notify listeners
    fn record(&self, words: Vec<String>) -> CheckResult {
        {
            let mut state = self.state.write();
            state.is_valid = words.is_empty();
            state.invalid_words = words.clone();
        }

        if !words.is_empty() {
            debug!(words = ?words, "Sensitive words detected");
            if self.options.show_notification {
                match self.options.notifier {
                    Some(ref notify) => notify(NOTIFICATION_MESSAGE),
                    None => warn!("{}", NOTIFICATION_MESSAGE),
                }
            }
            if let Some(ref on_detect) = self.options.on_detect {
                on_detect(&words);
            }
        }

        CheckResult::invalid(words)
    }
}

impl fmt::Debug for ContentGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentGuard")
            .field("registry", &self.registry)
            .field("options", &self.options)
            .field("exemptions", &self.exemptions)
            .field("state", &*self.state.read())
            .finish()
    }
}

/// Replace every literal occurrence of `word` with mask characters
fn mask_word(text: &str, word: &str, mask: char) -> String {
    if word.is_empty() {
        return text.to_string();
    }
    let replacement: String = std::iter::repeat(mask).take(word.chars().count()).collect();
    text.replace(word, &replacement)
}
