//! Filter registry.
//!
//! Holds the trie built from the word list. Initialization is lazy, runs at
//! most once, and is shared by every concurrent caller; after that the trie
//! is read synchronously without any further I/O.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::debug;
#[cfg(feature = "async")]
use tracing::warn;

use crate::error::{FilterError, Result};
use crate::matcher::PatternTrie;
use crate::source::WordListLoader;

/// Lifecycle of a [`FilterRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryState {
    /// No initialization has been requested
    Uninitialized,
    /// The word list is being loaded
    Initializing,
    /// The trie is available; never reverts
    Ready,
}

/// Shared holder for the active [`PatternTrie`].
///
/// Construct one per process and share it by `Arc`. The first call to
/// [`FilterRegistry::ensure_ready`] (or its blocking variant) loads the word
/// list; overlapping calls wait for that same load and receive the same
/// `Arc<PatternTrie>`.
pub struct FilterRegistry {
    loader: WordListLoader,
    trie: Arc<OnceCell<Arc<PatternTrie>>>,
    initializing: Arc<AtomicBool>,
    #[cfg(feature = "async")]
    init_lock: tokio::sync::Mutex<()>,
}

impl FilterRegistry {
    /// Create an uninitialized registry
    pub fn new(loader: WordListLoader) -> Self {
        Self {
            loader,
            trie: Arc::new(OnceCell::new()),
            initializing: Arc::new(AtomicBool::new(false)),
            #[cfg(feature = "async")]
            init_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Create a registry that is already ready with the given trie
    pub fn with_trie(loader: WordListLoader, trie: PatternTrie) -> Self {
        let registry = Self::new(loader);
        let _ = registry.trie.set(Arc::new(trie));
        registry
    }

    /// Current lifecycle state
    pub fn state(&self) -> RegistryState {
        if self.trie.get().is_some() {
            RegistryState::Ready
        } else if self.initializing.load(Ordering::Acquire) {
            RegistryState::Initializing
        } else {
            RegistryState::Uninitialized
        }
    }

    /// Check if the trie is available
    pub fn is_ready(&self) -> bool {
        self.trie.get().is_some()
    }

    /// Get the active trie without waiting.
    ///
    /// Fails with [`FilterError::Uninitialized`] until initialization has
    /// completed, including while a load is still in flight.
    pub fn get_current(&self) -> Result<Arc<PatternTrie>> {
        self.trie.get().cloned().ok_or(FilterError::Uninitialized)
    }

    /// Load the word list if needed and return the trie, blocking the
    /// calling thread while another caller's load is in flight.
    pub fn ensure_ready_blocking(&self) -> Arc<PatternTrie> {
        init_cell(&self.trie, &self.initializing, &self.loader)
    }

    /// Load the word list if needed and return the trie.
    ///
    /// Never fails: a broken word list yields an empty trie.
    #[cfg(feature = "async")]
    pub async fn ensure_ready(&self) -> Arc<PatternTrie> {
        if let Some(trie) = self.trie.get() {
            return trie.clone();
        }

        let _lock = self.init_lock.lock().await;

        // Double-check after acquiring lock
        if let Some(trie) = self.trie.get() {
            return trie.clone();
        }

        let cell = Arc::clone(&self.trie);
        let initializing = Arc::clone(&self.initializing);
        let loader = self.loader.clone();
        let task = tokio::task::spawn_blocking(move || init_cell(&cell, &initializing, &loader));

        match task.await {
            Ok(trie) => trie,
            Err(e) => {
                warn!(error = %e, "Word list load task failed, filtering disabled");
                self.trie
                    .get_or_init(|| Arc::new(PatternTrie::new()))
                    .clone()
            }
        }
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("loader", &self.loader)
            .field("state", &self.state())
            .finish()
    }
}

fn init_cell(
    cell: &OnceCell<Arc<PatternTrie>>,
    initializing: &AtomicBool,
    loader: &WordListLoader,
) -> Arc<PatternTrie> {
    cell.get_or_init(|| {
        initializing.store(true, Ordering::Release);
        let trie = Arc::new(loader.load());
        debug!(patterns = trie.pattern_count(), "Sensitive filter ready");
        trie
    })
    .clone()
}
