//! Prefix tree of banned patterns.
//!
//! Each edge is a single `char`. Queries restart from the root at every
//! start position of the text and stop at the first node whose terminal flag
//! is set, so the shortest pattern beginning at a given position wins.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use super::TextMatcher;

/// A trie node: children keyed by character, plus a terminal flag
#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    children: HashMap<char, TrieNode>,
    terminal: bool,
}

impl TrieNode {
    /// Child reached through `ch`, if any
    #[inline]
    pub fn child(&self, ch: char) -> Option<&TrieNode> {
        self.children.get(&ch)
    }

    /// The path from the root to this node spells a complete pattern
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }
}

/// Trie of banned patterns.
///
/// Built once by inserting patterns, then only queried. Matching is exact
/// and case-sensitive: "foo" does not match "FOO".
#[derive(Debug, Clone, Default)]
pub struct PatternTrie {
    root: TrieNode,
    patterns: usize,
}

impl PatternTrie {
    /// Create an empty trie (matches nothing)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a trie from a list of patterns
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        for word in words {
            trie.insert(word.as_ref());
        }
        trie
    }

    /// Insert a pattern, creating missing nodes along its path.
    ///
    /// An empty pattern marks the root, which queries never test, so it
    /// matches nothing.
    pub fn insert(&mut self, pattern: &str) {
        let mut node = &mut self.root;
        for ch in pattern.chars() {
            node = node.children.entry(ch).or_default();
        }
        if !node.terminal {
            node.terminal = true;
            self.patterns += 1;
        }
    }

    /// Number of distinct patterns inserted
    pub fn pattern_count(&self) -> usize {
        self.patterns
    }

    /// Check if the trie holds no patterns
    pub fn is_empty(&self) -> bool {
        self.patterns == 0
    }

    /// Root node of the trie
    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Walk from the root consuming `text[start..]` and return the byte end
    /// of the first completed pattern.
    fn match_end_at(&self, text: &str, start: usize) -> Option<usize> {
        let mut node = &self.root;
        for (offset, ch) in text[start..].char_indices() {
            node = node.child(ch)?;
            if node.terminal {
                return Some(start + offset + ch.len_utf8());
            }
        }
        None
    }

    /// Byte ranges of the shortest match at every start position, in order.
    /// Spans from neighbouring start positions may overlap.
    pub fn match_spans(&self, text: &str) -> Vec<Range<usize>> {
        if self.is_empty() {
            return Vec::new();
        }
        text.char_indices()
            .filter_map(|(start, _)| self.match_end_at(text, start).map(|end| start..end))
            .collect()
    }

    /// Replace every character covered by a match span with `mask`.
    /// The character count of the text is preserved.
    pub fn mask(&self, text: &str, mask: char) -> String {
        let spans = self.match_spans(text);
        if spans.is_empty() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len());
        let mut spans = spans.into_iter().peekable();
        let mut covered_until = 0;
        for (pos, ch) in text.char_indices() {
            while let Some(span) = spans.next_if(|span| span.start <= pos) {
                covered_until = covered_until.max(span.end);
            }
            if pos < covered_until {
                out.push(mask);
            } else {
                out.push(ch);
            }
        }
        out
    }
}

impl TextMatcher for PatternTrie {
    fn contains_match<'t>(&self, text: &'t str) -> Option<&'t str> {
        if self.is_empty() {
            return None;
        }
        text.char_indices()
            .find_map(|(start, _)| self.match_end_at(text, start).map(|end| &text[start..end]))
    }

    fn find_all_matches<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut seen = HashSet::new();
        self.match_spans(text)
            .into_iter()
            .map(|span| &text[span])
            .filter(|word| seen.insert(*word))
            .collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for PatternTrie {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_words(iter)
    }
}
