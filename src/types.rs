use serde::Serialize;

/// Owned single-match record: whether a pattern was found and which text matched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Detection {
    /// A pattern was found in the text
    pub found: bool,
    /// The matched text, present only when `found` is true
    pub word: Option<String>,
}

impl Detection {
    /// A detection for the given matched word
    pub fn found(word: impl Into<String>) -> Self {
        Self {
            found: true,
            word: Some(word.into()),
        }
    }

    /// A detection reporting no match
    pub fn none() -> Self {
        Self::default()
    }
}

impl From<Option<&str>> for Detection {
    fn from(matched: Option<&str>) -> Self {
        match matched {
            Some(word) => Detection::found(word),
            None => Detection::none(),
        }
    }
}

/// Result of checking a text through the content guard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    /// The text contains no sensitive word
    pub is_valid: bool,
    /// Words that caused the text to be rejected
    pub invalid_words: Vec<String>,
}

impl CheckResult {
    /// A passing result with no invalid words
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            invalid_words: Vec::new(),
        }
    }

    /// A failing result for the given words
    pub fn invalid(words: Vec<String>) -> Self {
        Self {
            is_valid: words.is_empty(),
            invalid_words: words,
        }
    }
}

impl Default for CheckResult {
    fn default() -> Self {
        Self::valid()
    }
}
