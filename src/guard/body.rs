use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::ContentGuard;
use crate::matcher::{PatternTrie, TextMatcher};

/// HTTP methods whose bodies are screened
const SCREENED_METHODS: &[&str] = &["POST", "PUT", "PATCH"];

/// `error` field of a rejection
pub const REJECTION_ERROR: &str = "Content contains sensitive words";

/// `detail` field of a rejection
pub const REJECTION_DETAIL: &str = "Please review and revise the content";

/// Body of a rejected request, serialized as the error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub error: String,
    pub detail: String,
    pub found_words: Vec<String>,
}

impl Rejection {
    fn new(found_words: Vec<String>) -> Self {
        Self {
            error: REJECTION_ERROR.to_string(),
            detail: REJECTION_DETAIL.to_string(),
            found_words,
        }
    }
}

/// Outcome of screening a request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screening {
    /// Not screened: method without a body, exempt endpoint, or empty body
    Skipped,
    /// Screened (or unscreenable) and allowed through
    Clean,
    /// The body contains sensitive words
    Rejected(Rejection),
}

/// Collect every distinct sensitive word in the strings of a JSON value.
///
/// Objects and arrays are walked recursively; keys, numbers and booleans
/// are not scanned.
pub fn scan_json(trie: &PatternTrie, value: &Value) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();
    scan_value(trie, value, &mut seen, &mut found);
    found
}

fn scan_value(
    trie: &PatternTrie,
    value: &Value,
    seen: &mut HashSet<String>,
    found: &mut Vec<String>,
) {
    match value {
        Value::String(s) => {
            for word in trie.find_all_matches(s) {
                if seen.insert(word.to_string()) {
                    found.push(word.to_string());
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                scan_value(trie, item, seen, found);
            }
        }
        Value::Object(map) => {
            for item in map.values() {
                scan_value(trie, item, seen, found);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

impl ContentGuard {
    /// Collect sensitive words in a parsed JSON body; empty when not ready
    pub fn scan_json(&self, value: &Value) -> Vec<String> {
        match self.current_trie() {
            Some(trie) => scan_json(&trie, value),
            None => Vec::new(),
        }
    }

    /// Screen an API request body.
    ///
    /// Only `POST`, `PUT` and `PATCH` requests to non-exempt endpoints are
    /// screened. Bodies that are not valid JSON are let through.
    pub fn screen_request(&self, method: &str, endpoint: &str, body: &[u8]) -> Screening {
        if !SCREENED_METHODS
            .iter()
            .any(|m| m.eq_ignore_ascii_case(method))
        {
            return Screening::Skipped;
        }
        if !self.should_check(endpoint) {
            debug!(endpoint, "Endpoint exempt from sensitive word screening");
            return Screening::Skipped;
        }
        if body.is_empty() {
            return Screening::Skipped;
        }

        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(e) => {
                debug!(endpoint, error = %e, "Request body is not JSON, allowing");
                return Screening::Clean;
            }
        };

        let found = self.scan_json(&value);
        if found.is_empty() {
            Screening::Clean
        } else {
            debug!(endpoint, words = ?found, "Rejecting request with sensitive words");
            Screening::Rejected(Rejection::new(found))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;

    use crate::guard::GuardOptions;
    use crate::registry::FilterRegistry;
    use crate::source::{NilWordSource, WordListLoader};

    fn ready_guard(words: &[&str]) -> ContentGuard {
        let registry = FilterRegistry::with_trie(
            WordListLoader::new(NilWordSource),
            PatternTrie::from_words(words),
        );
        ContentGuard::new(Arc::new(registry), GuardOptions::new())
    }

    #[test]
    fn test_scan_json_nested() {
        let trie = PatternTrie::from_words(["foo", "bar"]);
        let value = json!({
            "title": "clean",
            "chapters": [
                {"text": "has foo"},
                {"text": "has bar and foo"}
            ],
            "foo": 1,
            "draft": true
        });
        assert_eq!(scan_json(&trie, &value), vec!["foo", "bar"]);
    }

    #[test]
    fn test_scan_json_keys_not_scanned() {
        let trie = PatternTrie::from_words(["foo"]);
        assert!(scan_json(&trie, &json!({"foo": "clean"})).is_empty());
    }

    #[test]
    fn test_screen_rejects() {
        let guard = ready_guard(&["badword"]);
        let body = br#"{"content": "a badword here"}"#;

        match guard.screen_request("POST", "/api/novel/save", body) {
            Screening::Rejected(rejection) => {
                assert_eq!(rejection.found_words, vec!["badword"]);
                let json = serde_json::to_value(&rejection).unwrap();
                assert_eq!(json["error"], REJECTION_ERROR);
                assert_eq!(json["found_words"][0], "badword");
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_screen_clean_body() {
        let guard = ready_guard(&["badword"]);
        let body = br#"{"content": "nothing wrong"}"#;
        assert_eq!(
            guard.screen_request("put", "/api/novel/save", body),
            Screening::Clean
        );
    }

    #[test]
    fn test_screen_skips_get_and_exempt() {
        let guard = ready_guard(&["badword"]);
        let body = br#"{"content": "badword"}"#;
        assert_eq!(
            guard.screen_request("GET", "/api/novel/save", body),
            Screening::Skipped
        );
        assert_eq!(
            guard.screen_request("POST", "/api/ai/generateImage", body),
            Screening::Skipped
        );
        assert_eq!(
            guard.screen_request("POST", "/api/novel/save", b""),
            Screening::Skipped
        );
    }

    #[test]
    fn test_screen_invalid_json_fails_open() {
        let guard = ready_guard(&["badword"]);
        assert_eq!(
            guard.screen_request("POST", "/api/novel/save", b"badword, not json"),
            Screening::Clean
        );
    }

    #[test]
    fn test_screen_before_ready_fails_open() {
        let registry = FilterRegistry::new(WordListLoader::new(NilWordSource));
        let guard = ContentGuard::new(Arc::new(registry), GuardOptions::new());
        let body = br#"{"content": "badword"}"#;
        assert_eq!(
            guard.screen_request("POST", "/api/novel/save", body),
            Screening::Clean
        );
    }
}
