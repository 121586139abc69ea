use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::{FilterError, Result};

/// Endpoints exempt from filtering by default: their payloads are AI
/// generation requests, not user-authored text.
pub const DEFAULT_EXEMPT_ENDPOINTS: &[&str] = &["/api/ai/generateContent", "/api/ai/generateImage"];

/// Prefix marking a regex exemption entry
const REGEX_PREFIX: &str = "regex:";

/// A single exemption entry
#[derive(Debug, Clone)]
pub enum ExemptRule {
    /// Endpoint identifier compared for equality
    Exact(String),
    /// Anchored regex over the whole endpoint identifier
    Pattern(Regex),
}

impl ExemptRule {
    /// Check if this rule exempts the endpoint
    pub fn matches(&self, endpoint: &str) -> bool {
        match self {
            ExemptRule::Exact(id) => id == endpoint,
            ExemptRule::Pattern(re) => re.is_match(endpoint),
        }
    }
}

/// Denylist of endpoints whose traffic is not filtered
#[derive(Debug, Clone)]
pub struct ExemptionPolicy {
    rules: Vec<ExemptRule>,
}

impl ExemptionPolicy {
    /// A policy that exempts nothing
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add an exact endpoint identifier
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.rules.push(ExemptRule::Exact(endpoint.into()));
        self
    }

    /// Add a regex entry, anchored to the whole identifier
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.rules.push(ExemptRule::Pattern(anchored(pattern)?));
        Ok(self)
    }

    /// Parse a policy from text.
    ///
    /// One entry per line, `#` starts a comment, blank lines are skipped.
    /// `regex:<pattern>` entries are regexes, anything else is exact.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rules = Vec::new();

        for (line_num, line) in text.lines().enumerate() {
            let line_num = line_num + 1;

            let line = match line.find('#') {
                Some(comment_pos) => &line[..comment_pos],
                None => line,
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let rule = match line.strip_prefix(REGEX_PREFIX) {
                Some(pattern) => {
                    let re = anchored(pattern.trim()).map_err(|e| FilterError::ParseErrorAtLine {
                        line: line_num,
                        message: e.to_string(),
                    })?;
                    ExemptRule::Pattern(re)
                }
                None => ExemptRule::Exact(line.to_string()),
            };
            rules.push(rule);
        }

        Ok(Self { rules })
    }

    /// Parse a policy from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            FilterError::ParseError(format!(
                "Failed to read exemption file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&text)
    }

    /// Check if the endpoint is exempt from filtering
    pub fn is_exempt(&self, endpoint: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(endpoint))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the policy has no entries
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for ExemptionPolicy {
    fn default() -> Self {
        Self {
            rules: DEFAULT_EXEMPT_ENDPOINTS
                .iter()
                .map(|id| ExemptRule::Exact(id.to_string()))
                .collect(),
        }
    }
}

fn anchored(pattern: &str) -> Result<Regex> {
    Ok(Regex::new(&format!("^(?:{})$", pattern))?)
}
