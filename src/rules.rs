//! Pattern rules that map ref names to version formats
//!
//! A [`FormatDescription`] pairs a regular expression with an optional literal
//! prefix and a version format template. The [`PatternRuleSet`] holds one commit
//! rule and ordered branch and tag rules; earlier rules take priority.
//!
//! Patterns must match the whole ref name. They are compiled on first use, so an
//! invalid pattern only fails the resolutions that actually reach it.

use crate::error::{GitVersioningError, Result};
use once_cell::sync::OnceCell;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One versioning rule: pattern, prefix and version format
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct FormatDescription {
    pub pattern: String,

    #[serde(default)]
    pub prefix: String,

    pub version_format: String,

    #[serde(skip)]
    compiled: OnceCell<std::result::Result<Regex, regex::Error>>,
}

impl FormatDescription {
    /// Create a new rule
    pub fn new(
        pattern: impl Into<String>,
        prefix: impl Into<String>,
        version_format: impl Into<String>,
    ) -> Self {
        FormatDescription {
            pattern: pattern.into(),
            prefix: prefix.into(),
            version_format: version_format.into(),
            compiled: OnceCell::new(),
        }
    }

    /// The anchored regex for this rule, compiled once on first call
    pub fn regex(&self) -> Result<&Regex> {
        self.compiled
            .get_or_init(|| Regex::new(&format!("^(?:{})$", self.pattern)))
            .as_ref()
            .map_err(|source| GitVersioningError::Pattern {
                pattern: self.pattern.clone(),
                source: source.clone(),
            })
    }

    /// Whether the whole ref name matches the pattern
    pub fn matches(&self, ref_name: &str) -> Result<bool> {
        Ok(self.regex()?.is_match(ref_name))
    }

    /// Remove the literal prefix if the ref name starts with it
    pub fn strip_prefix<'a>(&self, ref_name: &'a str) -> &'a str {
        ref_name.strip_prefix(self.prefix.as_str()).unwrap_or(ref_name)
    }

    /// Placeholder values the pattern yields for the ref name.
    ///
    /// `0` is the whole match with the prefix removed, `1`, `2`, ... are the
    /// numbered groups and named groups appear under their name. Groups that did
    /// not participate in the match are left out.
    pub fn capture_values(&self, ref_name: &str) -> Result<BTreeMap<String, String>> {
        let regex = self.regex()?;
        let mut values = BTreeMap::new();

        let Some(captures) = regex.captures(ref_name) else {
            return Ok(values);
        };

        for (index, group) in captures.iter().enumerate() {
            let Some(group) = group else {
                continue;
            };
            let value = if index == 0 {
                self.strip_prefix(group.as_str())
            } else {
                group.as_str()
            };
            values.insert(index.to_string(), value.to_string());
        }

        for name in regex.capture_names().flatten() {
            if let Some(value) = captures.name(name) {
                values.insert(name.to_string(), value.as_str().to_string());
            }
        }

        Ok(values)
    }
}

/// Ordered rules for the three ref categories
#[derive(Debug, Clone)]
pub struct PatternRuleSet {
    commit: FormatDescription,
    branches: Vec<FormatDescription>,
    tags: Vec<FormatDescription>,
}

impl PatternRuleSet {
    /// Create a rule set; the order of `branches` and `tags` is their priority
    pub fn new(
        commit: FormatDescription,
        branches: Vec<FormatDescription>,
        tags: Vec<FormatDescription>,
    ) -> Self {
        PatternRuleSet {
            commit,
            branches,
            tags,
        }
    }

    /// The fallback rule used when no branch or tag rule wins
    pub fn commit(&self) -> &FormatDescription {
        &self.commit
    }

    pub fn branches(&self) -> &[FormatDescription] {
        &self.branches
    }

    pub fn tags(&self) -> &[FormatDescription] {
        &self.tags
    }
}

impl Default for PatternRuleSet {
    fn default() -> Self {
        PatternRuleSet {
            commit: FormatDescription::new(".*", "", "{commit}"),
            branches: vec![FormatDescription::new(".*", "", "{branch}-SNAPSHOT")],
            tags: vec![FormatDescription::new(".*", "", "{tag}")],
        }
    }
}
