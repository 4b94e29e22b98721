//! Version format templates
//!
//! A version format is plain text with `{name}` placeholders, e.g.
//! `{version.release}-{branch}-SNAPSHOT`. Placeholders are replaced in a
//! single left to right pass from a [`VersionData`] map. An unknown
//! placeholder fails the whole substitution.

use crate::domain::RefType;
use crate::error::{GitVersioningError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}]+)\}").expect("placeholder regex is valid"));

const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// Length of the `commit.short` placeholder value
pub const COMMIT_SHORT_LENGTH: usize = 7;

/// Values available to a version format.
///
/// Fixed keys:
/// - `version`: declared version
/// - `version.release`: declared version without a trailing `-SNAPSHOT`
/// - `commit`, `commit.short`: head commit id, full and abbreviated
/// - `branch` / `tag` / `commit`: winning ref name with the rule prefix removed
///
/// Pattern captures of the winning rule (`0` for the whole match without
/// prefix, `1`.. for numbered groups, named groups by name) are looked up
/// before the fixed keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionData {
    version: String,
    version_release: String,
    commit: String,
    commit_short: String,
    ref_type: RefType,
    ref_value: String,
    captures: BTreeMap<String, String>,
}

impl VersionData {
    pub fn new(
        declared_version: &str,
        commit: &str,
        ref_type: RefType,
        ref_value: &str,
        captures: BTreeMap<String, String>,
    ) -> Self {
        VersionData {
            version: declared_version.to_string(),
            version_release: release_version(declared_version).to_string(),
            commit: commit.to_string(),
            commit_short: commit.chars().take(COMMIT_SHORT_LENGTH).collect(),
            ref_type,
            ref_value: ref_value.to_string(),
            captures,
        }
    }

    /// Value of a placeholder, `None` if the key is unknown
    pub fn get(&self, key: &str) -> Option<&str> {
        if let Some(value) = self.captures.get(key) {
            return Some(value.as_str());
        }

        match key {
            "version" => Some(self.version.as_str()),
            "version.release" => Some(self.version_release.as_str()),
            "commit.short" => Some(self.commit_short.as_str()),
            _ if key == self.ref_type.as_str() => Some(self.ref_value.as_str()),
            "commit" => Some(self.commit.as_str()),
            _ => None,
        }
    }
}

/// Declared version with a trailing `-SNAPSHOT` removed
pub fn release_version(version: &str) -> &str {
    version.strip_suffix(SNAPSHOT_SUFFIX).unwrap_or(version)
}

/// Replace every `{name}` token with its value; produced text is not scanned again
pub fn substitute(template: &str, data: &VersionData) -> Result<String> {
    let mut result = String::with_capacity(template.len());
    let mut last = 0;

    for captures in PLACEHOLDER.captures_iter(template) {
        let (Some(token), Some(name)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let value = data
            .get(name.as_str())
            .ok_or_else(|| GitVersioningError::template(template, name.as_str()))?;

        result.push_str(&template[last..token.start()]);
        result.push_str(value);
        last = token.end();
    }

    result.push_str(&template[last..]);
    Ok(result)
}

/// Versions end up in paths and coordinates, so `/` becomes `-`
pub fn escape_version(version: &str) -> String {
    version.replace('/', "-")
}

/// Substitute the template and escape the result
pub fn render(template: &str, data: &VersionData) -> Result<String> {
    Ok(escape_version(&substitute(template, data)?))
}
