use crate::error::{GitVersioningError, Result};
use crate::resolver::RefOverrides;
use crate::rules::{FormatDescription, PatternRuleSet};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "git-versioning.toml";

/// Disables versioning when set to `true` or `1`
pub const ENV_DISABLE: &str = "GIT_VERSIONING_DISABLE";
/// Provided branch; an empty value forces "no branch"
pub const ENV_BRANCH: &str = "GIT_VERSIONING_BRANCH";
/// Provided tag; an empty value forces "no tags"
pub const ENV_TAG: &str = "GIT_VERSIONING_TAG";

/// Represents the complete configuration for git-versioning.
///
/// Contains the enable switch, optional branch/tag overrides and the ordered
/// commit, branch and tag rules.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct VersioningConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub provided_branch: Option<String>,

    #[serde(default)]
    pub provided_tag: Option<String>,

    #[serde(default = "default_commit_description")]
    pub commit: FormatDescription,

    #[serde(default = "default_branch_descriptions", rename = "branch")]
    pub branches: Vec<FormatDescription>,

    #[serde(default = "default_tag_descriptions", rename = "tag")]
    pub tags: Vec<FormatDescription>,
}

fn default_enabled() -> bool {
    true
}

/// Returns the default commit rule: the full commit id.
fn default_commit_description() -> FormatDescription {
    FormatDescription::new(".*", "", "{commit}")
}

/// Returns the default branch rules: every branch becomes `<branch>-SNAPSHOT`.
fn default_branch_descriptions() -> Vec<FormatDescription> {
    vec![FormatDescription::new(".*", "", "{branch}-SNAPSHOT")]
}

/// Returns the default tag rules: the tag name itself.
fn default_tag_descriptions() -> Vec<FormatDescription> {
    vec![FormatDescription::new(".*", "", "{tag}")]
}

impl Default for VersioningConfig {
    fn default() -> Self {
        VersioningConfig {
            enabled: default_enabled(),
            provided_branch: None,
            provided_tag: None,
            commit: default_commit_description(),
            branches: default_branch_descriptions(),
            tags: default_tag_descriptions(),
        }
    }
}

impl VersioningConfig {
    /// The configured rules in priority order
    pub fn rule_set(&self) -> PatternRuleSet {
        PatternRuleSet::new(self.commit.clone(), self.branches.clone(), self.tags.clone())
    }

    /// The provided branch and tag as resolver overrides
    pub fn overrides(&self) -> RefOverrides {
        RefOverrides {
            branch: self.provided_branch.clone(),
            tag: self.provided_tag.clone(),
        }
    }

    /// Apply `GIT_VERSIONING_*` environment variables on top of the file values
    pub fn apply_env(&mut self) {
        if let Ok(disable) = env::var(ENV_DISABLE) {
            if matches!(disable.trim().to_lowercase().as_str(), "true" | "1") {
                self.enabled = false;
            }
        }
        if let Ok(branch) = env::var(ENV_BRANCH) {
            self.provided_branch = Some(branch);
        }
        if let Ok(tag) = env::var(ENV_TAG) {
            self.provided_tag = Some(tag);
        }
    }
}

/// Parse a configuration from TOML text
pub fn parse_config(config_str: &str) -> Result<VersioningConfig> {
    Ok(toml::from_str(config_str)?)
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `git-versioning.toml` in current directory
/// 3. `git-versioning.toml` in user config directory
/// 4. Default configuration if no file found
///
/// Environment overrides are applied to the result in every case.
///
/// # Returns
/// * `Ok(VersioningConfig)` - Loaded or default configuration
/// * `Err` - If an explicit path does not exist, or a file cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<VersioningConfig> {
    let mut config = match find_config_file(config_path)? {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => VersioningConfig::default(),
    };

    config.apply_env();
    Ok(config)
}

fn find_config_file(config_path: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = config_path {
        if !path.is_file() {
            return Err(GitVersioningError::config(format!(
                "configuration file not found: {}",
                path.display()
            )));
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return Ok(Some(local));
    }

    Ok(dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.exists()))
}
