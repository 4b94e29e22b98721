use thiserror::Error;

/// Unified error type for git-versioning operations
#[derive(Error, Debug)]
pub enum GitVersioningError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration error: 'version' is missing for {coordinate}")]
    MissingVersion { coordinate: String },

    #[error("Template error: unknown placeholder '{{{placeholder}}}' in version format '{template}'")]
    Template {
        template: String,
        placeholder: String,
    },

    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-versioning
pub type Result<T> = std::result::Result<T, GitVersioningError>;

impl GitVersioningError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitVersioningError::Config(msg.into())
    }

    /// Create a template error for a placeholder that has no value
    pub fn template(template: impl Into<String>, placeholder: impl Into<String>) -> Self {
        GitVersioningError::Template {
            template: template.into(),
            placeholder: placeholder.into(),
        }
    }

    /// Create a configuration error for a coordinate without a declared version
    pub fn missing_version(coordinate: impl Into<String>) -> Self {
        GitVersioningError::MissingVersion {
            coordinate: coordinate.into(),
        }
    }

    /// True for the error kinds that stem from user configuration rather than the repository
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GitVersioningError::Config(_)
                | GitVersioningError::MissingVersion { .. }
                | GitVersioningError::ConfigParse(_)
        )
    }
}
