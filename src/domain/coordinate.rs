use crate::domain::RefType;
use crate::error::{GitVersioningError, Result};
use serde::Serialize;
use std::fmt;

/// Group/artifact/version coordinate of the component being versioned.
///
/// `version` is the version as declared in the build descriptor, before any
/// git based resolution took place.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Gav {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
}

impl Gav {
    /// Create a new coordinate
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: Option<String>,
    ) -> Self {
        Gav {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version,
        }
    }

    /// The declared version, failing with a configuration error when it is absent or empty
    pub fn declared_version(&self) -> Result<&str> {
        match self.version.as_deref() {
            Some(version) if !version.is_empty() => Ok(version),
            _ => Err(GitVersioningError::missing_version(format!(
                "{}:{}",
                self.group_id, self.artifact_id
            ))),
        }
    }
}

impl fmt::Display for Gav {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.group_id,
            self.artifact_id,
            self.version.as_deref().unwrap_or("")
        )
    }
}

/// Resolved version of a coordinate together with the git ref it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GavGit {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub commit: String,
    pub ref_name: String,
    pub ref_type: RefType,
}

impl GavGit {
    /// Flat key/value facts for downstream metadata.
    ///
    /// Exactly one of `project.tag` and `project.branch` carries the ref name,
    /// the other one is empty. Both are empty for commit based versions.
    pub fn project_properties(&self) -> Vec<(&'static str, String)> {
        let when = |ref_type: RefType| {
            if self.ref_type == ref_type {
                self.ref_name.clone()
            } else {
                String::new()
            }
        };

        vec![
            ("project.commit", self.commit.clone()),
            ("project.tag", when(RefType::Tag)),
            ("project.branch", when(RefType::Branch)),
        ]
    }
}

impl fmt::Display for GavGit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}
