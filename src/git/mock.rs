use crate::error::{GitVersioningError, Result};
use crate::git::RepositoryInspector;

/// Mock inspector for testing without a repository on disk
#[derive(Debug, Clone)]
pub struct MockInspector {
    commit: Option<String>,
    branch: Option<String>,
    tags: Vec<String>,
    clean: bool,
    location: String,
}

impl MockInspector {
    /// A clean, detached head at `commit` without tags
    pub fn new(commit: impl Into<String>) -> Self {
        MockInspector {
            commit: Some(commit.into()),
            branch: None,
            tags: Vec::new(),
            clean: true,
            location: "mock".to_string(),
        }
    }

    /// An inspector whose every query fails, like an unborn repository
    pub fn broken() -> Self {
        MockInspector {
            commit: None,
            ..Self::new("")
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn dirty(mut self) -> Self {
        self.clean = false;
        self
    }

    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    fn check(&self) -> Result<&str> {
        self.commit
            .as_deref()
            .ok_or_else(|| GitVersioningError::Git(git2::Error::from_str("reference 'HEAD' not found")))
    }
}

impl RepositoryInspector for MockInspector {
    fn head_commit(&self) -> Result<String> {
        self.check().map(str::to_string)
    }

    fn head_branch(&self) -> Result<Option<String>> {
        self.check()?;
        Ok(self.branch.clone())
    }

    fn head_tags(&self) -> Result<Vec<String>> {
        self.check()?;
        let mut tags = self.tags.clone();
        tags.sort();
        Ok(tags)
    }

    fn is_clean(&self) -> Result<bool> {
        self.check()?;
        Ok(self.clean)
    }

    fn location(&self) -> String {
        self.location.clone()
    }
}
