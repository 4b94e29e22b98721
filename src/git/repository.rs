use crate::error::Result;
use crate::git::RepositoryInspector;
use git2::{ObjectType, Repository as Git2Repo, StatusOptions};
use std::path::Path;
use std::sync::Mutex;

/// Inspector backed by a `git2` repository
pub struct Git2Inspector {
    // git2::Repository is Send but not Sync
    repo: Mutex<Git2Repo>,
    location: String,
}

impl Git2Inspector {
    /// Open the repository containing `path`, searching parent directories
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        Ok(Self::from_git2(repo))
    }

    /// Create from an existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        let location = repo.path().display().to_string();
        Git2Inspector {
            repo: Mutex::new(repo),
            location,
        }
    }

    fn with_repo<T>(&self, f: impl FnOnce(&Git2Repo) -> Result<T>) -> Result<T> {
        let repo = self
            .repo
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&repo)
    }
}

impl RepositoryInspector for Git2Inspector {
    fn head_commit(&self) -> Result<String> {
        self.with_repo(|repo| {
            let commit = repo.head()?.peel_to_commit()?;
            Ok(commit.id().to_string())
        })
    }

    fn head_branch(&self) -> Result<Option<String>> {
        self.with_repo(|repo| {
            let head = repo.head()?;
            if !head.is_branch() {
                return Ok(None);
            }
            Ok(head.shorthand().map(str::to_string))
        })
    }

    fn head_tags(&self) -> Result<Vec<String>> {
        self.with_repo(|repo| {
            let head_oid = repo.head()?.peel_to_commit()?.id();
            let mut tags = Vec::new();

            for tag_name in repo.tag_names(None)?.iter().flatten() {
                let reference = match repo.find_reference(&format!("refs/tags/{}", tag_name)) {
                    Ok(reference) => reference,
                    Err(_) => continue,
                };
                // annotated tags may point at non-commit objects
                let target = match reference.peel(ObjectType::Commit) {
                    Ok(object) => object.id(),
                    Err(_) => continue,
                };
                if target == head_oid {
                    tags.push(tag_name.to_string());
                }
            }

            tags.sort();
            Ok(tags)
        })
    }

    fn is_clean(&self) -> Result<bool> {
        self.with_repo(|repo| {
            let mut options = StatusOptions::new();
            options
                .include_untracked(true)
                .recurse_untracked_dirs(true)
                .include_ignored(false);
            let statuses = repo.statuses(Some(&mut options))?;
            Ok(statuses.is_empty())
        })
    }

    fn location(&self) -> String {
        self.location.clone()
    }
}
