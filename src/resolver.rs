//! Version resolution
//!
//! Picks one rule and one ref for the current head and renders the rule's version
//! format:
//!
//! 1. The commit rule with the head commit id is the default.
//! 2. With a head branch (and no forced tag) the first branch rule whose pattern
//!    matches the branch name wins.
//! 3. Otherwise, with tags on head, the first tag rule matching any of them wins;
//!    among that rule's matching tags the highest version is taken.
//!
//! A head branch that matches no branch rule keeps the commit rule; tags are not
//! consulted in that case.

use crate::bouncer::LogBouncer;
use crate::domain::{ArtifactVersion, Gav, GavGit, RefType};
use crate::error::Result;
use crate::git::RepositoryInspector;
use crate::rules::{FormatDescription, PatternRuleSet};
use crate::template::{self, VersionData};
use tracing::{debug, warn};

/// Everything about the repository a resolution needs, fetched up front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionFacts {
    /// Full id of the head commit
    pub head_commit: String,
    /// Checked out branch, `None` for a detached head
    pub head_branch: Option<String>,
    /// Tags pointing exactly at the head commit
    pub head_tags: Vec<String>,
    /// Whether the working tree has no changes
    pub clean: bool,
    /// Repository location, identifies the repository for one-time warnings
    pub location: String,
}

impl ResolutionFacts {
    /// Snapshot the head state of a repository
    pub fn collect<I: RepositoryInspector + ?Sized>(inspector: &I) -> Result<Self> {
        Ok(ResolutionFacts {
            head_commit: inspector.head_commit()?,
            head_branch: inspector.head_branch()?,
            head_tags: inspector.head_tags()?,
            clean: inspector.is_clean()?,
            location: inspector.location(),
        })
    }
}

/// Caller supplied replacements for the detected branch and tags.
///
/// `Some("")` forces "no branch" / "no tags". A forced tag, even an empty one,
/// disables branch based versioning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefOverrides {
    pub branch: Option<String>,
    pub tag: Option<String>,
}

impl RefOverrides {
    fn head_branch<'a>(&'a self, detected: Option<&'a str>) -> Option<&'a str> {
        match self.branch.as_deref() {
            Some("") => None,
            Some(branch) => Some(branch),
            None => detected,
        }
    }

    fn head_tags<'a>(&'a self, detected: &'a [String]) -> &'a [String] {
        match &self.tag {
            Some(tag) if tag.is_empty() => &[],
            Some(tag) => std::slice::from_ref(tag),
            None => detected,
        }
    }
}

/// The winning rule and ref for one resolution
#[derive(Debug, Clone, Copy)]
struct Selection<'a> {
    rule: &'a FormatDescription,
    ref_type: RefType,
    ref_name: &'a str,
}

/// Resolves git based versions for coordinates
pub struct VersionResolver<'a> {
    rules: &'a PatternRuleSet,
    bouncer: &'a LogBouncer,
}

impl<'a> VersionResolver<'a> {
    pub fn new(rules: &'a PatternRuleSet, bouncer: &'a LogBouncer) -> Self {
        VersionResolver { rules, bouncer }
    }

    /// Resolve the version of `gav` for the given repository state
    pub fn resolve(
        &self,
        gav: &Gav,
        facts: &ResolutionFacts,
        overrides: &RefOverrides,
    ) -> Result<GavGit> {
        let declared_version = gav.declared_version()?;

        if !facts.clean && self.bouncer.first_time(facts.location.as_str()) {
            warn!("Git working tree is not clean {}", facts.location);
        }

        let head_branch = overrides.head_branch(facts.head_branch.as_deref());
        let head_tags = overrides.head_tags(&facts.head_tags);
        let branch_allowed = overrides.tag.is_none();

        let selection = self.select(&facts.head_commit, head_branch, head_tags, branch_allowed)?;
        debug!(
            "{} selected {} '{}' with pattern '{}'",
            gav, selection.ref_type, selection.ref_name, selection.rule.pattern
        );

        let rule = selection.rule;
        let data = VersionData::new(
            declared_version,
            &facts.head_commit,
            selection.ref_type,
            rule.strip_prefix(selection.ref_name),
            rule.capture_values(selection.ref_name)?,
        );
        let version = template::render(&rule.version_format, &data)?;

        Ok(GavGit {
            group_id: gav.group_id.clone(),
            artifact_id: gav.artifact_id.clone(),
            version,
            commit: facts.head_commit.clone(),
            ref_name: selection.ref_name.to_string(),
            ref_type: selection.ref_type,
        })
    }

    fn select<'s>(
        &'s self,
        head_commit: &'s str,
        head_branch: Option<&'s str>,
        head_tags: &'s [String],
        branch_allowed: bool,
    ) -> Result<Selection<'s>> {
        let default = Selection {
            rule: self.rules.commit(),
            ref_type: RefType::Commit,
            ref_name: head_commit,
        };

        match head_branch {
            Some(branch) if branch_allowed => {
                for rule in self.rules.branches() {
                    if rule.matches(branch)? {
                        return Ok(Selection {
                            rule,
                            ref_type: RefType::Branch,
                            ref_name: branch,
                        });
                    }
                }
            }
            _ if !head_tags.is_empty() => {
                for rule in self.rules.tags() {
                    if let Some(tag) = latest_matching_tag(rule, head_tags)? {
                        return Ok(Selection {
                            rule,
                            ref_type: RefType::Tag,
                            ref_name: tag,
                        });
                    }
                }
            }
            _ => {}
        }

        Ok(default)
    }
}

/// Highest versioned tag matching the rule; ties keep the earlier tag
fn latest_matching_tag<'t>(
    rule: &FormatDescription,
    tags: &'t [String],
) -> Result<Option<&'t str>> {
    let mut latest: Option<(&str, ArtifactVersion)> = None;

    for tag in tags {
        if !rule.matches(tag)? {
            continue;
        }
        let version = ArtifactVersion::parse(rule.strip_prefix(tag));
        let newer = match &latest {
            Some((_, current)) => version > *current,
            None => true,
        };
        if newer {
            latest = Some((tag.as_str(), version));
        }
    }

    Ok(latest.map(|(tag, _)| tag))
}
