//! Main workflow orchestration logic
//!
//! Turns command line inputs into a resolution: load configuration, apply flag
//! overrides, inspect the repository and resolve the coordinate. Kept apart from
//! `main.rs` so the workflow can run without clap and against any inspector.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::{load_config, VersioningConfig};
use crate::domain::{Gav, GavGit};
use crate::git::{Git2Inspector, RepositoryInspector};
use crate::session::VersioningSession;

/// Arguments for the resolve workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveWorkflowArgs {
    /// Path to custom config file
    pub config_path: Option<PathBuf>,

    /// Directory inside the repository
    pub dir: PathBuf,

    pub group_id: String,
    pub artifact_id: String,

    /// Version as declared in the build descriptor
    pub declared_version: String,

    /// Branch to use instead of the checked out one; empty forces "no branch"
    pub branch: Option<String>,

    /// Tag to use instead of the head tags; empty forces "no tags"
    pub tag: Option<String>,
}

impl ResolveWorkflowArgs {
    fn gav(&self) -> Gav {
        Gav::new(
            self.group_id.clone(),
            self.artifact_id.clone(),
            Some(self.declared_version.clone()),
        )
    }

    /// Flags take precedence over configuration file and environment
    fn apply_to(&self, config: &mut VersioningConfig) {
        if let Some(branch) = &self.branch {
            config.provided_branch = Some(branch.clone());
        }
        if let Some(tag) = &self.tag {
            config.provided_tag = Some(tag.clone());
        }
    }
}

/// Outcome of the resolve workflow
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowResult {
    /// Version derived from git
    Resolved(GavGit),
    /// Versioning is disabled, the declared version stays as is
    Disabled { declared_version: String },
}

/// Resolve the version for the repository containing `args.dir`
pub fn run_resolve_workflow(args: &ResolveWorkflowArgs) -> Result<WorkflowResult> {
    let mut config = load_config(args.config_path.as_deref()).context("loading configuration")?;
    args.apply_to(&mut config);

    let session = VersioningSession::new(&config);
    if !session.is_enabled() {
        return Ok(WorkflowResult::Disabled {
            declared_version: args.declared_version.clone(),
        });
    }

    let inspector = Git2Inspector::open(&args.dir)
        .with_context(|| format!("opening git repository at {}", args.dir.display()))?;
    resolve_with(&session, args, &inspector)
}

/// Resolve with an already built session and inspector
pub fn resolve_with<I: RepositoryInspector + ?Sized>(
    session: &VersioningSession,
    args: &ResolveWorkflowArgs,
    inspector: &I,
) -> Result<WorkflowResult> {
    let resolved = session
        .resolve(&args.gav(), inspector)
        .with_context(|| format!("resolving version of {}:{}", args.group_id, args.artifact_id))?;

    Ok(match resolved {
        Some(resolved) => WorkflowResult::Resolved(resolved),
        None => WorkflowResult::Disabled {
            declared_version: args.declared_version.clone(),
        },
    })
}

/// Session for `args` with the given configuration, flag overrides applied
pub fn session_for(args: &ResolveWorkflowArgs, mut config: VersioningConfig) -> VersioningSession {
    args.apply_to(&mut config);
    VersioningSession::new(&config)
}
