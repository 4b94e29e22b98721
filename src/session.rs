use crate::bouncer::LogBouncer;
use crate::config::VersioningConfig;
use crate::domain::{Gav, GavGit};
use crate::error::Result;
use crate::git::RepositoryInspector;
use crate::resolver::{RefOverrides, ResolutionFacts, VersionResolver};
use crate::rules::PatternRuleSet;
use tracing::info;

/// Process wide versioning state: configuration, rules and the log bouncer.
///
/// This is the entry point for whatever applies resolved versions to project
/// metadata. One session is meant to serve every coordinate of a build.
#[derive(Debug)]
pub struct VersioningSession {
    enabled: bool,
    rules: PatternRuleSet,
    overrides: RefOverrides,
    bouncer: LogBouncer,
}

impl VersioningSession {
    pub fn new(config: &VersioningConfig) -> Self {
        VersioningSession {
            enabled: config.enabled,
            rules: config.rule_set(),
            overrides: config.overrides(),
            bouncer: LogBouncer::new(),
        }
    }

    /// Whether versioning is enabled; logs "disabled" the first time it is not
    pub fn is_enabled(&self) -> bool {
        if !self.enabled && self.bouncer.first_time("DISABLED") {
            info!("git versioning disabled");
        }
        self.enabled
    }

    /// Replace the configured branch/tag overrides, e.g. from command line flags
    pub fn with_overrides(mut self, overrides: RefOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Resolve the git based version of `gav` from the repository behind `inspector`.
    ///
    /// Returns `Ok(None)` when versioning is disabled; the caller then keeps the
    /// declared version.
    pub fn resolve<I: RepositoryInspector + ?Sized>(
        &self,
        gav: &Gav,
        inspector: &I,
    ) -> Result<Option<GavGit>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        // fail on a missing version before touching the repository
        gav.declared_version()?;
        let facts = ResolutionFacts::collect(inspector)?;
        self.resolve_facts(gav, &facts).map(Some)
    }

    /// Resolve against already collected facts
    pub fn resolve_facts(&self, gav: &Gav, facts: &ResolutionFacts) -> Result<GavGit> {
        let resolver = VersionResolver::new(&self.rules, &self.bouncer);
        let resolved = resolver.resolve(gav, facts, &self.overrides)?;

        if self.bouncer.first_time(gav.to_string()) {
            info!(
                "{}:{} - {}: {} -> version: {}",
                gav.artifact_id,
                gav.version.as_deref().unwrap_or(""),
                resolved.ref_type,
                resolved.ref_name,
                resolved.version
            );
        }

        Ok(resolved)
    }
}
