// tests/resolver_test.rs
use git_versioning::bouncer::LogBouncer;
use git_versioning::domain::{Gav, GavGit, RefType};
use git_versioning::resolver::{RefOverrides, ResolutionFacts, VersionResolver};
use git_versioning::rules::{FormatDescription, PatternRuleSet};
use git_versioning::{GitVersioningError, Result};

const COMMIT: &str = "1a2b3c4d5e6f7a8b9c0d1a2b3c4d5e6f7a8b9c0d";

fn gav(version: &str) -> Gav {
    Gav::new("org.example", "app", Some(version.to_string()))
}

fn facts(branch: Option<&str>, tags: &[&str]) -> ResolutionFacts {
    ResolutionFacts {
        head_commit: COMMIT.to_string(),
        head_branch: branch.map(str::to_string),
        head_tags: tags.iter().map(|t| t.to_string()).collect(),
        clean: true,
        location: "/work/app/.git".to_string(),
    }
}

fn rules(branches: Vec<FormatDescription>, tags: Vec<FormatDescription>) -> PatternRuleSet {
    PatternRuleSet::new(
        FormatDescription::new(".*", "", "{commit.short}"),
        branches,
        tags,
    )
}

fn resolve_with(
    rules: &PatternRuleSet,
    facts: &ResolutionFacts,
    overrides: &RefOverrides,
) -> Result<GavGit> {
    let bouncer = LogBouncer::new();
    VersionResolver::new(rules, &bouncer).resolve(&gav("1.0.0-SNAPSHOT"), facts, overrides)
}

fn resolve(rules: &PatternRuleSet, facts: &ResolutionFacts) -> Result<GavGit> {
    resolve_with(rules, facts, &RefOverrides::default())
}

fn forced_tag(tag: &str) -> RefOverrides {
    RefOverrides {
        branch: None,
        tag: Some(tag.to_string()),
    }
}

// ============================================================================
// Commit fallback
// ============================================================================

#[test]
fn test_no_matching_rule_falls_back_to_commit() {
    let rules = rules(
        vec![FormatDescription::new("main", "", "{branch}")],
        vec![FormatDescription::new(r"v.*", "v", "{tag}")],
    );

    let resolved = resolve(&rules, &facts(None, &["nightly"])).unwrap();
    assert_eq!(resolved.ref_type, RefType::Commit);
    assert_eq!(resolved.ref_name, COMMIT);
    assert_eq!(resolved.version, "1a2b3c4");
    assert_eq!(resolved.commit, COMMIT);
}

#[test]
fn test_detached_head_without_tags_uses_commit() {
    let rules = PatternRuleSet::default();
    let resolved = resolve(&rules, &facts(None, &[])).unwrap();
    assert_eq!(resolved.ref_type, RefType::Commit);
    assert_eq!(resolved.version, COMMIT);
}

#[test]
fn test_unmatched_branch_keeps_commit_rule_even_with_tags() {
    let rules = rules(
        vec![FormatDescription::new("main", "", "{branch}")],
        vec![FormatDescription::new(".*", "", "{tag}")],
    );

    let resolved = resolve(&rules, &facts(Some("feature/x"), &["v1.0"])).unwrap();
    assert_eq!(resolved.ref_type, RefType::Commit);
    assert_eq!(resolved.version, "1a2b3c4");
}

// ============================================================================
// Branch rules
// ============================================================================

#[test]
fn test_release_branch_with_prefix() {
    let rules = rules(
        vec![FormatDescription::new("release/.*", "release/", "{branch}")],
        vec![],
    );

    let resolved = resolve(&rules, &facts(Some("release/1.2"), &[])).unwrap();
    assert_eq!(resolved.version, "1.2");
    assert_eq!(resolved.ref_type, RefType::Branch);
    // the ref name is reported without stripping
    assert_eq!(resolved.ref_name, "release/1.2");
}

#[test]
fn test_release_branch_with_capture_group() {
    let rules = rules(
        vec![FormatDescription::new(
            "release/(?P<release>.*)",
            "",
            "{release}",
        )],
        vec![],
    );

    let resolved = resolve(&rules, &facts(Some("release/1.2"), &[])).unwrap();
    assert_eq!(resolved.version, "1.2");
}

#[test]
fn test_release_branch_whole_match_placeholder() {
    let rules = rules(
        vec![FormatDescription::new("release/.*", "release/", "{0}")],
        vec![],
    );

    let resolved = resolve(&rules, &facts(Some("release/1.2"), &[])).unwrap();
    assert_eq!(resolved.version, "1.2");
}

#[test]
fn test_release_branch_numbered_group_placeholder() {
    let rules = rules(
        vec![FormatDescription::new("release/(.*)", "release/", "{1}-{0}")],
        vec![],
    );

    let resolved = resolve(&rules, &facts(Some("release/1.2"), &[])).unwrap();
    assert_eq!(resolved.version, "1.2-1.2");
}

#[test]
fn test_tag_whole_match_placeholder() {
    let rules = rules(vec![], vec![FormatDescription::new(r"v\d.*", "v", "{0}")]);

    let resolved = resolve(&rules, &facts(None, &["v2.0.1"])).unwrap();
    assert_eq!(resolved.ref_type, RefType::Tag);
    assert_eq!(resolved.version, "2.0.1");
}

#[test]
fn test_first_matching_branch_rule_wins() {
    let rules = rules(
        vec![
            FormatDescription::new("main", "", "{version.release}"),
            FormatDescription::new(".*", "", "{branch}-SNAPSHOT"),
            FormatDescription::new("main", "", "never"),
        ],
        vec![],
    );

    assert_eq!(
        resolve(&rules, &facts(Some("main"), &[])).unwrap().version,
        "1.0.0"
    );
    assert_eq!(
        resolve(&rules, &facts(Some("develop"), &[])).unwrap().version,
        "develop-SNAPSHOT"
    );
}

#[test]
fn test_branch_wins_over_tags() {
    let rules = PatternRuleSet::default();
    let resolved = resolve(&rules, &facts(Some("main"), &["v2.0"])).unwrap();
    assert_eq!(resolved.ref_type, RefType::Branch);
    assert_eq!(resolved.version, "main-SNAPSHOT");
}

#[test]
fn test_slash_in_version_is_escaped() {
    let rules = PatternRuleSet::default();
    let resolved = resolve(&rules, &facts(Some("feature/x"), &[])).unwrap();
    assert_eq!(resolved.version, "feature-x-SNAPSHOT");
    assert_eq!(resolved.ref_name, "feature/x");
}

// ============================================================================
// Tag rules
// ============================================================================

#[test]
fn test_highest_tag_version_wins() {
    let rules = rules(
        vec![],
        vec![FormatDescription::new(r"v\d+\.\d+", "v", "{tag}")],
    );

    let resolved = resolve(&rules, &facts(None, &["v1.0", "v1.10", "v1.2"])).unwrap();
    assert_eq!(resolved.ref_type, RefType::Tag);
    assert_eq!(resolved.ref_name, "v1.10");
    assert_eq!(resolved.version, "1.10");
}

#[test]
fn test_highest_tag_version_wins_without_prefix() {
    let rules = rules(vec![], vec![FormatDescription::new(r"v\d+\.\d+", "", "{tag}")]);

    let resolved = resolve(&rules, &facts(None, &["v1.2", "v1.10", "v1.0"])).unwrap();
    assert_eq!(resolved.ref_name, "v1.10");
    assert_eq!(resolved.version, "v1.10");
}

#[test]
fn test_release_tag_beats_snapshot_and_rc() {
    let rules = rules(vec![], vec![FormatDescription::new(r"v.*", "v", "{tag}")]);

    let resolved = resolve(
        &rules,
        &facts(None, &["v1.0-SNAPSHOT", "v1.0", "v1.0-rc1"]),
    )
    .unwrap();
    assert_eq!(resolved.ref_name, "v1.0");
}

#[test]
fn test_first_tag_rule_with_any_match_wins() {
    let rules = rules(
        vec![],
        vec![
            FormatDescription::new(r"release-.*", "release-", "{tag}"),
            FormatDescription::new(r"v.*", "v", "{tag}"),
        ],
    );

    // v9.0 is higher but its rule comes second
    let resolved = resolve(&rules, &facts(None, &["v9.0", "release-1.0"])).unwrap();
    assert_eq!(resolved.ref_name, "release-1.0");
    assert_eq!(resolved.version, "1.0");
}

#[test]
fn test_tag_capture_groups() {
    let rules = rules(
        vec![],
        vec![FormatDescription::new(
            r"v(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+)",
            "v",
            "{major}.{minor}.{patch}+{commit.short}",
        )],
    );

    let resolved = resolve(&rules, &facts(None, &["v2.3.4"])).unwrap();
    assert_eq!(resolved.version, "2.3.4+1a2b3c4");
}

// ============================================================================
// Overrides
// ============================================================================

#[test]
fn test_empty_provided_tag_suppresses_tags() {
    let rules = PatternRuleSet::default();

    let resolved = resolve_with(&rules, &facts(None, &["v1.0"]), &forced_tag("")).unwrap();
    assert_eq!(resolved.ref_type, RefType::Commit);
}

#[test]
fn test_empty_provided_tag_also_suppresses_branch() {
    let rules = PatternRuleSet::default();

    let resolved =
        resolve_with(&rules, &facts(Some("main"), &["v1.0"]), &forced_tag("")).unwrap();
    assert_eq!(resolved.ref_type, RefType::Commit);
}

#[test]
fn test_provided_tag_replaces_head_tags() {
    let rules = PatternRuleSet::default();

    let resolved =
        resolve_with(&rules, &facts(Some("main"), &["v1.0"]), &forced_tag("v5.0")).unwrap();
    assert_eq!(resolved.ref_type, RefType::Tag);
    assert_eq!(resolved.ref_name, "v5.0");
}

#[test]
fn test_provided_branch_replaces_head_branch() {
    let rules = PatternRuleSet::default();
    let overrides = RefOverrides {
        branch: Some("ci-build".to_string()),
        tag: None,
    };

    let resolved = resolve_with(&rules, &facts(None, &[]), &overrides).unwrap();
    assert_eq!(resolved.ref_type, RefType::Branch);
    assert_eq!(resolved.version, "ci-build-SNAPSHOT");
}

#[test]
fn test_empty_provided_branch_enables_tags() {
    let rules = PatternRuleSet::default();
    let overrides = RefOverrides {
        branch: Some(String::new()),
        tag: None,
    };

    let resolved = resolve_with(&rules, &facts(Some("main"), &["v1.0"]), &overrides).unwrap();
    assert_eq!(resolved.ref_type, RefType::Tag);
    assert_eq!(resolved.version, "v1.0");
}

// ============================================================================
// Placeholders and errors
// ============================================================================

#[test]
fn test_version_and_release_version_together() {
    let rules = rules(
        vec![FormatDescription::new(".*", "", "{version}+{version.release}")],
        vec![],
    );
    let bouncer = LogBouncer::new();

    let resolved = VersionResolver::new(&rules, &bouncer)
        .resolve(
            &gav("2.0-SNAPSHOT"),
            &facts(Some("main"), &[]),
            &RefOverrides::default(),
        )
        .unwrap();
    assert_eq!(resolved.version, "2.0-SNAPSHOT+2.0");
}

#[test]
fn test_unknown_placeholder_always_fails() {
    let bad = "{version}-{unknownPlaceholder}";
    let rules = PatternRuleSet::new(
        FormatDescription::new(".*", "", bad),
        vec![FormatDescription::new("main", "", bad)],
        vec![FormatDescription::new(".*", "", bad)],
    );

    for facts in [
        facts(Some("main"), &[]),
        facts(None, &["v1.0"]),
        facts(None, &[]),
    ] {
        let err = resolve(&rules, &facts).unwrap_err();
        assert!(
            matches!(err, GitVersioningError::Template { .. }),
            "expected template error, got {:?}",
            err
        );
    }
}

#[test]
fn test_unmatched_optional_group_is_unknown() {
    let rules = rules(
        vec![FormatDescription::new(
            r"feature/(?P<ticket>[A-Z]+-\d+)?.*",
            "",
            "{ticket}",
        )],
        vec![],
    );

    let err = resolve(&rules, &facts(Some("feature/cleanup"), &[])).unwrap_err();
    assert!(matches!(err, GitVersioningError::Template { .. }));

    let ok = resolve(&rules, &facts(Some("feature/ABC-12-login"), &[])).unwrap();
    assert_eq!(ok.version, "ABC-12");
}

#[test]
fn test_missing_declared_version_is_configuration_error() {
    let rules = PatternRuleSet::default();
    let bouncer = LogBouncer::new();
    let gav = Gav::new("org.example", "app", None);

    let err = VersionResolver::new(&rules, &bouncer)
        .resolve(&gav, &facts(Some("main"), &[]), &RefOverrides::default())
        .unwrap_err();
    assert!(matches!(err, GitVersioningError::MissingVersion { .. }));
}

#[test]
fn test_invalid_pattern_only_fails_when_reached() {
    let rules = rules(
        vec![
            FormatDescription::new("main", "", "{branch}"),
            FormatDescription::new("(broken", "", "{branch}"),
        ],
        vec![],
    );

    assert!(resolve(&rules, &facts(Some("main"), &[])).is_ok());
    let err = resolve(&rules, &facts(Some("develop"), &[])).unwrap_err();
    assert!(matches!(err, GitVersioningError::Pattern { .. }));
}

#[test]
fn test_resolution_is_idempotent() {
    let rules = PatternRuleSet::default();
    let facts = facts(None, &["v1.0", "v1.1"]);

    let first = resolve(&rules, &facts).unwrap();
    let second = resolve(&rules, &facts).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
