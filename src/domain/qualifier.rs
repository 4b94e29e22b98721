//! Release qualifiers and their ordering
//!
//! Qualifiers are the alphabetic parts of a version such as `alpha`, `rc` or `SNAPSHOT`.
//! Known qualifiers order as
//! `alpha < beta < milestone < rc < snapshot < (release) < sp`,
//! unknown qualifiers sort after all known ones, lexically among each other.

use std::fmt;

/// A single version qualifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Qualifier {
    Alpha,
    Beta,
    Milestone,
    /// `rc` or its alias `cr`
    ReleaseCandidate,
    Snapshot,
    /// The empty qualifier and its aliases `ga`, `final` and `release`
    Release,
    /// Service pack, ordered after the plain release
    ServicePack,
    /// Any other qualifier
    Custom(String),
}

impl Qualifier {
    /// Parse a qualifier token.
    ///
    /// `followed_by_digit` enables the short forms `a1`, `b1` and `m1`
    /// for alpha, beta and milestone.
    pub fn parse(token: &str, followed_by_digit: bool) -> Self {
        let token = token.to_lowercase();

        if followed_by_digit && token.len() == 1 {
            match token.as_str() {
                "a" => return Qualifier::Alpha,
                "b" => return Qualifier::Beta,
                "m" => return Qualifier::Milestone,
                _ => {}
            }
        }

        match token.as_str() {
            "alpha" => Qualifier::Alpha,
            "beta" => Qualifier::Beta,
            "milestone" => Qualifier::Milestone,
            "rc" | "cr" => Qualifier::ReleaseCandidate,
            "snapshot" => Qualifier::Snapshot,
            "" | "ga" | "final" | "release" => Qualifier::Release,
            "sp" => Qualifier::ServicePack,
            _ => Qualifier::Custom(token),
        }
    }

    /// A release qualifier carries no information and is dropped from the end of a version
    pub fn is_release(&self) -> bool {
        matches!(self, Qualifier::Release)
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Qualifier::Alpha => write!(f, "alpha"),
            Qualifier::Beta => write!(f, "beta"),
            Qualifier::Milestone => write!(f, "milestone"),
            Qualifier::ReleaseCandidate => write!(f, "rc"),
            Qualifier::Snapshot => write!(f, "snapshot"),
            Qualifier::Release => Ok(()),
            Qualifier::ServicePack => write!(f, "sp"),
            Qualifier::Custom(s) => write!(f, "{}", s),
        }
    }
}
