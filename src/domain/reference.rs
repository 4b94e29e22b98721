use serde::Serialize;
use std::fmt;

/// Category of the ref a version was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RefType {
    Commit,
    Branch,
    Tag,
}

impl RefType {
    /// Placeholder key under which the winning ref name is exposed to version formats
    pub fn as_str(&self) -> &'static str {
        match self {
            RefType::Commit => "commit",
            RefType::Branch => "branch",
            RefType::Tag => "tag",
        }
    }
}

impl fmt::Display for RefType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
