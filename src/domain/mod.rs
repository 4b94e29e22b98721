//! Domain logic - pure value objects independent of git operations

pub mod coordinate;
pub mod qualifier;
pub mod reference;
pub mod version;

pub use coordinate::{Gav, GavGit};
pub use qualifier::Qualifier;
pub use reference::RefType;
pub use version::ArtifactVersion;
