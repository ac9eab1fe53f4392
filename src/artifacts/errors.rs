//! Failure conditions reported to the user.
//!
//! Every recoverable failure a command can hit is one of these kinds. They
//! travel through `anyhow` context chains, so callers (and tests) can
//! `downcast_ref::<KnotError>()` to match on the kind while the CLI prints
//! the rendered message.

use thiserror::Error;

/// Why a tracked file blocks a checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirtyReason {
    /// The file no longer exists on disk
    Missing,
    /// The file's content differs from the recorded digest
    Modified,
}

impl std::fmt::Display for DirtyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DirtyReason::Missing => write!(f, "is missing"),
            DirtyReason::Modified => write!(f, "has uncommitted changes"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KnotError {
    #[error("Object {0} not found in the store")]
    ObjectNotFound(String),

    #[error("Commit not found for revision '{0}'")]
    CommitNotFound(String),

    #[error("Branch '{0}' does not exist")]
    BranchNotFound(String),

    #[error("Cannot delete branch '{0}' because HEAD is attached to it")]
    BranchInUse(String),

    #[error("Cannot default to the current branch because HEAD is detached")]
    AmbiguousCurrentBranch,

    #[error("Unable to checkout: tracked file {path} {reason}")]
    DirtyWorkingTree { path: String, reason: DirtyReason },

    #[error("Nothing staged for {0}")]
    NotStaged(String),
}
