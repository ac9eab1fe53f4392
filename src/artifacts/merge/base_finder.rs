//! Merge base finder
//!
//! Determines the base commit for a three-way merge by walking first-parent
//! chains only.
//!
//! ## Algorithm
//!
//! 1. Walk the first-parent chain of the current commit, the tip included,
//!    down to the root, collecting every digest into a visited set.
//! 2. Walk the first-parent chain of the incoming commit the same way; the
//!    first digest already in the visited set is the merge base.
//!
//! Because second parents are never followed, a history containing merge
//! commits can resolve to an older ancestor than the true lowest common
//! ancestor; merge classification downstream is defined against exactly this
//! base. Starting each walk at the tip itself means merging an
//! ancestor/descendant pair resolves to the older commit instead of
//! manufacturing conflicts.
//!
//! Two commits of the same repository always share the root commit, so a
//! missing base signals disjoint histories and is left to the caller to
//! report.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let finder = BaseFinder::new(|digest| database.parse_slim_commit(digest));
//!
//! let base = finder.find_base(&current, &incoming)?;
//! ```

use crate::artifacts::merge::debug_log;
use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::digest::Digest;
use std::collections::HashSet;

/// Finds the merge base of two commits.
///
/// The finder takes a generic function that loads the lineage of any given
/// commit, keeping it independent of the storage backend: production code
/// hands it the object database, unit tests an in-memory map.
#[derive(Debug, Clone)]
pub struct BaseFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&Digest) -> anyhow::Result<SlimCommit>,
{
    /// Function to load commit lineage for any given digest
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> BaseFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&Digest) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Find the merge base of `current` and `incoming`.
    ///
    /// Both walks include the tip itself, so if one commit is an ancestor of
    /// the other the ancestor is the base. `Ok(None)` means the two commits
    /// share no history at all.
    pub fn find_base(
        &self,
        current: &Digest,
        incoming: &Digest,
    ) -> anyhow::Result<Option<Digest>> {
        let mut visited = HashSet::new();

        let mut cursor = Some(current.clone());
        while let Some(digest) = cursor {
            let commit = (self.commit_loader)(&digest)?;
            debug_log!("visited {} from the current side", digest);

            cursor = commit.first_parent().cloned();
            visited.insert(digest);
        }

        let mut cursor = Some(incoming.clone());
        while let Some(digest) = cursor {
            if visited.contains(&digest) {
                debug_log!("merge base found at {}", digest);
                return Ok(Some(digest));
            }

            let commit = (self.commit_loader)(&digest)?;
            cursor = commit.first_parent().cloned();
        }

        Ok(None)
    }
}
