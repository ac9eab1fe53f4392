//! Three-way merge over commit file maps
//!
//! A merge combines two commit snapshots against their merge base. Every path
//! in the union of both sides falls into one of four classes:
//!
//! - unique to one side: carried through unchanged
//! - identical on both sides: carried through unchanged
//! - diverged on one side only: the changed side wins
//! - diverged on both sides: conflict
//!
//! Conflicts are not resolved interactively. The two blobs are concatenated
//! with [`CONFLICT_SEPARATOR`] between them and stored as a new blob; the
//! merge commit records the concatenated digest and the working directory
//! receives the concatenated content for manual cleanup.
//!
//! The merge base comes from [`base_finder::BaseFinder`], which follows first
//! parents only.

pub mod base_finder;

use crate::areas::database::Database;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::digest::Digest;
use bitflags::bitflags;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Macro for debug logging that is enabled with the debug_merge feature flag
///
/// # Usage
/// ```rust,ignore
/// debug_log!("Processing commit {}", digest);
/// ```
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            eprintln!($($arg)*);
        }
    };
}

pub(crate) use debug_log;

/// Marker inserted between the two sides of a conflicting file.
pub const CONFLICT_SEPARATOR: &[u8] =
    b"\n==========================================================================\n";

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq)]
    struct ChangedSide: u8 {
        const NONE = 0b00;
        const CURRENT = 0b01;
        const INCOMING = 0b10;
        const BOTH = Self::CURRENT.bits() | Self::INCOMING.bits();
    }
}

impl fmt::Debug for ChangedSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(ChangedSide::CURRENT) {
            flags.push("CURRENT");
        }
        if self.contains(ChangedSide::INCOMING) {
            flags.push("INCOMING");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

impl fmt::Display for ChangedSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Merges two commit file maps against their common ancestor.
///
/// The merge is computed path by path over digests; file content is only
/// touched for conflicting paths, where both blobs are loaded, concatenated
/// and stored back as a new blob.
///
/// Results accumulate in the instance: the merged file map for the merge
/// commit, the subset of paths whose content must be written to the working
/// directory, and the list of conflicting paths.
pub struct TreeMerge<'r> {
    database: &'r Database,
    files: BTreeMap<String, Digest>,
    workdir_updates: BTreeMap<String, Digest>,
    conflicts: Vec<String>,
}

impl<'r> TreeMerge<'r> {
    pub fn new(database: &'r Database) -> Self {
        Self {
            database,
            files: BTreeMap::new(),
            workdir_updates: BTreeMap::new(),
            conflicts: Vec::new(),
        }
    }

    /// Classify every path in the union of `current` and `incoming` against
    /// `base` and accumulate the merge result.
    ///
    /// The working directory is assumed to hold the `current` side, so only
    /// incoming winners, conflict results and paths unique to the incoming
    /// side end up in the write set.
    pub fn merge_trees(
        &mut self,
        base: &BTreeMap<String, Digest>,
        current: &BTreeMap<String, Digest>,
        incoming: &BTreeMap<String, Digest>,
    ) -> anyhow::Result<()> {
        let paths: BTreeSet<&String> = current.keys().chain(incoming.keys()).collect();

        for path in paths {
            match (current.get(path), incoming.get(path)) {
                (Some(ours), Some(theirs)) if ours == theirs => {
                    self.files.insert(path.clone(), ours.clone());
                }
                (Some(ours), Some(theirs)) => {
                    self.classify_divergence(base, path, ours, theirs)?;
                }
                (Some(ours), None) => {
                    self.files.insert(path.clone(), ours.clone());
                }
                (None, Some(theirs)) => {
                    self.files.insert(path.clone(), theirs.clone());
                    self.workdir_updates.insert(path.clone(), theirs.clone());
                }
                (None, None) => unreachable!(),
            }
        }

        Ok(())
    }

    /// Settle a path that is present on both sides with differing digests.
    fn classify_divergence(
        &mut self,
        base: &BTreeMap<String, Digest>,
        path: &str,
        ours: &Digest,
        theirs: &Digest,
    ) -> anyhow::Result<()> {
        let ancestor = base.get(path);

        let mut side = ChangedSide::NONE;
        if ancestor != Some(ours) {
            side |= ChangedSide::CURRENT;
        }
        if ancestor != Some(theirs) {
            side |= ChangedSide::INCOMING;
        }

        debug_log!("{path} diverged on {side}");

        if side == ChangedSide::CURRENT {
            self.files.insert(path.to_string(), ours.clone());
        } else if side == ChangedSide::INCOMING {
            self.files.insert(path.to_string(), theirs.clone());
            self.workdir_updates.insert(path.to_string(), theirs.clone());
        } else {
            // neither side matches the ancestor, or the ancestor never had it
            let merged = self.concatenate_blobs(ours, theirs)?;
            self.files.insert(path.to_string(), merged.clone());
            self.workdir_updates.insert(path.to_string(), merged);
            self.conflicts.push(path.to_string());
        }

        Ok(())
    }

    /// Join both sides of a conflict into one blob and store it.
    fn concatenate_blobs(&self, ours: &Digest, theirs: &Digest) -> anyhow::Result<Digest> {
        let current_blob = self.database.parse_blob(ours)?;
        let incoming_blob = self.database.parse_blob(theirs)?;

        let mut merged = Vec::with_capacity(
            current_blob.content().len() + CONFLICT_SEPARATOR.len() + incoming_blob.content().len(),
        );
        merged.extend_from_slice(current_blob.content());
        merged.extend_from_slice(CONFLICT_SEPARATOR);
        merged.extend_from_slice(incoming_blob.content());

        self.database.store(&Blob::new(Bytes::from(merged)))
    }

    /// The merged file map, destined for the merge commit.
    pub fn files(&self) -> &BTreeMap<String, Digest> {
        &self.files
    }

    pub fn into_files(self) -> BTreeMap<String, Digest> {
        self.files
    }

    /// Paths whose content changed relative to the current checkout.
    pub fn workdir_updates(&self) -> &BTreeMap<String, Digest> {
        &self.workdir_updates
    }

    pub fn conflicts(&self) -> &[String] {
        &self.conflicts
    }
}
