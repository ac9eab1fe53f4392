//! Working tree status inspection
//!
//! Compares three sources of truth for every file:
//! - the working directory scan, ignore rules applied
//! - the staging area
//! - the HEAD commit's file map
//!
//! and sorts the results into five buckets: staged additions, staged
//! removals, tracked unmodified, tracked modified and untracked.

use crate::areas::index::Index;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::digest::Digest;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

/// Status buckets, each sorted by path.
///
/// A path staged for addition or removal appears only in its staged bucket,
/// whatever its on-disk state; the remaining buckets partition the rest of
/// the working tree.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StatusReport {
    /// Staged additions: path to staged blob digest
    pub additions: BTreeMap<String, Digest>,
    /// Staged removals
    pub removals: BTreeSet<String>,
    /// Tracked files, not staged, identical to the HEAD commit
    pub unmodified: Vec<String>,
    /// Tracked files, not staged, with local changes
    pub modified: Vec<String>,
    /// Files neither staged nor tracked
    pub untracked: Vec<String>,
}

/// Builds a [`StatusReport`] from the working tree.
#[derive(new)]
pub struct Inspector<'r> {
    workspace: &'r Workspace,
}

impl Inspector<'_> {
    /// Scan the workspace and classify every file against the staging area
    /// and the `tracked` file map of the HEAD commit.
    pub fn report(
        &self,
        index: &Index,
        tracked: &BTreeMap<String, Digest>,
    ) -> anyhow::Result<StatusReport> {
        let mut report = StatusReport {
            additions: index.additions().clone(),
            removals: index.removals().clone(),
            ..Default::default()
        };

        for path in self.workspace.list_files(None)? {
            let name = path.to_string_lossy().to_string();

            if report.additions.contains_key(&name) || report.removals.contains(&name) {
                continue;
            }

            match tracked.get(&name) {
                Some(digest) => {
                    let content = self.workspace.read_file(&path)?;

                    if &Digest::over(&content) == digest {
                        report.unmodified.push(name);
                    } else {
                        report.modified.push(name);
                    }
                }
                None => report.untracked.push(name),
            }
        }

        report.unmodified.sort();
        report.modified.sort();
        report.untracked.sort();

        Ok(report)
    }
}
