//! Checkout engine
//!
//! Moves the working directory from one commit snapshot to another:
//! - Verifies that every tracked file is still exactly as recorded
//! - Writes the target snapshot's files to disk
//! - Deletes tracked files that do not exist at the target
//!
//! The safety gate runs before any mutation, so a dirty working tree aborts
//! the whole operation with zero side effects. The same engine runs under
//! checkout, switch, revert and reset.

use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::errors::{DirtyReason, KnotError};
use crate::artifacts::objects::digest::Digest;
use derive_new::new;
use std::collections::BTreeMap;
use std::path::Path;

/// Replaces one checked-out snapshot with another.
///
/// `tracked` is always the file map of the commit the repository believes is
/// on disk; `target` is the file map to move to.
#[derive(new)]
pub struct Checkout<'r> {
    workspace: &'r Workspace,
    database: &'r Database,
}

impl Checkout<'_> {
    /// Migrate the working directory from `tracked` to `target`.
    pub fn migrate(
        &self,
        tracked: &BTreeMap<String, Digest>,
        target: &BTreeMap<String, Digest>,
    ) -> anyhow::Result<()> {
        self.verify_clean(tracked)?;

        for (path, digest) in target {
            let blob = self.database.parse_blob(digest)?;
            self.workspace.write_file(Path::new(path), blob.content())?;
        }

        // files that do not exist at the target point in history are removed
        for path in tracked.keys() {
            if !target.contains_key(path) {
                self.workspace.delete_file(Path::new(path))?;
            }
        }

        Ok(())
    }

    /// Ensure every tracked file is present on disk with unchanged content.
    fn verify_clean(&self, tracked: &BTreeMap<String, Digest>) -> anyhow::Result<()> {
        for (path, digest) in tracked {
            if !self.workspace.file_exists(Path::new(path)) {
                return Err(KnotError::DirtyWorkingTree {
                    path: path.clone(),
                    reason: DirtyReason::Missing,
                }
                .into());
            }

            let content = self.workspace.read_file(Path::new(path))?;
            if &Digest::over(&content) != digest {
                return Err(KnotError::DirtyWorkingTree {
                    path: path.clone(),
                    reason: DirtyReason::Modified,
                }
                .into());
            }
        }

        Ok(())
    }
}
