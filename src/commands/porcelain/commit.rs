use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::digest::Digest;
use std::collections::BTreeMap;
use std::io::Write;

impl Repository {
    pub fn commit(&mut self, message: &str, amend: bool) -> anyhow::Result<()> {
        let head_digest = self.refs().resolve_head()?;
        let head_commit = self.database().parse_commit(&head_digest)?;

        if amend {
            // same snapshot and lineage as HEAD, new message and timestamp;
            // the superseded commit object stays on disk untouched
            self.write_commit(
                head_commit.parents().to_vec(),
                head_commit.files().clone(),
                message,
            )?;

            return Ok(());
        }

        // Load the index file from the disk
        self.index_mut().rehydrate()?;

        if self.index().is_empty() {
            anyhow::bail!("nothing staged");
        }

        let mut files = head_commit.into_files();
        for (path, digest) in self.index().additions() {
            files.insert(path.clone(), digest.clone());
        }
        // a staged removal wins over a staged addition of the same path
        for path in self.index().removals() {
            files.remove(path);
        }

        self.write_commit(vec![head_digest], files, message)?;

        self.index_mut().clear();
        self.index_mut().write_updates()?;

        Ok(())
    }

    /// Store a commit, advance the current ref to it and confirm to the user.
    ///
    /// Shared by `commit`, `merge` and `revert`, which differ only in how
    /// they assemble the parents and the file map.
    pub(crate) fn write_commit(
        &mut self,
        parents: Vec<Digest>,
        files: BTreeMap<String, Digest>,
        message: &str,
    ) -> anyhow::Result<Digest> {
        let commit = Commit::new(
            parents,
            files,
            Author::load_from_env(),
            message.trim().to_string(),
        );
        let digest = self.database().store(&commit)?;

        self.refs().advance_head(&digest)?;

        let position = match self.refs().current_branch()? {
            Some(branch) => branch.to_string(),
            None => "HEAD".to_string(),
        };
        writeln!(
            self.writer(),
            "[{} {}] {}",
            position,
            digest.short(),
            commit.short_message()
        )?;

        Ok(digest)
    }
}
