use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::errors::KnotError;
use crate::artifacts::merge::TreeMerge;
use crate::artifacts::merge::base_finder::BaseFinder;
use std::path::Path;

impl Repository {
    pub fn merge(&mut self, branch_name: &str, message: &str) -> anyhow::Result<()> {
        let branch = BranchName::try_parse(branch_name.to_string())?;
        if !self.refs().branch_exists(&branch) {
            return Err(KnotError::BranchNotFound(branch.to_string()).into());
        }

        let current_digest = self.refs().resolve_head()?;
        let incoming_digest = self.refs().read_branch(&branch)?;

        // Find the merge base along the first-parent chains
        let database = self.database();
        let base_digest = BaseFinder::new(|digest| database.parse_slim_commit(digest))
            .find_base(&current_digest, &incoming_digest)?
            .ok_or_else(|| {
                anyhow::anyhow!("no common ancestor found between HEAD and '{branch}'")
            })?;

        let base = self.database().parse_commit(&base_digest)?;
        let current = self.database().parse_commit(&current_digest)?;
        let incoming = self.database().parse_commit(&incoming_digest)?;

        let mut tree_merge = TreeMerge::new(self.database());
        tree_merge.merge_trees(base.files(), current.files(), incoming.files())?;

        // only content the merge changed relative to the current checkout
        for (path, digest) in tree_merge.workdir_updates() {
            let blob = self.database().parse_blob(digest)?;
            self.workspace().write_file(Path::new(path), blob.content())?;
        }

        let files = tree_merge.into_files();
        self.write_commit(vec![current_digest, incoming_digest], files, message)?;

        Ok(())
    }
}
