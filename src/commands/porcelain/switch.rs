use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::Checkout;
use crate::artifacts::errors::KnotError;
use std::io::Write;

impl Repository {
    pub fn switch(&mut self, branch_name: &str, create: bool) -> anyhow::Result<()> {
        let branch = BranchName::try_parse(branch_name.to_string())?;

        if create {
            // the new branch starts at HEAD, so no tree migration is needed
            let head_digest = self.refs().resolve_head()?;
            self.refs().create_branch(&branch, &head_digest)?;
            self.refs().attach_head(&branch)?;

            writeln!(self.writer(), "Switched to a new branch '{branch}'")?;

            return Ok(());
        }

        if !self.refs().branch_exists(&branch) {
            return Err(KnotError::BranchNotFound(branch.to_string()).into());
        }

        if self.refs().is_current_branch(&branch)? {
            writeln!(self.writer(), "Already on '{branch}'")?;

            return Ok(());
        }

        let previous_digest = self.refs().resolve_head()?;
        let target_digest = self.refs().read_branch(&branch)?;

        let tracked = self.database().parse_commit(&previous_digest)?.into_files();
        let files = self.database().parse_commit(&target_digest)?.into_files();

        Checkout::new(self.workspace(), self.database()).migrate(&tracked, &files)?;

        self.refs().attach_head(&branch)?;

        writeln!(self.writer(), "Switched to branch '{branch}'")?;

        Ok(())
    }
}
