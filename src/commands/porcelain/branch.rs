use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::errors::KnotError;
use colored::Colorize;
use std::io::Write;

impl Repository {
    pub fn branch(&mut self, name: Option<&str>, delete: bool) -> anyhow::Result<()> {
        if delete {
            return self.delete_named_branch(name);
        }

        match name {
            Some(name) => self.create_and_attach(name),
            None => self.print_branch_list(),
        }
    }

    fn create_and_attach(&mut self, name: &str) -> anyhow::Result<()> {
        let branch = BranchName::try_parse(name.to_string())?;
        let head_digest = self.refs().resolve_head()?;

        self.refs().create_branch(&branch, &head_digest)?;
        self.refs().attach_head(&branch)?;

        Ok(())
    }

    fn delete_named_branch(&mut self, name: Option<&str>) -> anyhow::Result<()> {
        let branch = match name {
            Some(name) => BranchName::try_parse(name.to_string())?,
            // no name defaults to the current branch, which is always in use
            None => match self.refs().current_branch()? {
                Some(branch) => {
                    return Err(KnotError::BranchInUse(branch.to_string()).into());
                }
                None => return Err(KnotError::AmbiguousCurrentBranch.into()),
            },
        };

        if self.refs().is_current_branch(&branch)? {
            return Err(KnotError::BranchInUse(branch.to_string()).into());
        }

        let tip = self.refs().delete_branch(&branch)?;

        writeln!(
            self.writer(),
            "Deleted branch {} (was {}).",
            branch,
            tip.short()
        )?;

        Ok(())
    }

    fn print_branch_list(&mut self) -> anyhow::Result<()> {
        if let Head::Detached(digest) = self.refs().read_head()? {
            writeln!(
                self.writer(),
                "{}",
                format!("* (HEAD detached at {})", digest.short()).green()
            )?;
        }

        let current_branch = self.refs().current_branch()?;

        for branch in self.refs().list_branches()? {
            if current_branch.as_ref() == Some(&branch) {
                writeln!(self.writer(), "* {}", branch.to_string().green())?;
            } else {
                writeln!(self.writer(), "  {branch}")?;
            }
        }

        Ok(())
    }
}
