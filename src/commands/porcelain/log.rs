use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::digest::Digest;
use colored::Colorize;
use std::collections::HashMap;
use std::io::Write;

impl Repository {
    /// Walk the first-parent chain from HEAD, newest commit first.
    pub fn log(&self) -> anyhow::Result<()> {
        let reverse_refs = self.refs().reverse_refs()?;
        let current_branch = self.refs().current_branch()?;
        let head_digest = self.refs().resolve_head()?;

        let mut cursor = Some(head_digest.clone());

        while let Some(digest) = cursor {
            let commit = self.database().parse_commit(&digest)?;
            let decoration = Self::commit_decoration(
                &digest,
                &head_digest,
                current_branch.as_ref(),
                &reverse_refs,
            );

            self.show_commit_medium(&digest, &commit, &decoration)?;
            writeln!(self.writer())?;

            // Move to the parent commit for the next iteration
            cursor = commit.parent().cloned();
        }

        Ok(())
    }

    fn show_commit_medium(
        &self,
        digest: &Digest,
        commit: &Commit,
        decoration: &str,
    ) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{}",
            format!("commit {digest}{decoration}").yellow()
        )?;
        writeln!(self.writer(), "Author: {}", commit.author().display_name())?;
        writeln!(
            self.writer(),
            "Date:   {}",
            commit.author().readable_timestamp()
        )?;
        writeln!(self.writer())?;
        for message_line in commit.message().lines() {
            writeln!(self.writer(), "    {message_line}")?;
        }

        Ok(())
    }

    /// `(HEAD -> branch)` / `(HEAD)` / `(branch, ...)` suffix for a commit,
    /// empty when nothing points at it.
    fn commit_decoration(
        digest: &Digest,
        head_digest: &Digest,
        current_branch: Option<&BranchName>,
        reverse_refs: &HashMap<Digest, Vec<BranchName>>,
    ) -> String {
        let mut names = Vec::new();

        if digest == head_digest {
            match current_branch {
                Some(branch) => names.push(format!("HEAD -> {branch}")),
                None => names.push("HEAD".to_string()),
            }
        }

        if let Some(branches) = reverse_refs.get(digest) {
            for branch in branches {
                // the attached branch already shows up behind the HEAD arrow
                if current_branch != Some(branch) {
                    names.push(branch.to_string());
                }
            }
        }

        if names.is_empty() {
            String::new()
        } else {
            format!(" ({})", names.join(", "))
        }
    }
}
