use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::status::Inspector;
use colored::Colorize;
use std::io::Write;

// Bucket order: staged additions, staged removals, then the scan results
// (unmodified, modified, untracked). A staged path appears only in its
// staging bucket, never in the scan buckets.
impl Repository {
    pub fn status(&mut self) -> anyhow::Result<()> {
        self.index_mut().rehydrate()?;

        match self.refs().read_head()? {
            Head::Attached { branch } => writeln!(self.writer(), "On branch {branch}")?,
            Head::Detached(digest) => {
                writeln!(self.writer(), "HEAD detached at {}", digest.short())?
            }
        }

        let head_digest = self.refs().resolve_head()?;
        let tracked = self.database().parse_commit(&head_digest)?.into_files();

        let report = Inspector::new(self.workspace()).report(&self.index(), &tracked)?;

        for (path, digest) in &report.additions {
            writeln!(self.writer(), "{}", format!("{digest} {path}").green())?;
        }
        for path in &report.removals {
            writeln!(self.writer(), "{}", path.blue())?;
        }
        for path in &report.unmodified {
            writeln!(self.writer(), "{}", path.cyan())?;
        }
        for path in &report.modified {
            writeln!(self.writer(), "{}", path.yellow())?;
        }
        for path in &report.untracked {
            writeln!(self.writer(), "{}", path.red())?;
        }

        Ok(())
    }
}
