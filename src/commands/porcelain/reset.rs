use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::checkout::Checkout;
use std::io::Write;

impl Repository {
    pub fn reset(&mut self, target: &str) -> anyhow::Result<()> {
        let head_digest = self.refs().resolve_head()?;
        let target_digest = Revision::try_parse(target)?.resolve(self)?;

        let tracked = self.database().parse_commit(&head_digest)?.into_files();
        let target_commit = self.database().parse_commit(&target_digest)?;

        Checkout::new(self.workspace(), self.database()).migrate(&tracked, target_commit.files())?;

        // the currently resolved ref moves, everything it left behind stays stored
        self.refs().advance_head(&target_digest)?;

        self.index_mut().clear();
        self.index_mut().write_updates()?;

        writeln!(
            self.writer(),
            "HEAD is now at {} {}",
            target_digest.short(),
            target_commit.short_message()
        )?;

        Ok(())
    }
}
