use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    pub fn empty(&mut self) -> anyhow::Result<()> {
        self.index_mut().clear();
        self.index_mut().write_updates()?;

        writeln!(self.writer(), "Staging area emptied.")?;

        Ok(())
    }
}
