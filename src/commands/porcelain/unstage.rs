use crate::areas::repository::Repository;
use crate::artifacts::errors::KnotError;
use std::io::Write;

impl Repository {
    pub fn unstage(&mut self, paths: &[String]) -> anyhow::Result<()> {
        self.index_mut().rehydrate()?;

        for path in paths {
            // a warning, not a failure: the rest of the batch still proceeds
            if !self.index_mut().unstage(path) {
                writeln!(self.writer(), "{}", KnotError::NotStaged(path.clone()))?;
            }
        }

        self.index_mut().write_updates()?;

        Ok(())
    }
}
