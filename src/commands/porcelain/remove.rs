use crate::areas::repository::Repository;

impl Repository {
    /// Stage paths for removal from the next commit.
    ///
    /// Working files are left alone; only the staging area records the
    /// intent. At commit time a staged removal wins over a staged addition
    /// of the same path.
    pub fn remove(&mut self, paths: &[String]) -> anyhow::Result<()> {
        self.index_mut().rehydrate()?;

        for path in paths {
            self.index_mut().remove(path.clone());
        }

        self.index_mut().write_updates()?;

        Ok(())
    }
}
