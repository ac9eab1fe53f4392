use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::checkout::Checkout;

impl Repository {
    pub fn revert(&mut self, target: &str, message: Option<&str>) -> anyhow::Result<()> {
        let head_digest = self.refs().resolve_head()?;
        let target_digest = Revision::try_parse(target)?.resolve(self)?;

        let tracked = self.database().parse_commit(&head_digest)?.into_files();
        let files = self.database().parse_commit(&target_digest)?.into_files();

        Checkout::new(self.workspace(), self.database()).migrate(&tracked, &files)?;

        // history only moves forward: the restored snapshot rides a new commit
        let message = match message {
            Some(message) => message.to_string(),
            None => format!("Revert to {}", target_digest.short()),
        };

        self.write_commit(vec![head_digest], files, &message)?;

        Ok(())
    }
}
