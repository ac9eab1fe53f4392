use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::checkout::Checkout;
use crate::artifacts::objects::digest::Digest;
use std::io::Write;

const DETACHMENT_NOTICE: &str = r#"
You are in 'detached HEAD' state. You can look around, make experimental
changes and commit them, and you can discard any commits you make in this
state without impacting any branches by performing another checkout.

If you want to create a new branch to retain commits you create, you may
do so (now or later) by using the branch command. Example:

    knot branch <new-branch-name>
"#;

impl Repository {
    pub fn checkout(&mut self, target: &str) -> anyhow::Result<()> {
        let previous_head = self.refs().read_head()?;
        let previous_digest = self.refs().resolve_head()?;

        let target_digest = Revision::try_parse(target)?.resolve(self)?;

        let tracked = self.database().parse_commit(&previous_digest)?.into_files();
        let files = self.database().parse_commit(&target_digest)?.into_files();

        Checkout::new(self.workspace(), self.database()).migrate(&tracked, &files)?;

        // moving to a revision always detaches, even when it named a branch tip
        self.refs().detach_head(&target_digest)?;

        self.print_previous_head(&previous_head, &previous_digest, &target_digest)?;
        self.print_detachment_notice(&previous_head, target)?;
        self.print_head_position("HEAD is now at", &target_digest)?;

        Ok(())
    }

    fn print_previous_head(
        &self,
        previous_head: &Head,
        previous_digest: &Digest,
        target_digest: &Digest,
    ) -> anyhow::Result<()> {
        if matches!(previous_head, Head::Detached(_)) && previous_digest != target_digest {
            self.print_head_position("Previous HEAD position was", previous_digest)?;
        }

        Ok(())
    }

    fn print_detachment_notice(&self, previous_head: &Head, target: &str) -> anyhow::Result<()> {
        if matches!(previous_head, Head::Attached { .. }) {
            writeln!(
                self.writer(),
                "Note: checking out '{target}'.\n{DETACHMENT_NOTICE}"
            )?;
        }

        Ok(())
    }

    fn print_head_position(&self, message: &str, digest: &Digest) -> anyhow::Result<()> {
        let commit = self.database().parse_commit(digest)?;

        writeln!(
            self.writer(),
            "{} {} {}",
            message,
            digest.short(),
            commit.short_message()
        )?;

        Ok(())
    }
}
