use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_kind::ObjectKind;
use anyhow::Context;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;

const DEFAULT_BRANCH: &str = "master";

impl Repository {
    pub fn init(&mut self) -> anyhow::Result<()> {
        if self.state_path().exists() {
            anyhow::bail!(
                "A knot repository already exists in {}",
                self.path().display()
            );
        }

        fs::create_dir_all(self.database().objects_path().join(ObjectKind::Blob.bucket()))
            .context("Failed to create .knot/objects/blobs directory")?;

        fs::create_dir_all(
            self.database()
                .objects_path()
                .join(ObjectKind::Commit.bucket()),
        )
        .context("Failed to create .knot/objects/commits directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .knot/refs/heads directory")?;

        // the root commit every first-parent chain terminates at
        let root = Commit::new(
            Vec::new(),
            BTreeMap::new(),
            Author::load_from_env(),
            "initial commit".to_string(),
        );
        let root_digest = self.database().store(&root)?;

        let default_branch = BranchName::try_parse(DEFAULT_BRANCH.to_string())?;
        self.refs()
            .create_branch(&default_branch, &root_digest)
            .context("Failed to create default branch")?;
        self.refs()
            .attach_head(&default_branch)
            .context("Failed to create initial HEAD reference")?;

        // create the index file if it does not exist
        let index = self.index();
        if !index.path().exists() {
            fs::write(index.path(), b"").context("Failed to create .knot/index file")?;
        }

        write!(
            self.writer(),
            "Initialized empty Knot repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
