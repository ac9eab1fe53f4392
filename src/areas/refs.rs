//! References and HEAD
//!
//! Branches are mutable named pointers to commits, one text file per branch
//! under `refs/heads/`. HEAD is a single file with two states:
//! - Attached: `ref: refs/heads/<branch>`, resolving through the branch file
//! - Detached: `<digest>`, resolving directly
//!
//! Every ref update is written to a temp file in the target directory and
//! renamed into place.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::errors::KnotError;
use crate::artifacts::objects::digest::Digest;
use anyhow::Context;
use derive_new::new;
use fake::rand;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use walkdir::WalkDir;

/// Regex pattern for parsing an attached HEAD file
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Branch reference directory inside the state directory
const HEADS_PREFIX: &str = "refs/heads";

/// Where HEAD points: a branch by name, or a commit directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    Attached { branch: BranchName },
    Detached(Digest),
}

impl Head {
    fn parse(content: &str) -> anyhow::Result<Self> {
        let content = content.trim();

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        match symref_match {
            Some(symref_match) => {
                let branch = symref_match[1]
                    .strip_prefix(&format!("{HEADS_PREFIX}/"))
                    .with_context(|| format!("unexpected HEAD target {:?}", &symref_match[1]))?;
                Ok(Head::Attached {
                    branch: BranchName::try_parse(branch.to_string())?,
                })
            }
            None => Ok(Head::Detached(Digest::try_parse(content.to_string())?)),
        }
    }

    fn to_file_content(&self) -> String {
        match self {
            Head::Attached { branch } => format!("ref: {HEADS_PREFIX}/{branch}"),
            Head::Detached(digest) => digest.to_string(),
        }
    }
}

/// Reference manager rooted at the state directory (typically `.knot`).
#[derive(Debug, new)]
pub struct Refs {
    path: Box<Path>,
}

impl Refs {
    /// Read the HEAD state
    ///
    /// HEAD exists from init onward; a missing or unparsable file is a fatal
    /// inconsistency.
    pub fn read_head(&self) -> anyhow::Result<Head> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD file at {:?}", head_path))?;

        Head::parse(&content)
    }

    /// Resolve HEAD to the commit digest it currently points at
    pub fn resolve_head(&self) -> anyhow::Result<Digest> {
        match self.read_head()? {
            Head::Attached { branch } => self.read_branch(&branch),
            Head::Detached(digest) => Ok(digest),
        }
    }

    /// The branch HEAD is attached to, if any
    pub fn current_branch(&self) -> anyhow::Result<Option<BranchName>> {
        match self.read_head()? {
            Head::Attached { branch } => Ok(Some(branch)),
            Head::Detached(_) => Ok(None),
        }
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<bool> {
        Ok(self.current_branch()?.as_ref() == Some(branch_name))
    }

    /// Attach HEAD to a branch
    pub fn attach_head(&self, branch: &BranchName) -> anyhow::Result<()> {
        let head = Head::Attached {
            branch: branch.clone(),
        };
        self.write_ref_file(self.head_path(), head.to_file_content())
    }

    /// Detach HEAD at a commit
    pub fn detach_head(&self, digest: &Digest) -> anyhow::Result<()> {
        self.write_ref_file(self.head_path(), Head::Detached(digest.clone()).to_file_content())
    }

    /// Move the currently resolved ref to a new commit
    ///
    /// Attached HEAD moves the branch file and stays attached; detached HEAD
    /// moves itself. This is the advance rule shared by commit, merge, revert
    /// and reset.
    pub fn advance_head(&self, digest: &Digest) -> anyhow::Result<()> {
        match self.read_head()? {
            Head::Attached { branch } => self.update_branch(&branch, digest),
            Head::Detached(_) => self.detach_head(digest),
        }
    }

    /// Read the commit digest a branch points at
    pub fn read_branch(&self, name: &BranchName) -> anyhow::Result<Digest> {
        let branch_path = self.branch_path(name);

        if !branch_path.exists() {
            return Err(KnotError::BranchNotFound(name.to_string()).into());
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("failed to read ref file at {:?}", branch_path))?;

        Digest::try_parse(content.trim().to_string())
    }

    pub fn branch_exists(&self, name: &BranchName) -> bool {
        self.branch_path(name).exists()
    }

    pub fn create_branch(&self, name: &BranchName, source: &Digest) -> anyhow::Result<()> {
        let branch_path = self.branch_path(name);

        // refuse to clobber an existing branch
        if branch_path.exists() {
            anyhow::bail!("branch {} already exists", name);
        }

        self.write_ref_file(branch_path, source.to_string())
    }

    pub fn update_branch(&self, name: &BranchName, target: &Digest) -> anyhow::Result<()> {
        self.write_ref_file(self.branch_path(name), target.to_string())
    }

    /// Delete a branch reference and prune now-empty parent directories
    ///
    /// # Returns
    ///
    /// The digest the branch pointed at before deletion
    pub fn delete_branch(&self, name: &BranchName) -> anyhow::Result<Digest> {
        let branch_path = self.branch_path(name);

        if !branch_path.exists() {
            return Err(KnotError::BranchNotFound(name.to_string()).into());
        }

        let old_digest = self.read_branch(name)?;

        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;

        Ok(old_digest)
    }

    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();

        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                if entry.path().is_file() {
                    let relative_path = entry.path().strip_prefix(&heads_path).ok()?;
                    BranchName::try_parse(relative_path.to_string_lossy().to_string()).ok()
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();
        branches.sort();

        Ok(branches)
    }

    /// Map each referenced commit digest to the branches pointing at it
    ///
    /// Used for log decorations.
    pub fn reverse_refs(&self) -> anyhow::Result<HashMap<Digest, Vec<BranchName>>> {
        Ok(self
            .list_branches()?
            .into_iter()
            .fold(HashMap::new(), |mut acc, branch| {
                if let Ok(digest) = self.read_branch(&branch) {
                    acc.entry(digest).or_insert_with(Vec::new).push(branch);
                }
                acc
            }))
    }

    fn write_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        let parent = path
            .parent()
            .with_context(|| format!("invalid ref path {:?}", path))?;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create ref directory {:?}", parent))?;

        // write to a temp file in the target directory, then rename into place
        let temp_path = parent.join(Self::generate_temp_name());
        let mut temp_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("failed to open ref file at {:?}", temp_path))?;
        temp_file.write_all(raw_ref.as_bytes())?;

        std::fs::rename(&temp_path, &path)
            .with_context(|| format!("failed to update ref file at {:?}", path))?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {:?}", parent)
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join("HEAD").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.path.join(HEADS_PREFIX).into_boxed_path()
    }

    fn branch_path(&self, name: &BranchName) -> Box<Path> {
        self.heads_path().join(name.as_ref()).into_boxed_path()
    }
}
