use crate::artifacts::errors::KnotError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, SlimCommit};
use crate::artifacts::objects::digest::Digest;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_kind::ObjectKind;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

/// Content-addressable object store rooted at `.knot/objects`.
///
/// Blobs and commits live in separate bucket directories; within a bucket an
/// object's digest decides its shard directory and file name. Content is
/// stored verbatim, so the digest of an object is always the SHA-1 of the
/// exact bytes on disk.
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

// TODO: garbage-collect objects unreachable from any ref (amend leaves them behind)
impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Load the raw bytes of an object from its namespace.
    pub fn load(&self, kind: ObjectKind, digest: &Digest) -> anyhow::Result<Bytes> {
        let object_path = self.object_path(kind, digest);

        if !object_path.exists() {
            return Err(KnotError::ObjectNotFound(digest.to_string()).into());
        }

        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Ok(Bytes::from(object_content))
    }

    /// Store an object in its namespace, keyed by content digest.
    ///
    /// Writing identical content twice is a no-op beyond the first write.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<Digest> {
        let digest = object.digest()?;
        let object_path = self.object_path(object.kind(), &digest);

        // write the object to disk unless it already exists
        // otherwise, create the shard directory first
        if !object_path.exists() {
            std::fs::create_dir_all(
                object_path
                    .parent()
                    .context(format!("Invalid object path {}", object_path.display()))?,
            )
            .context(format!(
                "Unable to create object directory {}",
                object_path.display()
            ))?;

            self.write_object(object_path, object.serialize()?)?;
        }

        Ok(digest)
    }

    pub fn exists(&self, kind: ObjectKind, digest: &Digest) -> bool {
        self.object_path(kind, digest).exists()
    }

    pub fn parse_blob(&self, digest: &Digest) -> anyhow::Result<Blob> {
        let content = self.load(ObjectKind::Blob, digest)?;
        Blob::deserialize(Cursor::new(content))
    }

    pub fn parse_commit(&self, digest: &Digest) -> anyhow::Result<Commit> {
        let content = self.load(ObjectKind::Commit, digest)?;
        Commit::deserialize(Cursor::new(content))
    }

    /// Load only the lineage of a commit, for graph walks.
    pub fn parse_slim_commit(&self, digest: &Digest) -> anyhow::Result<SlimCommit> {
        let commit = self.parse_commit(digest)?;

        Ok(SlimCommit {
            digest: digest.clone(),
            parents: commit.parents().to_vec(),
        })
    }

    fn object_path(&self, kind: ObjectKind, digest: &Digest) -> PathBuf {
        self.path.join(kind.bucket()).join(digest.to_path())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file onto the object path to make the write atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    /// Find all digests in a namespace starting with the given prefix.
    ///
    /// Used to resolve abbreviated digests to their full form; more than one
    /// match means the prefix is ambiguous.
    ///
    /// A prefix of 2+ characters pins the shard directory; anything shorter
    /// has to scan every shard.
    pub fn find_by_prefix(&self, kind: ObjectKind, prefix: &str) -> anyhow::Result<Vec<Digest>> {
        let mut matches = Vec::new();
        let bucket_path = self.path.join(kind.bucket());

        if prefix.len() >= 2 {
            let shard_path = bucket_path.join(&prefix[..2]);
            Self::scan_shard(&shard_path, prefix, &mut matches)?;
        } else {
            for i in 0..=255 {
                let shard_path = bucket_path.join(format!("{:02x}", i));
                Self::scan_shard(&shard_path, prefix, &mut matches)?;
            }
        }

        Ok(matches)
    }

    fn scan_shard(
        shard_path: &Path,
        prefix: &str,
        matches: &mut Vec<Digest>,
    ) -> anyhow::Result<()> {
        if !shard_path.is_dir() {
            return Ok(());
        }

        for entry in std::fs::read_dir(shard_path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let file_name_str = file_name.to_string_lossy();

            // shard files carry the full digest as their name
            if file_name_str.starts_with(prefix) {
                if let Ok(digest) = Digest::try_parse(file_name_str.to_string()) {
                    matches.push(digest);
                }
            }
        }

        Ok(())
    }
}
