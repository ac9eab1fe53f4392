//! Staging area
//!
//! The index holds the pending delta for the next commit: additions mapping
//! paths to freshly stored blob digests, and removals naming paths to drop.
//! At commit time the delta is reconciled onto the parent commit's file map;
//! a path staged both ways is dropped (removal wins within one cycle).
//!
//! See `artifacts::index` for the on-disk encoding.

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::DIGEST_LENGTH;
use crate::artifacts::objects::digest::Digest;
use crate::artifacts::objects::object::{Packable, Unpackable};
use anyhow::anyhow;
use byteorder::{NetworkEndian, ReadBytesExt, WriteBytesExt};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::Path;

/// Staging area persisted at `.knot/index`.
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file
    path: Box<Path>,
    /// Staged additions: path -> blob digest
    additions: BTreeMap<String, Digest>,
    /// Staged removals
    removals: BTreeSet<String>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            additions: BTreeMap::new(),
            removals: BTreeSet::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn additions(&self) -> &BTreeMap<String, Digest> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeSet<String> {
        &self.removals
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    /// Stage a path for addition, superseding any staged removal of it
    pub fn add(&mut self, path: String, digest: Digest) {
        self.removals.remove(&path);
        self.additions.insert(path, digest);
    }

    /// Stage a path for removal
    ///
    /// The staged addition (if any) is kept; reconciliation drops the path
    /// regardless, so the removal wins at commit time.
    pub fn remove(&mut self, path: String) {
        self.removals.insert(path);
    }

    /// Drop a path from whichever staging bucket holds it
    ///
    /// # Returns
    ///
    /// `true` if the path was staged in either bucket
    pub fn unstage(&mut self, path: &str) -> bool {
        let was_added = self.additions.remove(path).is_some();
        let was_removed = self.removals.remove(path);

        was_added || was_removed
    }

    /// Reset both buckets to empty
    pub fn clear(&mut self) {
        self.additions.clear();
        self.removals.clear();
    }

    /// Load the staging area from disk
    ///
    /// Verifies the signature, version and trailing checksum. A missing or
    /// empty index file reads as the empty staging area.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.clear();

        if !self.path().exists() {
            return Ok(());
        }

        let index_file = std::fs::OpenOptions::new().read(true).open(self.path())?;

        // an empty index file is a valid empty staging area
        if index_file.metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(index_file);
        let (additions_count, removals_count) = self.parse_header(&mut reader)?;
        self.parse_additions(additions_count, &mut reader)?;
        self.parse_removals(removals_count, &mut reader)?;

        reader.verify()
    }

    fn parse_header(
        &self,
        reader: &mut Checksum<std::fs::File>,
    ) -> anyhow::Result<(u32, u32)> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header_reader = std::io::Cursor::new(header_bytes);
        let header = IndexHeader::deserialize(header_reader)?;

        if header.marker != SIGNATURE {
            return Err(anyhow!("Invalid index file signature"));
        }

        if header.version != VERSION {
            return Err(anyhow!(
                "Unsupported index file version: {}",
                header.version
            ));
        }

        Ok((header.additions_count, header.removals_count))
    }

    fn parse_additions(
        &mut self,
        additions_count: u32,
        reader: &mut Checksum<std::fs::File>,
    ) -> anyhow::Result<()> {
        for _ in 0..additions_count {
            let digest_bytes = reader.read(DIGEST_LENGTH / 2)?;
            let mut digest_slice: &[u8] = &digest_bytes;
            let digest = Digest::read_packed_from(&mut digest_slice)?;

            let path = Self::parse_path(reader)?;
            self.additions.insert(path, digest);
        }

        Ok(())
    }

    fn parse_removals(
        &mut self,
        removals_count: u32,
        reader: &mut Checksum<std::fs::File>,
    ) -> anyhow::Result<()> {
        for _ in 0..removals_count {
            let path = Self::parse_path(reader)?;
            self.removals.insert(path);
        }

        Ok(())
    }

    fn parse_path(reader: &mut Checksum<std::fs::File>) -> anyhow::Result<String> {
        let len_bytes = reader.read(2)?;
        let mut len_slice: &[u8] = &len_bytes;
        let path_len = len_slice.read_u16::<NetworkEndian>()? as usize;

        let path_bytes = reader.read(path_len)?;
        String::from_utf8(path_bytes.to_vec())
            .map_err(|_| anyhow!("Invalid path encoding in index entry"))
    }

    /// Persist the staging area to disk
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())?;

        let mut writer = Checksum::new(index_file);

        let header = IndexHeader::new(
            String::from(SIGNATURE),
            VERSION,
            self.additions.len() as u32,
            self.removals.len() as u32,
        );
        writer.write(&header.serialize()?)?;

        for (path, digest) in &self.additions {
            let mut entry_bytes = Vec::new();
            digest.write_packed_to(&mut entry_bytes)?;
            Self::write_path(&mut entry_bytes, path)?;
            writer.write(&entry_bytes)?;
        }

        for path in &self.removals {
            let mut entry_bytes = Vec::new();
            Self::write_path(&mut entry_bytes, path)?;
            writer.write(&entry_bytes)?;
        }

        writer.write_checksum()
    }

    fn write_path(entry_bytes: &mut Vec<u8>, path: &str) -> anyhow::Result<()> {
        anyhow::ensure!(
            path.len() <= u16::MAX as usize,
            "Path too long for index entry: {path}"
        );

        entry_bytes.write_u16::<NetworkEndian>(path.len() as u16)?;
        entry_bytes.write_all(path.as_bytes())?;
        Ok(())
    }
}
