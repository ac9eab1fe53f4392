//! Content digest (SHA-1 hash)
//!
//! Digests are 40-character hexadecimal strings naming every stored object,
//! blob or commit alike. The digest of an object is the SHA-1 of the exact
//! bytes written to disk for it.
//!
//! ## Format
//!
//! - Full: 40 hex characters (e.g., "abc123...def")
//! - Short: first 7 characters, for human-facing reports
//!
//! ## Storage
//!
//! Objects live at `<namespace>/<first-2-chars>/<full-40-chars>`; the two-level
//! fan-out keeps shard directories small.

use crate::artifacts::objects::DIGEST_LENGTH;
use sha1::{Digest as _, Sha1};
use std::io;
use std::path::PathBuf;

/// Identity of a stored object: 40 lowercase hex characters of SHA-1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Digest(String);

impl Digest {
    /// Parse and validate a digest from a string
    ///
    /// # Arguments
    ///
    /// * `id` - 40-character hexadecimal string
    ///
    /// # Returns
    ///
    /// Validated digest or error on invalid length/characters
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != DIGEST_LENGTH {
            return Err(anyhow::anyhow!("Invalid digest length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid digest characters: {}", id));
        }
        Ok(Self(id.to_lowercase()))
    }

    /// Compute the digest of a byte sequence
    pub fn over(content: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(content);
        Self(format!("{:x}", hasher.finalize()))
    }

    /// Write the digest in packed binary format (20 bytes)
    ///
    /// Used by the staging-area index encoding.
    pub fn write_packed_to<W: io::Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        let hex40 = self.as_ref();

        // Process a nibble pair at a time
        for i in (0..DIGEST_LENGTH).step_by(2) {
            let byte = u8::from_str_radix(&hex40[i..i + 2], 16)
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "Invalid hex digit"))?;
            writer.write_all(&[byte])?;
        }

        Ok(())
    }

    /// Read a digest from packed binary format (20 bytes)
    pub fn read_packed_from<R: io::Read + ?Sized>(reader: &mut R) -> anyhow::Result<Self> {
        let mut hex40 = String::with_capacity(DIGEST_LENGTH);
        let mut buffer = [0; 1];

        for _ in 0..(DIGEST_LENGTH / 2) {
            reader.read_exact(&mut buffer)?;
            let hex_pair = &format!("{:02x}", u8::from_be_bytes(buffer));
            hex40.push_str(hex_pair);
        }

        Self::try_parse(hex40)
    }

    /// Convert to the storage path inside a namespace
    ///
    /// The first two characters are the shard directory; the file keeps the
    /// full digest as its name, e.g. `ab/abc123...`.
    pub fn to_path(&self) -> PathBuf {
        let (shard, _) = self.0.split_at(2);
        PathBuf::from(shard).join(&self.0)
    }

    /// Abbreviated form: the first 7 characters
    pub fn short(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
