//! Staging-area file format
//!
//! The index persists the pending delta for the next commit: staged additions
//! (path -> blob digest) and staged removals (paths). It is a small binary
//! file with an integrity checksum.
//!
//! ## File Format (Version 1)
//!
//! ```text
//! Header (16 bytes):
//!   - Signature: "KNOT" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Additions count (4 bytes)
//!   - Removals count (4 bytes)
//!
//! Additions (variable length, sorted by path):
//!   - Blob digest (20 bytes, packed)
//!   - Path length (2 bytes) + path bytes
//!
//! Removals (variable length, sorted by path):
//!   - Path length (2 bytes) + path bytes
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;
pub mod index_header;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 16;

/// Magic signature identifying index files
pub const SIGNATURE: &str = "KNOT";

/// Index file format version
pub const VERSION: u32 = 1;
