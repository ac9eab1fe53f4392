//! Object types and operations
//!
//! Everything the store persists is an object identified by the SHA-1 of its
//! stored bytes. There are two kinds:
//!
//! - **Blob**: one file's content, byte for byte
//! - **Commit**: a snapshot (path -> blob digest) with lineage and metadata
//!
//! Objects serialize to exactly the bytes that get hashed and written, so a
//! digest can always be re-derived from the file it names.

pub mod blob;
pub mod commit;
pub mod digest;
pub mod object;
pub mod object_kind;

/// Length of a SHA-1 hash in hexadecimal format
pub const DIGEST_LENGTH: usize = 40;
