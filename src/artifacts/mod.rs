//! Version control data structures and algorithms
//!
//! This module contains the core types and algorithms:
//!
//! - `branch`: Branch names and revision parsing
//! - `checkout`: Working directory migration with a dirty-tree safety gate
//! - `errors`: Typed failures surfaced through `anyhow`
//! - `index`: Staging-area binary format
//! - `merge`: Merge base finding and three-way tree merging
//! - `objects`: Object types (blob, commit) and digests
//! - `status`: Working tree status inspection

pub mod branch;
pub mod checkout;
pub mod errors;
pub mod index;
pub mod merge;
pub mod objects;
pub mod status;
