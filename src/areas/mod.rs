//! Core repository areas
//!
//! The persistent state of a repository, one module per concern:
//!
//! - `database`: content-addressable object store for blobs and commits
//! - `index`: staging area holding the delta for the next commit
//! - `refs`: branch references and the HEAD state machine
//! - `repository`: the aggregate commands operate on
//! - `workspace`: working directory file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
