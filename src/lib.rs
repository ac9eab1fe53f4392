//! A small content-addressable version control engine.
//!
//! All state lives under `.knot/`: a two-namespace object store (blobs and
//! commits), a binary staging area and plain-text branch references. Commands
//! are implemented on [`areas::repository::Repository`] and compose the
//! repository areas with the algorithms under [`artifacts`].

pub mod areas;
pub mod artifacts;
pub mod commands;
