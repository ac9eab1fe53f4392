//! Knot command implementations
//!
//! Every user-facing command lives under `porcelain`, one module per command.
//! Commands are `impl Repository` blocks, so each one composes the repository
//! areas (workspace, index, database, refs) and the artifact algorithms
//! directly instead of going through an intermediate command type.

pub mod porcelain;
