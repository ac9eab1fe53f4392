//! Porcelain commands (user-facing version control operations)
//!
//! Porcelain commands provide the high-level user interface for version
//! control. They compose the staging area, the object store and the reference
//! machinery into workflows that match typical usage patterns.
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage files for addition
//! - `remove`: Stage files for removal
//! - `unstage`: Pull paths back out of the staging area
//! - `empty`: Clear the staging area
//! - `commit`: Create a new commit from the staging area
//! - `status`: Show the working tree status
//! - `log`: Show commit history
//! - `checkout`: Detach HEAD at a revision
//! - `switch`: Switch to a branch
//! - `branch`: Create, list, or delete branches
//! - `merge`: Merge a branch into HEAD
//! - `revert`: Restore an earlier snapshot as a new commit
//! - `reset`: Move the current ref to another revision

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod empty;
pub mod init;
pub mod log;
pub mod merge;
pub mod remove;
pub mod reset;
pub mod revert;
pub mod status;
pub mod switch;
pub mod unstage;
