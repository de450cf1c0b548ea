//! Command implementations
//!
//! - `plumbing`: low-level object store access (hash-object, cat-file)
//! - `porcelain`: user-facing version control workflows (add, commit, merge, ...)

pub mod plumbing;
pub mod porcelain;
