//! Working-directory reconciliation for checkout, reset and merge
//!
//! - `conflict`: the guard that refuses to clobber untracked or modified files
//! - `migration`: the plan of writes and deletions that turns one snapshot into another
//!
//! The guard always runs before the migration, so a refused operation changes nothing.

pub mod conflict;
pub mod migration;
