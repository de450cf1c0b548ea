//! Repository data structures and algorithms
//!
//! - `branch`: branch names and commit id abbreviations
//! - `checkout`: working-directory guard and snapshot migration
//! - `core`: typed errors and the pager writer
//! - `index`: on-disk staging area records
//! - `log`: commit history traversal
//! - `merge`: split point search and three-way reconciliation
//! - `objects`: blob and commit objects
//! - `status`: working tree status inspection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
