//! Working tree status inspection
//!
//! - `file_change`: kinds of unstaged and staged changes
//! - `status_info`: classification of every path against the staging area and the
//!   active commit

pub mod file_change;
pub mod status_info;
