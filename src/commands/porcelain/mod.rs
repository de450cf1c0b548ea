//! Porcelain commands
//!
//! Each command is an `impl Repository` block with two layers: an operation that
//! returns a typed outcome (`stage`, `merge_branch`, ...) and a thin wrapper named
//! after the command that renders the outcome to the repository writer.
//!
//! ## Commands
//!
//! - `init`: create the repository with its initial commit
//! - `add`, `rm`: stage additions and removals
//! - `commit`: record the staging area
//! - `log`, `global-log`, `find`: inspect history
//! - `status`: branches, staged changes and the state of the working directory
//! - `checkout`, `reset`: restore files or move to another snapshot
//! - `branch`, `rm-branch`: create or delete branch pointers
//! - `merge`: three-way merge of another branch into the active one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
