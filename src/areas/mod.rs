//! Persisted repository areas
//!
//! - `database`: content-addressed store of blobs and commits
//! - `index`: staging area of pending additions and removals
//! - `refs`: branches and HEAD
//! - `repository`: handle tying the areas of one working directory together
//! - `workspace`: the user's files

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
