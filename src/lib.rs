//! A small, git-style version-control engine
//!
//! - `areas`: the persisted parts of a repository (objects, refs, staging area,
//!   working directory) and the `Repository` handle over them
//! - `artifacts`: value types and algorithms (commits, branches, history walks,
//!   merge planning, status)
//! - `commands`: repository operations, one module per command
//! - `config`: settings read from the environment

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod config;
