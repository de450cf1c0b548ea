//! Commit history traversal
//!
//! - `FirstParentLog`: the first-parent chain from a commit down to its root
//! - `Ancestors`: every commit reachable through any parent link, each exactly once
//!
//! `Ancestors` walks depth-first with an explicit stack, exploring `parents[0]`
//! before `parents[1]`, so the visiting order is fixed for a given graph.

pub mod rev_list;
