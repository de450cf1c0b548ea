//! Merge engine building blocks
//!
//! - `split_point`: lowest common ancestor search over the commit graph
//! - `three_way`: per-path decisions comparing split, current and given manifests

pub mod split_point;
pub mod three_way;
