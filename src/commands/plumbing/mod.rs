//! Plumbing commands
//!
//! Direct access to the object store, mostly useful for scripting and debugging.
//!
//! - `hash-object`: compute a blob id and optionally store the blob
//! - `cat-file`: print a stored object
//!
//! `write_commit` is the commit writer shared by `commit` and `merge`.

pub mod cat_file;
pub mod hash_object;
mod write_commit;
