//! Stored object types
//!
//! Everything the repository stores is an object identified by the SHA-1 hash of its
//! framed form `<type> <size>\0<payload>`:
//!
//! - **Blob**: raw content of one file version
//! - **Commit**: snapshot record (message, timestamp, parents, path -> blob manifest)

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of the abbreviated form shown in listings
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;

/// Shortest prefix accepted when resolving an abbreviated commit id
pub const MIN_OBJECT_ID_PREFIX_LENGTH: usize = 4;
