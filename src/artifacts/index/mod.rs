//! Staging area file format
//!
//! The staging area is persisted to `.gitlet/index` after every mutation.
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "STAG" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Entry count (4 bytes)
//!
//! Entries (variable length):
//!   - Kind: b'A' (pending addition) or b'R' (pending removal)
//!   - Blob SHA-1, 20 bytes, additions only
//!   - Path length (2 bytes) followed by the UTF-8 path
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;
pub mod index_entry;
pub mod index_header;

pub const CHECKSUM_SIZE: usize = 20;
pub const HEADER_SIZE: usize = 12;
pub const SIGNATURE: &str = "STAG";
pub const VERSION: u32 = 1;

/// Name reported when the staging area file fails to parse
pub(crate) const INDEX_LABEL: &str = "index";
