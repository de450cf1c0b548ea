//! Staging area entry representation
//!
//! Each entry records one pending change relative to the active commit:
//! - An addition: path plus the hash of the blob staged for it
//! - A removal: path only
//!
//! ## Entry Format
//!
//! `kind (1 byte) | [blob sha (20 bytes)] | path length (2 bytes) | path`

use crate::artifacts::core::error::GitletError;
use crate::artifacts::index::INDEX_LABEL;
use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::objects::object::Packable;
use crate::artifacts::objects::object_id::ObjectId;
use byteorder::WriteBytesExt;
use bytes::Bytes;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Longest path the entry format can hold
const MAX_PATH_SIZE: usize = u16::MAX as usize;

const ADDITION_MARKER: u8 = b'A';
const REMOVAL_MARKER: u8 = b'R';

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum IndexEntry {
    Addition { path: PathBuf, oid: ObjectId },
    Removal { path: PathBuf },
}

impl IndexEntry {
    pub fn path(&self) -> &Path {
        match self {
            IndexEntry::Addition { path, .. } | IndexEntry::Removal { path } => path,
        }
    }

    pub(crate) fn read_from(reader: &mut Checksum) -> anyhow::Result<Self> {
        let marker = reader.read_u8()?;
        let oid = match marker {
            ADDITION_MARKER => Some(reader.read_oid()?),
            REMOVAL_MARKER => None,
            other => {
                return Err(GitletError::corruption(
                    INDEX_LABEL,
                    format!("unknown entry kind {other:#04x}"),
                )
                .into());
            }
        };

        let path_size = reader.read_u16()? as usize;
        let path = String::from_utf8(reader.read(path_size)?.to_vec())
            .map(PathBuf::from)
            .map_err(|_| GitletError::corruption(INDEX_LABEL, "entry path is not UTF-8"))?;

        Ok(match oid {
            Some(oid) => IndexEntry::Addition { path, oid },
            None => IndexEntry::Removal { path },
        })
    }
}

impl Packable for IndexEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let path = self
            .path()
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid entry path"))?;
        if path.len() > MAX_PATH_SIZE {
            anyhow::bail!("Entry path is too long: {path}");
        }

        let mut entry_bytes = Vec::new();
        match self {
            IndexEntry::Addition { oid, .. } => {
                entry_bytes.write_u8(ADDITION_MARKER)?;
                oid.write_h40_to(&mut entry_bytes)?;
            }
            IndexEntry::Removal { .. } => entry_bytes.write_u8(REMOVAL_MARKER)?,
        }
        entry_bytes.write_u16::<byteorder::NetworkEndian>(path.len() as u16)?;
        entry_bytes.write_all(path.as_bytes())?;

        Ok(Bytes::from(entry_bytes))
    }
}
