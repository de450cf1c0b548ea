use crate::artifacts::core::error::GitletError;
use crate::artifacts::index::{HEADER_SIZE, INDEX_LABEL, SIGNATURE, VERSION};
use byteorder::{ByteOrder, NetworkEndian};

/// Leading `STAG | version | entry count` block of the staging area file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexHeader {
    pub(crate) entries_count: u32,
}

impl IndexHeader {
    pub(crate) fn for_entries(entries_count: usize) -> anyhow::Result<Self> {
        let entries_count = u32::try_from(entries_count)
            .map_err(|_| anyhow::anyhow!("too many staged entries: {entries_count}"))?;

        Ok(IndexHeader { entries_count })
    }

    pub(crate) fn decode(raw: &[u8]) -> anyhow::Result<Self> {
        let Some(raw) = raw.get(..HEADER_SIZE) else {
            return Err(GitletError::corruption(INDEX_LABEL, "short header").into());
        };

        if &raw[..4] != SIGNATURE.as_bytes() {
            return Err(GitletError::corruption(INDEX_LABEL, "bad signature").into());
        }

        let version = NetworkEndian::read_u32(&raw[4..8]);
        if version != VERSION {
            return Err(
                GitletError::corruption(INDEX_LABEL, format!("unsupported version {version}"))
                    .into(),
            );
        }

        Ok(IndexHeader {
            entries_count: NetworkEndian::read_u32(&raw[8..12]),
        })
    }

    pub(crate) fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut raw = [0u8; HEADER_SIZE];
        raw[..4].copy_from_slice(SIGNATURE.as_bytes());
        NetworkEndian::write_u32(&mut raw[4..8], VERSION);
        NetworkEndian::write_u32(&mut raw[8..12], self.entries_count);

        raw
    }
}
