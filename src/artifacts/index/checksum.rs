use crate::artifacts::core::error::GitletError;
use crate::artifacts::index::{CHECKSUM_SIZE, INDEX_LABEL};
use crate::artifacts::objects::object_id::ObjectId;
use byteorder::{ByteOrder, NetworkEndian};
use bytes::Bytes;
use file_guard::FileGuard;
use sha1::{Digest, Sha1};
use std::fs::File;
use std::io::{Read, Write};
use std::ops::DerefMut;

/// Locked staging area file; every byte read or written feeds a running SHA-1
///
/// Short reads and digest mismatches surface as `Corruption`.
pub struct Checksum<'f> {
    file: FileGuard<&'f mut File>,
    digest: Sha1,
}

impl<'f> Checksum<'f> {
    pub(crate) fn new(file: FileGuard<&'f mut File>) -> Self {
        Checksum {
            file,
            digest: Sha1::new(),
        }
    }

    pub(crate) fn read(&mut self, size: usize) -> anyhow::Result<Bytes> {
        let mut buffer = vec![0; size];
        self.file
            .deref_mut()
            .read_exact(&mut buffer)
            .map_err(|_| GitletError::corruption(INDEX_LABEL, "truncated staging area"))?;
        self.digest.update(&buffer);

        Ok(Bytes::from(buffer))
    }

    pub(crate) fn read_u8(&mut self) -> anyhow::Result<u8> {
        Ok(self.read(1)?[0])
    }

    pub(crate) fn read_u16(&mut self) -> anyhow::Result<u16> {
        Ok(NetworkEndian::read_u16(&self.read(2)?))
    }

    pub(crate) fn read_oid(&mut self) -> anyhow::Result<ObjectId> {
        let raw = self.read(20)?;

        ObjectId::read_h40_from(&mut &raw[..])
    }

    pub(crate) fn write(&mut self, data: &[u8]) -> anyhow::Result<()> {
        self.file.deref_mut().write_all(data)?;
        self.digest.update(data);

        Ok(())
    }

    /// Append the digest of everything written so far and flush to disk
    pub(crate) fn finish(mut self) -> anyhow::Result<()> {
        let digest = self.digest.clone().finalize();
        self.file.deref_mut().write_all(&digest)?;
        self.file.deref_mut().sync_all()?;

        Ok(())
    }

    /// Compare the trailing digest with what was read
    pub(crate) fn verify(mut self) -> anyhow::Result<()> {
        let mut stored = [0u8; CHECKSUM_SIZE];
        self.file
            .deref_mut()
            .read_exact(&mut stored)
            .map_err(|_| GitletError::corruption(INDEX_LABEL, "missing checksum"))?;

        if stored.as_slice() != self.digest.finalize().as_slice() {
            return Err(GitletError::corruption(INDEX_LABEL, "checksum mismatch").into());
        }

        Ok(())
    }
}
