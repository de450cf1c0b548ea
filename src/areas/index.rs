//! Staging area (index)
//!
//! The staging area overlays the active commit with pending changes:
//! - `to_add`: path -> hash of the blob that will be recorded at the next commit
//! - `to_remove`: paths that the next commit will stop tracking
//!
//! A path is never pending in both maps. The whole area is rewritten to
//! `.gitlet/index` after every mutation; the write goes to a temporary file that is
//! renamed over the index, so a crash leaves the previous state in place.

use crate::artifacts::core::error::GitletError;
use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{HEADER_SIZE, INDEX_LABEL};
use crate::artifacts::objects::object::Packable;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

const INDEX_TEMP_SUFFIX: &str = "lock";

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.gitlet/index`)
    path: Box<Path>,
    to_add: BTreeMap<PathBuf, ObjectId>,
    to_remove: BTreeSet<PathBuf>,
    /// Whether the in-memory state differs from what was last loaded or written
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            to_add: BTreeMap::new(),
            to_remove: BTreeSet::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn additions(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.to_add
    }

    pub fn removals(&self) -> &BTreeSet<PathBuf> {
        &self.to_remove
    }

    pub fn staged_addition(&self, path: &Path) -> Option<&ObjectId> {
        self.to_add.get(path)
    }

    pub fn is_staged_for_removal(&self, path: &Path) -> bool {
        self.to_remove.contains(path)
    }

    /// Load the staging area from disk
    ///
    /// A missing or empty index file is an empty staging area.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the index file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.reset();

        if !self.path.exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .read(true)
            .open(&self.path)
            .with_context(|| format!("Unable to open index file {}", self.path.display()))?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(lock);
        let header = IndexHeader::decode(&reader.read(HEADER_SIZE)?)?;

        for _ in 0..header.entries_count {
            match IndexEntry::read_from(&mut reader)? {
                IndexEntry::Addition { path, oid } => {
                    self.to_add.insert(path, oid);
                }
                IndexEntry::Removal { path } => {
                    self.to_remove.insert(path);
                }
            }
        }

        reader.verify()?;

        if let Some(path) = self.to_add.keys().find(|path| self.to_remove.contains(*path)) {
            return Err(GitletError::corruption(
                INDEX_LABEL,
                format!("{} is staged for addition and removal", path.display()),
            )
            .into());
        }

        Ok(())
    }

    fn reset(&mut self) {
        self.to_add.clear();
        self.to_remove.clear();
        self.changed = false;
    }

    /// Record `oid` as the pending content of `path`
    pub fn stage_addition(&mut self, path: PathBuf, oid: ObjectId) {
        self.to_remove.remove(&path);
        self.to_add.insert(path, oid);
        self.changed = true;
    }

    /// Drop a pending addition, returning the blob it pointed at
    pub fn unstage_addition(&mut self, path: &Path) -> Option<ObjectId> {
        let removed = self.to_add.remove(path);
        if removed.is_some() {
            self.changed = true;
        }
        removed
    }

    /// Mark `path` to be untracked by the next commit
    pub fn stage_removal(&mut self, path: PathBuf) {
        self.to_add.remove(&path);
        self.to_remove.insert(path);
        self.changed = true;
    }

    /// Cancel a pending removal
    pub fn unstage_removal(&mut self, path: &Path) -> bool {
        let removed = self.to_remove.remove(path);
        if removed {
            self.changed = true;
        }
        removed
    }

    /// Drop every pending change
    pub fn clear(&mut self) {
        if !self.is_empty() {
            self.changed = true;
        }
        self.to_add.clear();
        self.to_remove.clear();
    }

    pub fn entries(&self) -> impl Iterator<Item = IndexEntry> + '_ {
        let additions = self.to_add.iter().map(|(path, oid)| IndexEntry::Addition {
            path: path.clone(),
            oid: oid.clone(),
        });
        let removals = self
            .to_remove
            .iter()
            .map(|path| IndexEntry::Removal { path: path.clone() });

        additions.chain(removals)
    }

    /// Persist the staging area
    ///
    /// # Locking
    ///
    /// The new content is written under an exclusive lock to `index.lock` and then
    /// renamed over the index file.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let temp_path = self.path.with_extension(INDEX_TEMP_SUFFIX);

        {
            let mut index_file = std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Unable to open index file {}", temp_path.display()))?;
            let lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

            let mut writer = Checksum::new(lock);

            let header = IndexHeader::for_entries(self.to_add.len() + self.to_remove.len())?;
            writer.write(&header.encode())?;

            for entry in self.entries() {
                writer.write(&entry.serialize()?)?;
            }

            writer.finish()?;
        }

        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Unable to replace index file {}", self.path.display()))?;
        self.changed = false;

        tracing::debug!(
            additions = self.to_add.len(),
            removals = self.to_remove.len(),
            "staging area written"
        );

        Ok(())
    }
}
