use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::artifacts::core::error::GitletError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

pub const REPOSITORY_DIR: &str = ".gitlet";

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Turn a user-supplied path into a path relative to the working directory root
    ///
    /// Resolution is lexical: `.` components are dropped, absolute paths must lie
    /// under the root, and `..` is refused.
    pub fn normalize(&self, path: &Path) -> anyhow::Result<PathBuf> {
        let relative = if path.is_absolute() {
            path.strip_prefix(&self.path).map_err(|_| {
                GitletError::invalid_operation(format!(
                    "{} is outside the working directory.",
                    path.display()
                ))
            })?
        } else {
            path
        };

        let mut normalized = PathBuf::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => normalized.push(part),
                Component::CurDir => {}
                _ => {
                    return Err(GitletError::invalid_operation(format!(
                        "{} is outside the working directory.",
                        path.display()
                    ))
                    .into());
                }
            }
        }

        if normalized.starts_with(REPOSITORY_DIR) {
            return Err(GitletError::invalid_operation(format!(
                "{} belongs to the repository itself.",
                path.display()
            ))
            .into());
        }

        Ok(normalized)
    }

    /// Every plain file below the root, relative and sorted, skipping `.gitlet`
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.file_name() != REPOSITORY_DIR);

        for entry in walker {
            let entry = entry.context("Unable to list the working directory")?;
            if entry.file_type().is_file() {
                files.push(entry.path().strip_prefix(&self.path)?.to_path_buf());
            }
        }

        Ok(files)
    }

    pub fn exists(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let full_path = self.path.join(file_path);

        if !full_path.is_file() {
            return Err(GitletError::not_found("File does not exist.").into());
        }

        let content = std::fs::read(&full_path)
            .with_context(|| format!("Unable to read {}", full_path.display()))?;

        Ok(Bytes::from(content))
    }

    pub fn parse_blob(&self, file_path: &Path) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(file_path)?))
    }

    pub fn hash_file(&self, file_path: &Path) -> anyhow::Result<ObjectId> {
        self.parse_blob(file_path)?.object_id()
    }

    /// Hash of the file on disk, or `None` when it is absent
    pub fn try_hash_file(&self, file_path: &Path) -> anyhow::Result<Option<ObjectId>> {
        if self.exists(file_path) {
            Ok(Some(self.hash_file(file_path)?))
        } else {
            Ok(None)
        }
    }

    pub fn write_file(&self, file_path: &Path, data: &[u8]) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if let Some(parent) = full_path.parent() {
            if parent.is_file() {
                std::fs::remove_file(parent)
                    .with_context(|| format!("Unable to replace {}", parent.display()))?;
            }
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Unable to create {}", parent.display()))?;
        }
        if full_path.is_dir() {
            std::fs::remove_dir_all(&full_path)
                .with_context(|| format!("Unable to replace {}", full_path.display()))?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&full_path)
            .with_context(|| format!("Unable to open {}", full_path.display()))?;
        file.write_all(data)
            .with_context(|| format!("Unable to write {}", full_path.display()))?;

        Ok(())
    }

    /// Delete a file and any directories left empty by it; a missing file is fine
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if full_path.is_file() {
            std::fs::remove_file(&full_path)
                .with_context(|| format!("Unable to remove {}", full_path.display()))?;
        }
        self.prune_empty_parent_dirs(&full_path)
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.path.as_ref()
            && parent.starts_with(&self.path)
            && parent.is_dir()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent)
                .with_context(|| format!("Unable to remove empty directory {}", parent.display()))?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    // Deletions go first so that a directory can be replaced by a file of the same name.
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        self.apply_migration_action_set(migration, ActionType::Delete)?;
        self.apply_migration_action_set(migration, ActionType::Modify)?;
        self.apply_migration_action_set(migration, ActionType::Add)?;

        Ok(())
    }

    fn apply_migration_action_set(
        &self,
        migration: &Migration,
        action: ActionType,
    ) -> anyhow::Result<()> {
        let Some(entries) = migration.actions().get(&action) else {
            return Ok(());
        };

        for (file_path, oid) in entries {
            match (action, oid) {
                (ActionType::Delete, _) => self.remove_file(file_path)?,
                (ActionType::Add | ActionType::Modify, Some(oid)) => {
                    let data = migration.load_blob_data(oid)?;
                    self.write_file(file_path, &data)?;
                }
                (ActionType::Add | ActionType::Modify, None) => {
                    anyhow::bail!("No blob planned for {}", file_path.display())
                }
            }
        }

        Ok(())
    }
}
