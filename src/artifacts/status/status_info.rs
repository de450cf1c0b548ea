use crate::areas::index::Index;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Manifest;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

pub type ChangeSet = BTreeMap<PathBuf, WorkspaceChangeType>;
pub type FileSet = BTreeSet<PathBuf>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    pub(crate) staged_files: FileSet,
    pub(crate) removed_files: FileSet,
    pub(crate) workspace_changeset: ChangeSet,
    pub(crate) untracked_files: FileSet,
}

impl StatusInfo {
    pub fn staged_files(&self) -> &FileSet {
        &self.staged_files
    }

    pub fn removed_files(&self) -> &FileSet {
        &self.removed_files
    }

    pub fn workspace_changeset(&self) -> &ChangeSet {
        &self.workspace_changeset
    }

    pub fn untracked_files(&self) -> &FileSet {
        &self.untracked_files
    }

    pub fn is_clean(&self) -> bool {
        self.staged_files.is_empty()
            && self.removed_files.is_empty()
            && self.workspace_changeset.is_empty()
            && self.untracked_files.is_empty()
    }
}

/// Compares the working directory with the staging area and the active commit
#[derive(new)]
pub struct Status<'r> {
    workspace: &'r Workspace,
    index: &'r Index,
    head_manifest: &'r Manifest,
}

impl Status<'_> {
    pub fn initialize(&self) -> anyhow::Result<StatusInfo> {
        let disk_files = self.workspace.list_files()?.into_iter().collect::<FileSet>();

        let mut info = StatusInfo {
            staged_files: self.index.additions().keys().cloned().collect(),
            removed_files: self.index.removals().clone(),
            ..StatusInfo::default()
        };

        let candidates = disk_files
            .iter()
            .chain(self.head_manifest.keys())
            .chain(self.index.additions().keys())
            .collect::<BTreeSet<&PathBuf>>();

        for path in candidates {
            let on_disk = disk_files.contains(path);

            if let Some(change) = self.workspace_change(path, on_disk)? {
                info.workspace_changeset.insert(path.clone(), change);
            } else if on_disk && self.is_untracked(path) {
                info.untracked_files.insert(path.clone());
            }
        }

        Ok(info)
    }

    /// Content the next commit would record for `path` unless the user stages it again
    fn expected_blob(&self, path: &Path) -> Option<&ObjectId> {
        if let Some(oid) = self.index.staged_addition(path) {
            return Some(oid);
        }

        if self.index.is_staged_for_removal(path) {
            return None;
        }

        self.head_manifest.get(path)
    }

    fn workspace_change(
        &self,
        path: &Path,
        on_disk: bool,
    ) -> anyhow::Result<Option<WorkspaceChangeType>> {
        let Some(expected) = self.expected_blob(path) else {
            return Ok(None);
        };

        if !on_disk {
            return Ok(Some(WorkspaceChangeType::Deleted));
        }

        if &self.workspace.hash_file(path)? != expected {
            return Ok(Some(WorkspaceChangeType::Modified));
        }

        Ok(None)
    }

    // A file re-created after `rm` is untracked again until it is staged.
    fn is_untracked(&self, path: &Path) -> bool {
        self.index.staged_addition(path).is_none()
            && (!self.head_manifest.contains_key(path) || self.index.is_staged_for_removal(path))
    }
}
