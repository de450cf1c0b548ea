use crate::areas::workspace::Workspace;
use crate::artifacts::core::error::GitletError;
use crate::artifacts::objects::commit::Manifest;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConflictType {
    /// On disk but not recorded by the active commit
    Untracked,
    /// Recorded by the active commit with different content
    Modified,
}

impl std::fmt::Display for ConflictType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictType::Untracked => write!(f, "untracked"),
            ConflictType::Modified => write!(f, "modified"),
        }
    }
}

pub type ConflictsSet = BTreeMap<PathBuf, ConflictType>;

/// Classify every working-directory file that an operation replacing the active
/// snapshot could overwrite or delete
pub fn detect_conflicts(workspace: &Workspace, active: &Manifest) -> anyhow::Result<ConflictsSet> {
    let mut conflicts = ConflictsSet::new();

    for path in workspace.list_files()? {
        match active.get(&path) {
            None => {
                conflicts.insert(path, ConflictType::Untracked);
            }
            Some(oid) if &workspace.hash_file(&path)? != oid => {
                conflicts.insert(path, ConflictType::Modified);
            }
            Some(_) => {}
        }
    }

    Ok(conflicts)
}

/// Fail with `Conflict` when any file is in the way
pub fn ensure_no_conflicts(workspace: &Workspace, active: &Manifest) -> anyhow::Result<()> {
    let conflicts = detect_conflicts(workspace, active)?;

    if conflicts.is_empty() {
        return Ok(());
    }

    for (path, conflict_type) in &conflicts {
        tracing::warn!(path = %path.display(), kind = %conflict_type, "file in the way");
    }

    let modified = conflicts
        .values()
        .any(|conflict_type| *conflict_type == ConflictType::Modified);

    Err(GitletError::Conflict {
        paths: conflicts.into_keys().collect(),
        modified,
    }
    .into())
}
