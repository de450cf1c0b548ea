use crate::areas::repository::Repository;
use crate::artifacts::core::error::GitletError;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnstageOutcome {
    /// A pending addition was dropped; the file on disk is untouched
    Unstaged,
    /// The tracked file was deleted and staged for removal
    Removed,
}

impl Repository {
    pub fn unstage(&self, file: &Path) -> anyhow::Result<UnstageOutcome> {
        let (_, head) = self.active_commit()?;
        let mut index = self.load_index()?;
        let path = self.workspace().normalize(file)?;

        let outcome = if index.unstage_addition(&path).is_some() {
            UnstageOutcome::Unstaged
        } else if head.tracks(&path) {
            index.stage_removal(path.clone());
            self.workspace().remove_file(&path)?;
            UnstageOutcome::Removed
        } else {
            return Err(GitletError::invalid_operation("No reason to remove the file.").into());
        };

        index.write_updates()?;
        tracing::debug!(path = %path.display(), outcome = ?outcome, "unstaged");

        Ok(outcome)
    }

    pub fn rm(&self, file: &str) -> anyhow::Result<()> {
        self.unstage(Path::new(file))?;

        Ok(())
    }
}
