use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use std::path::{Path, PathBuf};

/// What staging one file did to the staging area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// New content recorded for the next commit
    Staged,
    /// The file is back to its committed content; any pending change was dropped
    Unstaged,
    /// Same content as the active commit and nothing was pending
    NoChanges,
    /// The same content is already staged
    AlreadyStaged,
}

impl Repository {
    /// Stage the current content of one file
    pub fn stage(&self, file: &Path) -> anyhow::Result<StageOutcome> {
        let (_, head) = self.active_commit()?;
        let mut index = self.load_index()?;

        let path = self.workspace().normalize(file)?;
        let outcome = self.stage_path(&mut index, &head, path)?;

        if index.is_changed() {
            index.write_updates()?;
        }

        Ok(outcome)
    }

    /// Stage every file of the working directory below `dir`
    pub fn stage_all(&self, dir: &Path) -> anyhow::Result<Vec<(PathBuf, StageOutcome)>> {
        let (_, head) = self.active_commit()?;
        let mut index = self.load_index()?;

        let prefix = self.workspace().normalize(dir)?;
        let mut outcomes = Vec::new();

        for path in self.workspace().list_files()? {
            if path.starts_with(&prefix) {
                let outcome = self.stage_path(&mut index, &head, path.clone())?;
                outcomes.push((path, outcome));
            }
        }

        if index.is_changed() {
            index.write_updates()?;
        }

        Ok(outcomes)
    }

    fn stage_path(
        &self,
        index: &mut Index,
        head: &Commit,
        path: PathBuf,
    ) -> anyhow::Result<StageOutcome> {
        let blob = self.workspace().parse_blob(&path)?;
        let blob_id = blob.object_id()?;

        if head.blob_for(&path) == Some(&blob_id) {
            let unstaged = index.unstage_addition(&path).is_some();
            let restored = index.unstage_removal(&path);

            let outcome = if unstaged || restored {
                StageOutcome::Unstaged
            } else {
                StageOutcome::NoChanges
            };
            tracing::debug!(path = %path.display(), outcome = ?outcome, "matches active commit");

            return Ok(outcome);
        }

        if index.staged_addition(&path) == Some(&blob_id) {
            return Ok(StageOutcome::AlreadyStaged);
        }

        self.database().store(&blob)?;
        tracing::debug!(path = %path.display(), oid = %blob_id, "staged for addition");
        index.stage_addition(path, blob_id);

        Ok(StageOutcome::Staged)
    }

    pub fn add(&self, files: &[String]) -> anyhow::Result<()> {
        for file in files {
            let path = Path::new(file);

            if self.path().join(path).is_dir() {
                self.stage_all(path)?;
            } else {
                self.stage(path)?;
            }
        }

        Ok(())
    }
}
