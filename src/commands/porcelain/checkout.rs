use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::checkout::conflict::ensure_no_conflicts;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::error::GitletError;
use crate::artifacts::objects::commit::Commit;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Restore one file from the active commit; the staging area is left alone
    pub fn checkout_file_from_active_commit(&self, file: &Path) -> anyhow::Result<()> {
        let (_, head) = self.active_commit()?;

        self.restore_file(&head, file)
    }

    /// Restore one file from a commit named by a full or abbreviated id
    pub fn checkout_file_from_commit(&self, commit: &str, file: &Path) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let commit_id = Revision::try_parse(commit)?.resolve(self.database())?;
        let commit = self.database().parse_object_as_commit(&commit_id)?;

        self.restore_file(&commit, file)
    }

    fn restore_file(&self, commit: &Commit, file: &Path) -> anyhow::Result<()> {
        let path = self.workspace().normalize(file)?;
        let blob_id = commit
            .blob_for(&path)
            .ok_or_else(|| GitletError::not_found("File does not exist in that commit."))?;

        let blob = self.database().parse_object_as_blob(blob_id)?;
        self.workspace().write_file(&path, blob.content())?;
        tracing::debug!(path = %path.display(), oid = %blob_id, "file restored");

        Ok(())
    }

    /// Make `name` the active branch and its tip the working directory content
    pub fn checkout_branch(&self, name: &str) -> anyhow::Result<()> {
        let (active, head) = self.active_commit()?;
        let mut index = self.load_index()?;

        let name = BranchName::try_parse(name.to_string())?;
        let target = self
            .refs()
            .try_resolve_branch(&name)?
            .ok_or_else(|| GitletError::not_found("No such branch exists."))?;

        if active.name() == target.name() {
            return Err(
                GitletError::invalid_operation("No need to checkout the current branch.").into(),
            );
        }

        let target_commit = self.database().parse_object_as_commit(target.oid())?;
        self.migrate_working_directory(&head, &target_commit)?;
        self.refs().switch_head(target.name())?;

        index.clear();
        index.write_updates()?;

        tracing::info!(from = %active.name(), to = %target.name(), "branch checked out");

        Ok(())
    }

    /// Replace the files of `active` with those of `target`
    ///
    /// Refuses with `Conflict`, changing nothing, while any file on disk is untracked
    /// or differs from `active`.
    pub(crate) fn migrate_working_directory(
        &self,
        active: &Commit,
        target: &Commit,
    ) -> anyhow::Result<()> {
        ensure_no_conflicts(self.workspace(), active.manifest())?;

        Migration::new(self.database(), active.manifest(), target.manifest())
            .apply_changes(self.workspace())
    }

    /// `checkout -- <file>`, `checkout <commit> -- <file>` or `checkout <branch>`
    pub fn checkout(&self, target: Option<&str>, files: &[String]) -> anyhow::Result<()> {
        match (target, files) {
            (None, [file]) => self.checkout_file_from_active_commit(Path::new(file)),
            (Some(commit), [file]) => self.checkout_file_from_commit(commit, Path::new(file)),
            (Some(branch), []) => {
                self.checkout_branch(branch)?;
                writeln!(self.writer(), "Switched to branch '{branch}'")?;

                Ok(())
            }
            _ => Err(GitletError::invalid_operation("Incorrect operands.").into()),
        }
    }
}
