use crate::areas::repository::Repository;
use crate::artifacts::core::error::GitletError;
use crate::artifacts::objects::commit::Parents;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Record the staging area on top of the active commit
    pub fn commit_snapshot(&self, message: &str) -> anyhow::Result<ObjectId> {
        let message = message.trim();
        if message.is_empty() {
            return Err(GitletError::invalid_operation("Please enter a commit message.").into());
        }

        let (branch, head) = self.active_commit()?;
        let mut index = self.load_index()?;

        if index.is_empty() {
            return Err(GitletError::invalid_operation("No changes added to the commit.").into());
        }

        self.write_commit(
            &mut index,
            &branch,
            &head,
            Parents::Normal(branch.oid().clone()),
            message.to_string(),
        )
    }

    pub fn commit(&self, message: &str) -> anyhow::Result<()> {
        let commit_id = self.commit_snapshot(message)?;

        writeln!(
            self.writer(),
            "[{}] {}",
            commit_id.to_short_oid(),
            message.trim().lines().next().unwrap_or_default()
        )?;

        Ok(())
    }
}
