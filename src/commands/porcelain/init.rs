use crate::areas::repository::Repository;
use crate::artifacts::branch::DEFAULT_BRANCH;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::error::GitletError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    /// Create `.gitlet` with the initial commit on `master`
    pub fn init_repository(&self) -> anyhow::Result<ObjectId> {
        if self.is_initialized() {
            return Err(GitletError::already_exists(
                "A Gitlet version-control system already exists in the current directory.",
            )
            .into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .gitlet/objects directory")?;
        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .gitlet/refs/heads directory")?;

        let initial_commit_id = self.database().store_commit(&Commit::initial())?;

        let master = BranchName::try_parse(DEFAULT_BRANCH.to_string())?;
        self.refs()
            .init(&master, &initial_commit_id)
            .context("Failed to create initial HEAD reference")?;

        let mut index = self.index();
        index.clear();
        index.write_updates().context("Failed to create .gitlet/index file")?;

        tracing::info!(path = %self.path().display(), oid = %initial_commit_id, "repository initialized");

        Ok(initial_commit_id)
    }

    pub fn init(&self) -> anyhow::Result<()> {
        self.init_repository()?;

        writeln!(
            self.writer(),
            "Initialized empty Gitlet repository in {}",
            self.gitlet_path().display()
        )?;

        Ok(())
    }
}
