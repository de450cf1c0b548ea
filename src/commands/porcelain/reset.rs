use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Hard reset: working directory, active branch and staging area all move to `commit`
    pub fn reset_to(&self, commit: &str) -> anyhow::Result<ObjectId> {
        let (active, head) = self.active_commit()?;
        let mut index = self.load_index()?;

        let target_id = Revision::try_parse(commit)?.resolve(self.database())?;
        let target = self.database().parse_object_as_commit(&target_id)?;

        self.migrate_working_directory(&head, &target)?;
        self.refs().update_branch(active.name(), &target_id)?;

        index.clear();
        index.write_updates()?;

        tracing::info!(branch = %active.name(), oid = %target_id, "branch reset");

        Ok(target_id)
    }

    pub fn reset(&self, commit: &str) -> anyhow::Result<()> {
        self.reset_to(commit)?;

        Ok(())
    }
}
