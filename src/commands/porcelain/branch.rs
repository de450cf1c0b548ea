use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::{Branch, BranchName};
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// New branch at the active commit; HEAD does not move
    pub fn create_branch(&self, name: &str) -> anyhow::Result<Branch> {
        let (active, _) = self.active_commit()?;
        let name = BranchName::try_parse(name.to_string())?;

        self.refs().create_branch(&name, active.oid())
    }

    /// Delete a branch pointer; its commits stay in the object store
    pub fn remove_branch(&self, name: &str) -> anyhow::Result<ObjectId> {
        self.ensure_initialized()?;
        let name = BranchName::try_parse(name.to_string())?;

        self.refs().delete_branch(&name)
    }

    pub fn branch(&self, name: &str) -> anyhow::Result<()> {
        self.create_branch(name)?;

        Ok(())
    }

    pub fn rm_branch(&self, name: &str) -> anyhow::Result<()> {
        self.remove_branch(name)?;

        Ok(())
    }
}
