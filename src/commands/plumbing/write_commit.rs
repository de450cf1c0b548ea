use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::Branch;
use crate::artifacts::objects::commit::{Commit, Manifest, Parents};
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Record `base` overlaid with the staging area as a new commit on `branch`
    ///
    /// The branch moves only once the commit is stored, and the staging area is
    /// cleared only after the branch moved.
    pub(crate) fn write_commit(
        &self,
        index: &mut Index,
        branch: &Branch,
        base: &Commit,
        parents: Parents,
        message: String,
    ) -> anyhow::Result<ObjectId> {
        let manifest = Self::next_manifest(base.manifest(), index);

        let commit = Commit::new(message, parents, manifest, self.config().commit_timestamp());
        let commit_id = self.database().store_commit(&commit)?;
        self.refs().update_branch(branch.name(), &commit_id)?;

        index.clear();
        index.write_updates()?;

        tracing::info!(
            oid = %commit_id,
            branch = %branch.name(),
            files = commit.manifest().len(),
            "commit written"
        );

        Ok(commit_id)
    }

    fn next_manifest(base: &Manifest, index: &Index) -> Manifest {
        let mut manifest = base.clone();

        for (path, oid) in index.additions() {
            manifest.insert(path.clone(), oid.clone());
        }
        for path in index.removals() {
            manifest.remove(path);
        }

        manifest
    }
}
