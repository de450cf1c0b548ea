use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::{Branch, BranchName};
use crate::artifacts::checkout::conflict::ensure_no_conflicts;
use crate::artifacts::core::error::GitletError;
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::merge::three_way::{MergeAction, MergePlan, conflict_content};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Parents;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The given branch is an ancestor of the current one
    AlreadyUpToDate,
    /// The given branch was checked out; no commit was created
    FastForward(ObjectId),
    /// A two-parent commit was recorded; conflicted files hold both versions
    Merged {
        commit_id: ObjectId,
        conflicts: Vec<PathBuf>,
    },
}

impl Repository {
    /// Merge the branch `given` into the active branch
    pub fn merge_branch(&self, given: &str) -> anyhow::Result<MergeOutcome> {
        let (current, head) = self.active_commit()?;
        let mut index = self.load_index()?;

        if !index.is_empty() {
            return Err(GitletError::invalid_operation("You have uncommitted changes.").into());
        }

        let given = self
            .refs()
            .resolve_branch(&BranchName::try_parse(given.to_string())?)?;
        if given.name() == current.name() {
            return Err(
                GitletError::invalid_operation("Cannot merge a branch with itself.").into(),
            );
        }

        let split_point = SplitPointFinder::new(|oid: &ObjectId| {
            let commit = self.database().parse_object_as_commit(oid)?;
            Ok(commit.parents().as_slice().to_vec())
        })
        .find(current.oid(), given.oid())?;
        tracing::debug!(
            current = %current.name(),
            given = %given.name(),
            split_point = %split_point,
            "merge base found"
        );

        if &split_point == given.oid() {
            return Ok(MergeOutcome::AlreadyUpToDate);
        }

        if &split_point == current.oid() {
            drop(index);
            self.checkout_branch(given.name().as_ref())?;
            tracing::info!(from = %current.name(), to = %given.name(), "fast-forwarded");

            return Ok(MergeOutcome::FastForward(given.oid().clone()));
        }

        ensure_no_conflicts(self.workspace(), head.manifest())?;

        let given_commit = self.database().parse_object_as_commit(given.oid())?;
        let split_commit = self.database().parse_object_as_commit(&split_point)?;
        let plan = MergePlan::build(
            split_commit.manifest(),
            head.manifest(),
            given_commit.manifest(),
        );

        if let Some(path) = plan.collisions(head.manifest()).first() {
            return Err(GitletError::invalid_operation(format!(
                "Merging would leave both a file and a directory at {}.",
                path.display()
            ))
            .into());
        }

        self.apply_merge_plan(&mut index, &plan)?;

        let commit_id = self.write_commit(
            &mut index,
            &current,
            &head,
            Parents::Merge([current.oid().clone(), given.oid().clone()]),
            Self::merge_message(&given, &current),
        )?;

        Ok(MergeOutcome::Merged {
            commit_id,
            conflicts: plan.conflicts().into_iter().map(Path::to_path_buf).collect(),
        })
    }

    // Removals go first so that a file can replace a removed directory.
    fn apply_merge_plan(&self, index: &mut Index, plan: &MergePlan) -> anyhow::Result<()> {
        let (removals, writes): (Vec<_>, Vec<_>) = plan
            .actions()
            .iter()
            .partition(|(_, action)| matches!(action, MergeAction::Remove));

        for (path, action) in removals.into_iter().chain(writes) {
            match action {
                MergeAction::TakeGiven(oid) => {
                    let blob = self.database().parse_object_as_blob(oid)?;
                    self.workspace().write_file(path, blob.content())?;
                    index.stage_addition(path.clone(), oid.clone());
                }
                MergeAction::Remove => {
                    self.workspace().remove_file(path)?;
                    index.stage_removal(path.clone());
                }
                MergeAction::Conflict { current, given } => {
                    let content = conflict_content(
                        &self.blob_content(current.as_ref())?,
                        &self.blob_content(given.as_ref())?,
                    );
                    self.workspace().write_file(path, &content)?;

                    let oid = self.database().store(&Blob::new(content))?;
                    index.stage_addition(path.clone(), oid);
                    tracing::warn!(path = %path.display(), "merge conflict");
                }
            }
        }

        Ok(())
    }

    fn blob_content(&self, oid: Option<&ObjectId>) -> anyhow::Result<Bytes> {
        match oid {
            Some(oid) => Ok(self.database().parse_object_as_blob(oid)?.into_content()),
            None => Ok(Bytes::new()),
        }
    }

    fn merge_message(given: &Branch, current: &Branch) -> String {
        format!("Merged {} into {}.", given.name(), current.name())
    }

    pub fn merge(&self, given: &str) -> anyhow::Result<()> {
        match self.merge_branch(given)? {
            MergeOutcome::AlreadyUpToDate => {
                writeln!(self.writer(), "Given branch is an ancestor of the current branch.")?
            }
            MergeOutcome::FastForward(_) => {
                writeln!(self.writer(), "Current branch fast-forwarded.")?
            }
            MergeOutcome::Merged { conflicts, .. } if !conflicts.is_empty() => {
                writeln!(self.writer(), "Encountered a merge conflict.")?
            }
            MergeOutcome::Merged { .. } => {}
        }

        Ok(())
    }
}
