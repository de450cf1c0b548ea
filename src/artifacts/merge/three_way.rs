//! Per-path three-way reconciliation
//!
//! Each path is judged from its blob id at the split point, in the current tip and in
//! the given tip (absent counts as a value of its own):
//!
//! | split vs current | split vs given | current vs given | action              |
//! |------------------|----------------|------------------|---------------------|
//! | any              | any            | equal            | keep                |
//! | equal            | differ         | differ           | take given / remove |
//! | differ           | equal          | differ           | keep                |
//! | differ           | differ         | differ           | conflict            |

use crate::artifacts::objects::commit::Manifest;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

pub const CONFLICT_HEAD_MARKER: &str = "<<<<<<< HEAD\n";
pub const CONFLICT_SEPARATOR: &str = "=======\n";
pub const CONFLICT_END_MARKER: &str = ">>>>>>>\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Write the given branch's blob and stage it
    TakeGiven(ObjectId),
    /// Delete from the working directory and stage the removal
    Remove,
    /// Both sides changed the path differently; an absent side was deleted
    Conflict {
        current: Option<ObjectId>,
        given: Option<ObjectId>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    actions: BTreeMap<PathBuf, MergeAction>,
}

impl MergePlan {
    pub fn build(split: &Manifest, current: &Manifest, given: &Manifest) -> Self {
        let paths = split
            .keys()
            .chain(current.keys())
            .chain(given.keys())
            .collect::<BTreeSet<_>>();

        let actions = paths
            .into_iter()
            .filter_map(|path| {
                let action = Self::reconcile(split.get(path), current.get(path), given.get(path))?;
                tracing::trace!(path = %path.display(), action = ?action, "merge decision");
                Some((path.clone(), action))
            })
            .collect();

        MergePlan { actions }
    }

    fn reconcile(
        split: Option<&ObjectId>,
        current: Option<&ObjectId>,
        given: Option<&ObjectId>,
    ) -> Option<MergeAction> {
        if current == given || split == given {
            return None;
        }

        if split == current {
            return Some(match given {
                Some(oid) => MergeAction::TakeGiven(oid.clone()),
                None => MergeAction::Remove,
            });
        }

        Some(MergeAction::Conflict {
            current: current.cloned(),
            given: given.cloned(),
        })
    }

    pub fn actions(&self) -> &BTreeMap<PathBuf, MergeAction> {
        &self.actions
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn conflicts(&self) -> Vec<&Path> {
        self.actions
            .iter()
            .filter(|(_, action)| matches!(action, MergeAction::Conflict { .. }))
            .map(|(path, _)| path.as_path())
            .collect()
    }

    /// Paths that would be both a file and a directory once the plan is applied to `current`
    ///
    /// A conflicted path stays a file even when one side deleted it.
    pub fn collisions(&self, current: &Manifest) -> Vec<PathBuf> {
        let mut merged = current.keys().collect::<BTreeSet<_>>();
        for (path, action) in &self.actions {
            match action {
                MergeAction::Remove => {
                    merged.remove(path);
                }
                MergeAction::TakeGiven(_) | MergeAction::Conflict { .. } => {
                    merged.insert(path);
                }
            }
        }

        merged
            .iter()
            .flat_map(|path| path.ancestors().skip(1))
            .filter(|ancestor| merged.contains(&ancestor.to_path_buf()))
            .map(Path::to_path_buf)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Contents of a conflicted file; an absent side contributes nothing
pub fn conflict_content(current: &[u8], given: &[u8]) -> Bytes {
    let mut content = Vec::with_capacity(
        CONFLICT_HEAD_MARKER.len()
            + current.len()
            + CONFLICT_SEPARATOR.len()
            + given.len()
            + CONFLICT_END_MARKER.len(),
    );
    content.extend_from_slice(CONFLICT_HEAD_MARKER.as_bytes());
    content.extend_from_slice(current);
    content.extend_from_slice(CONFLICT_SEPARATOR.as_bytes());
    content.extend_from_slice(given);
    content.extend_from_slice(CONFLICT_END_MARKER.as_bytes());

    Bytes::from(content)
}
