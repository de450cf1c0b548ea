//! Snapshot migration
//!
//! Turns the working directory from the active snapshot into a target snapshot:
//! - `Add`: paths only the target records
//! - `Modify`: paths both record; rewritten so hand-deleted files come back
//! - `Delete`: paths only the active snapshot records
//!
//! Deletions run first, then writes. Untracked files are never touched; callers run
//! the conflict guard before applying a migration.

use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Manifest;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionType {
    Add,
    Modify,
    Delete,
}

/// Planned actions grouped by type; writes carry the blob to write
pub type ActionsSet = BTreeMap<ActionType, Vec<(PathBuf, Option<ObjectId>)>>;

pub struct Migration<'r> {
    database: &'r Database,
    actions: ActionsSet,
}

impl<'r> Migration<'r> {
    pub fn new(database: &'r Database, active: &Manifest, target: &Manifest) -> Self {
        let mut actions = ActionsSet::from([
            (ActionType::Add, Vec::new()),
            (ActionType::Modify, Vec::new()),
            (ActionType::Delete, Vec::new()),
        ]);

        for (path, oid) in target {
            let action = if active.contains_key(path) {
                ActionType::Modify
            } else {
                ActionType::Add
            };
            actions
                .entry(action)
                .or_default()
                .push((path.clone(), Some(oid.clone())));
        }

        for path in active.keys().filter(|path| !target.contains_key(*path)) {
            actions
                .entry(ActionType::Delete)
                .or_default()
                .push((path.clone(), None));
        }

        Migration { database, actions }
    }

    pub fn actions(&self) -> &ActionsSet {
        &self.actions
    }

    pub fn apply_changes(&self, workspace: &Workspace) -> anyhow::Result<()> {
        workspace.apply_migration(self)?;

        tracing::debug!(
            added = self.count(ActionType::Add),
            modified = self.count(ActionType::Modify),
            deleted = self.count(ActionType::Delete),
            "working directory migrated"
        );

        Ok(())
    }

    fn count(&self, action: ActionType) -> usize {
        self.actions.get(&action).map(Vec::len).unwrap_or_default()
    }

    pub fn load_blob_data(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        Ok(self.database.parse_object_as_blob(object_id)?.into_content())
    }
}
