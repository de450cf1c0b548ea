use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashSet;

/// Follows first parents from a start commit; the root commit is yielded too
#[derive(Clone)]
pub struct FirstParentLog<'d> {
    database: &'d Database,
    current_commit_oid: Option<ObjectId>,
}

impl<'d> FirstParentLog<'d> {
    pub fn new(database: &'d Database, start: ObjectId) -> Self {
        FirstParentLog {
            database,
            current_commit_oid: Some(start),
        }
    }
}

impl Iterator for FirstParentLog<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.current_commit_oid.take()?;

        match self.database.parse_object_as_commit(&commit_oid) {
            Ok(commit) => {
                self.current_commit_oid = commit.parent().cloned();
                Some(Ok((commit_oid, commit)))
            }
            Err(error) => Some(Err(error)),
        }
    }
}

/// Depth-first walk over all parent links
///
/// `parents_of` loads the parents of one commit. A failing load is yielded once and
/// ends the walk.
pub struct Ancestors<F>
where
    F: FnMut(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    parents_of: F,
    stack: Vec<ObjectId>,
    visited: HashSet<ObjectId>,
}

impl<F> Ancestors<F>
where
    F: FnMut(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    /// Start a walk from `starts`; the first start is explored first
    pub fn new(starts: impl IntoIterator<Item = ObjectId>, parents_of: F) -> Self {
        let mut stack = starts.into_iter().collect::<Vec<_>>();
        stack.reverse();

        Ancestors {
            parents_of,
            stack,
            visited: HashSet::new(),
        }
    }
}

impl<F> Iterator for Ancestors<F>
where
    F: FnMut(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    type Item = anyhow::Result<ObjectId>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(oid) = self.stack.pop() {
            if !self.visited.insert(oid.clone()) {
                continue;
            }

            return match (self.parents_of)(&oid) {
                Ok(parents) => {
                    self.stack.extend(
                        parents
                            .into_iter()
                            .rev()
                            .filter(|parent| !self.visited.contains(parent)),
                    );
                    Some(Ok(oid))
                }
                Err(error) => {
                    self.stack.clear();
                    Some(Err(error))
                }
            };
        }

        None
    }
}
