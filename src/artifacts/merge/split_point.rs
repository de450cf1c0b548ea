//! Split point (lowest common ancestor) discovery
//!
//! ## Algorithm
//!
//! Phase 1 walks a shared breadth-first frontier from both tips. Every commit carries
//! the set of sides it was reached from; a side is pushed on to the parents only
//! when it is new for them, so each commit is expanded at most twice. A commit reached
//! from both sides becomes a candidate, in discovery order, and its flags stop
//! spreading there.
//!
//! Phase 2 drops every candidate that is an ancestor of another candidate. The first
//! surviving candidate in discovery order is the split point. On criss-cross
//! histories several candidates survive; taking the first keeps the choice stable.
//!
//! A best common ancestor never lies behind a candidate (it would then be an ancestor
//! of that candidate), so stopping at candidates loses none of them.

use crate::artifacts::core::error::GitletError;
use crate::artifacts::log::rev_list::Ancestors;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b000;
        const CURRENT = 0b001;
        const GIVEN = 0b010;
        const BOTH = Self::CURRENT.bits() | Self::GIVEN.bits();
        const RESULT = 0b100;
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::CURRENT) {
            flags.push("CURRENT");
        }
        if self.contains(VisitState::GIVEN) {
            flags.push("GIVEN");
        }
        if self.contains(VisitState::RESULT) {
            flags.push("RESULT");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

/// Finds the split point of two commits
///
/// `parents_of` loads the parent ids of a commit, which lets the search run over the
/// object store or over an in-memory graph alike.
pub struct SplitPointFinder<F>
where
    F: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    parents_of: F,
}

impl<F> SplitPointFinder<F>
where
    F: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    pub fn new(parents_of: F) -> Self {
        SplitPointFinder { parents_of }
    }

    pub fn find(&self, current: &ObjectId, given: &ObjectId) -> anyhow::Result<ObjectId> {
        if current == given {
            return Ok(current.clone());
        }

        let candidates = self.common_ancestors(current, given)?;
        tracing::debug!(
            candidates = %candidates.iter().map(ObjectId::to_short_oid).collect::<Vec<_>>().join(","),
            "common ancestors found"
        );

        if candidates.is_empty() {
            return Err(GitletError::UnrelatedHistories {
                current: current.to_string(),
                given: given.to_string(),
            }
            .into());
        }

        let redundant = self.redundant_candidates(&candidates)?;
        let split_point = candidates
            .into_iter()
            .find(|candidate| !redundant.contains(candidate))
            .ok_or_else(|| anyhow::anyhow!("every common ancestor was marked redundant"))?;

        tracing::debug!(split_point = %split_point, "split point chosen");

        Ok(split_point)
    }

    fn common_ancestors(
        &self,
        current: &ObjectId,
        given: &ObjectId,
    ) -> anyhow::Result<Vec<ObjectId>> {
        let mut states = HashMap::<ObjectId, VisitState>::new();
        let mut frontier = VecDeque::new();
        let mut candidates = Vec::new();

        states.insert(current.clone(), VisitState::CURRENT);
        states.insert(given.clone(), VisitState::GIVEN);
        frontier.push_back(current.clone());
        frontier.push_back(given.clone());

        while let Some(commit_id) = frontier.pop_front() {
            let state = states.get(&commit_id).copied().unwrap_or(VisitState::NONE);
            tracing::trace!(commit = %commit_id.to_short_oid(), state = ?state, "visiting");

            if state.contains(VisitState::RESULT) {
                continue;
            }

            if state.contains(VisitState::BOTH) {
                states.insert(commit_id.clone(), state | VisitState::RESULT);
                candidates.push(commit_id);
                continue;
            }

            for parent_id in (self.parents_of)(&commit_id)? {
                let parent_state = states.get(&parent_id).copied().unwrap_or(VisitState::NONE);

                if !parent_state.contains(state) {
                    states.insert(parent_id.clone(), parent_state | state);
                    frontier.push_back(parent_id);
                }
            }
        }

        Ok(candidates)
    }

    fn redundant_candidates(&self, candidates: &[ObjectId]) -> anyhow::Result<HashSet<ObjectId>> {
        if candidates.len() < 2 {
            return Ok(HashSet::new());
        }

        let candidate_set = candidates.iter().collect::<HashSet<_>>();
        let mut redundant = HashSet::new();

        for candidate in candidates {
            let parents = (self.parents_of)(candidate)?;
            for ancestor in Ancestors::new(parents, |oid: &ObjectId| (self.parents_of)(oid)) {
                let ancestor = ancestor?;
                if candidate_set.contains(&ancestor) {
                    redundant.insert(ancestor);
                }
            }
        }

        Ok(redundant)
    }
}
