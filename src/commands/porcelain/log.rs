use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::{Ancestors, FirstParentLog};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::io::Write;

const ENTRY_SEPARATOR: &str = "===";

impl Repository {
    /// First-parent history of the active branch, newest first
    pub fn log_entries(&self) -> anyhow::Result<Vec<(ObjectId, Commit)>> {
        let (branch, _) = self.active_commit()?;

        FirstParentLog::new(self.database(), branch.oid().clone()).collect()
    }

    /// Every commit reachable from any branch, each once
    ///
    /// Branches are walked in name order, depth-first along first parents.
    pub fn global_log_entries(&self) -> anyhow::Result<Vec<(ObjectId, Commit)>> {
        self.ensure_initialized()?;

        let tips = self
            .refs()
            .list_branches()?
            .into_iter()
            .map(|branch| branch.oid().clone());

        let mut entries = Vec::new();
        Ancestors::new(tips, |oid: &ObjectId| {
            let commit = self.database().parse_object_as_commit(oid)?;
            let parents = commit.parents().as_slice().to_vec();
            entries.push((oid.clone(), commit));

            Ok(parents)
        })
        .try_for_each(|oid| oid.map(|_| ()))?;

        Ok(entries)
    }

    pub fn log(&self) -> anyhow::Result<()> {
        for (oid, commit) in self.log_entries()? {
            self.display_commit(&oid, &commit)?;
        }

        Ok(())
    }

    pub fn global_log(&self) -> anyhow::Result<()> {
        for (oid, commit) in self.global_log_entries()? {
            self.display_commit(&oid, &commit)?;
        }

        Ok(())
    }

    pub fn display_commit(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "{ENTRY_SEPARATOR}")?;
        writeln!(writer, "{}", format!("commit {oid}").yellow())?;
        if let [first, second] = commit.parents().as_slice() {
            writeln!(
                writer,
                "Merge: {} {}",
                first.to_short_oid(),
                second.to_short_oid()
            )?;
        }
        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
