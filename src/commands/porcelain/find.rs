use crate::areas::repository::Repository;
use crate::artifacts::core::error::GitletError;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Ids of every reachable commit whose message contains `pattern`
    pub fn find_commits(&self, pattern: &str) -> anyhow::Result<Vec<ObjectId>> {
        let matches = self
            .global_log_entries()?
            .into_iter()
            .filter(|(_, commit)| commit.message().contains(pattern))
            .map(|(oid, _)| oid)
            .collect::<Vec<_>>();

        if matches.is_empty() {
            return Err(GitletError::not_found("Found no commit with that message.").into());
        }

        Ok(matches)
    }

    pub fn find(&self, pattern: &str) -> anyhow::Result<()> {
        for oid in self.find_commits(pattern)? {
            writeln!(self.writer(), "{oid}")?;
        }

        Ok(())
    }
}
