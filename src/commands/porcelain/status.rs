use crate::areas::repository::Repository;
use crate::artifacts::status::file_change::IndexChangeType;
use crate::artifacts::status::status_info::{Status, StatusInfo};
use colored::Colorize;
use std::io::Write;

impl Repository {
    pub fn status_info(&self) -> anyhow::Result<StatusInfo> {
        let (_, head) = self.active_commit()?;
        let index = self.load_index()?;

        let info = Status::new(self.workspace(), &index, head.manifest()).initialize()?;

        Ok(info)
    }

    pub fn status(&self) -> anyhow::Result<()> {
        let info = self.status_info()?;
        let active = self.refs().active_branch_name()?;
        let branches = self.refs().list_branches()?;
        let mut writer = self.writer();

        writeln!(writer, "=== Branches ===")?;
        for branch in &branches {
            if branch.name() == &active {
                writeln!(writer, "{}", format!("*{}", branch.name()).green())?;
            } else {
                writeln!(writer, "{}", branch.name())?;
            }
        }
        writeln!(writer)?;

        writeln!(writer, "=== {} ===", IndexChangeType::Added)?;
        for path in info.staged_files() {
            writeln!(writer, "{}", path.display().to_string().green())?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== {} ===", IndexChangeType::Removed)?;
        for path in info.removed_files() {
            writeln!(writer, "{}", path.display().to_string().green())?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Modifications Not Staged For Commit ===")?;
        for (path, change) in info.workspace_changeset() {
            writeln!(writer, "{} {change}", path.display())?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Untracked Files ===")?;
        for path in info.untracked_files() {
            writeln!(writer, "{}", path.display().to_string().red())?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
