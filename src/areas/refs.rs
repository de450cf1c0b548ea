//! Branches and HEAD
//!
//! - `refs/heads/<name>` holds the 40-character hash of the branch tip
//! - `HEAD` holds `ref: refs/heads/<name>`, naming the active branch
//!
//! HEAD always names a branch; there is no detached state. Every write goes to a
//! locked temporary file that is renamed over the ref, so a ref is either fully
//! replaced or left untouched.

use crate::artifacts::branch::branch_name::{Branch, BranchName, SymRefName};
use crate::artifacts::core::error::GitletError;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use fake::rand;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Leading dot keeps half-written refs out of branch listings
const TEMP_REF_PREFIX: &str = ".tmp-ref-";

pub const HEAD_REF_NAME: &str = "HEAD";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory (typically `.gitlet`)
    path: Box<Path>,
}

impl Refs {
    /// Create the first branch and point HEAD at it
    pub fn init(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        std::fs::create_dir_all(self.heads_path())
            .with_context(|| format!("failed to create {}", self.heads_path().display()))?;

        self.create_branch(name, oid)?;
        self.switch_head(name)
    }

    pub fn create_branch(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<Branch> {
        let branch_path = self.branch_path(name);

        if branch_path.exists() {
            return Err(GitletError::already_exists("A branch with that name already exists.").into());
        }

        self.update_ref_file(&branch_path, oid.as_ref())?;
        tracing::info!(branch = %name, oid = %oid, "branch created");

        Ok(Branch::new(name.clone(), oid.clone()))
    }

    pub fn resolve_branch(&self, name: &BranchName) -> anyhow::Result<Branch> {
        match self.try_resolve_branch(name)? {
            Some(branch) => Ok(branch),
            None => Err(GitletError::not_found("A branch with that name does not exist.").into()),
        }
    }

    pub fn try_resolve_branch(&self, name: &BranchName) -> anyhow::Result<Option<Branch>> {
        let branch_path = self.branch_path(name);

        if !branch_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("failed to read ref file at {}", branch_path.display()))?;
        let oid = ObjectId::try_parse(content.trim().to_string())
            .with_context(|| format!("malformed ref file at {}", branch_path.display()))?;

        Ok(Some(Branch::new(name.clone(), oid)))
    }

    /// Point an existing or new branch at `oid`
    ///
    /// The caller guarantees that `oid` names a stored commit.
    pub fn update_branch(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(&self.branch_path(name), oid.as_ref())?;
        tracing::debug!(branch = %name, oid = %oid, "branch moved");

        Ok(())
    }

    pub fn delete_branch(&self, name: &BranchName) -> anyhow::Result<ObjectId> {
        if &self.active_branch_name()? == name {
            return Err(GitletError::invalid_operation("Cannot remove the current branch.").into());
        }

        let branch = self.resolve_branch(name)?;
        let branch_path = self.branch_path(name);

        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {}", branch_path.display()))?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;
        tracing::info!(branch = %name, "branch deleted");

        Ok(branch.oid().clone())
    }

    /// Name of the branch HEAD points at
    pub fn active_branch_name(&self) -> anyhow::Result<BranchName> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read {}", head_path.display()))?;

        let captures = regex::Regex::new(SYMREF_REGEX)?
            .captures(content.trim())
            .with_context(|| format!("HEAD does not name a branch: {:?}", content.trim()))?;

        BranchName::try_parse_sym_ref_name(&SymRefName::new(captures[1].to_string()))
    }

    pub fn active_branch(&self) -> anyhow::Result<Branch> {
        let name = self.active_branch_name()?;

        self.try_resolve_branch(&name)?
            .with_context(|| format!("HEAD names missing branch {name}"))
    }

    /// Rebind HEAD to another branch without moving any branch
    pub fn switch_head(&self, name: &BranchName) -> anyhow::Result<()> {
        let sym_ref = SymRefName::for_branch(name);
        self.update_ref_file(&self.head_path(), &format!("ref: {}", sym_ref.as_ref_path()))?;
        tracing::debug!(branch = %name, "HEAD switched");

        Ok(())
    }

    /// Every branch, sorted by name
    pub fn list_branches(&self) -> anyhow::Result<Vec<Branch>> {
        let heads_path = self.heads_path();
        let mut branches = Vec::new();

        for entry in WalkDir::new(&heads_path).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file()
                || entry.file_name().to_string_lossy().starts_with(TEMP_REF_PREFIX)
            {
                continue;
            }

            let relative_path = entry.path().strip_prefix(&heads_path)?;
            let name = BranchName::try_parse(relative_path.to_string_lossy().to_string())?;
            if let Some(branch) = self.try_resolve_branch(&name)? {
                branches.push(branch);
            }
        }
        branches.sort_by(|left, right| left.name().cmp(right.name()));

        Ok(branches)
    }

    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> anyhow::Result<()> {
        let parent = path
            .parent()
            .with_context(|| format!("invalid ref path {}", path.display()))?;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent directories for {}", path.display()))?;

        let temp_path = parent.join(format!("{TEMP_REF_PREFIX}{}", rand::random::<u32>()));
        {
            let mut ref_file = std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("failed to open ref file at {}", temp_path.display()))?;
            let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
            lock.deref_mut().write_all(raw_ref.as_bytes())?;
            lock.deref_mut().sync_all()?;
        }

        std::fs::rename(&temp_path, path)
            .with_context(|| format!("failed to replace ref file at {}", path.display()))?;

        Ok(())
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {}", parent.display())
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    fn branch_path(&self, name: &BranchName) -> Box<Path> {
        self.path
            .join(SymRefName::for_branch(name).as_ref_path())
            .into_boxed_path()
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }
}
