use crate::artifacts::branch::{HEADS_PREFIX, INVALID_BRANCH_NAME_REGEX};
use crate::artifacts::core::error::GitletError;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;

/// Path of a ref relative to the repository directory, e.g. `refs/heads/master`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, new)]
pub struct SymRefName(String);

impl SymRefName {
    pub fn for_branch(name: &BranchName) -> Self {
        SymRefName(format!("{HEADS_PREFIX}{name}"))
    }

    pub fn as_ref_path(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if name.is_empty() {
            return Err(GitletError::invalid_operation("A branch name cannot be empty.").into());
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if re.is_match(&name) {
            Err(GitletError::invalid_operation(format!("{name:?} is not a valid branch name.")).into())
        } else {
            Ok(Self(name))
        }
    }

    pub fn try_parse_sym_ref_name(sym_ref_name: &SymRefName) -> anyhow::Result<Self> {
        let name = sym_ref_name
            .0
            .strip_prefix(HEADS_PREFIX)
            .with_context(|| {
                format!(
                    "symbolic ref name must start with '{HEADS_PREFIX}', got '{}'",
                    sym_ref_name.0
                )
            })?;

        Self::try_parse(name.to_string())
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A branch as a value: two branches are equal when name and tip are equal
#[derive(Debug, Clone, PartialEq, Eq, Hash, new)]
pub struct Branch {
    name: BranchName,
    oid: ObjectId,
}

impl Branch {
    pub fn name(&self) -> &BranchName {
        &self.name
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }
}
