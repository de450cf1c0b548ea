//! Typed failures surfaced by repository operations
//!
//! Operations return `anyhow::Result` so that I/O context can be attached on the way up,
//! but every failure a caller is expected to react to is one of the variants below.
//! Callers recover the kind with `err.downcast_ref::<GitletError>()`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GitletError {
    /// A hash, commit, branch or path is absent where it is required
    #[error("{0}")]
    NotFound(String),
    /// Duplicate branch creation or repeated initialization
    #[error("{0}")]
    AlreadyExists(String),
    /// The request is well-formed but cannot be applied to the current state
    #[error("{0}")]
    InvalidOperation(String),
    /// The working directory holds files that the operation would clobber
    ///
    /// `modified` is set when at least one of them is a tracked file edited on disk.
    #[error("{}", conflict_message(.modified))]
    Conflict { paths: Vec<PathBuf>, modified: bool },
    /// A stored object is unreadable or malformed
    #[error("corrupt repository object {oid}: {reason}")]
    Corruption { oid: String, reason: String },
    /// The two branch tips share no commit
    #[error("branches {current} and {given} have no common ancestor")]
    UnrelatedHistories { current: String, given: String },
}

fn conflict_message(modified: &bool) -> &'static str {
    if *modified {
        "There is an untracked or modified file in the way; delete or restore it, or add and commit it first."
    } else {
        "There is an untracked file in the way; delete it, or add and commit it first."
    }
}

impl GitletError {
    pub fn not_found(message: impl Into<String>) -> Self {
        GitletError::NotFound(message.into())
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        GitletError::AlreadyExists(message.into())
    }

    pub fn invalid_operation(message: impl Into<String>) -> Self {
        GitletError::InvalidOperation(message.into())
    }

    pub fn corruption(oid: impl ToString, reason: impl Into<String>) -> Self {
        GitletError::Corruption {
            oid: oid.to_string(),
            reason: reason.into(),
        }
    }

    /// Expected, reported failures caused by user input
    ///
    /// Integrity failures and violated preconditions are not user errors.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            GitletError::NotFound(_)
                | GitletError::AlreadyExists(_)
                | GitletError::InvalidOperation(_)
                | GitletError::Conflict { .. }
        )
    }
}

/// Look for a typed failure anywhere in an error chain
pub fn error_kind(error: &anyhow::Error) -> Option<&GitletError> {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<GitletError>())
}
