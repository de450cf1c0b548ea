use crate::areas::database::Database;
use crate::artifacts::core::error::GitletError;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::{MIN_OBJECT_ID_PREFIX_LENGTH, OBJECT_ID_LENGTH};

const NO_SUCH_COMMIT: &str = "No commit with that id exists.";

/// A commit named on the command line
///
/// - Full ids: 40 hexadecimal characters
/// - Abbreviated ids: at least 4 hexadecimal characters, unique among stored commits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    Full(ObjectId),
    Prefix(String),
}

impl Revision {
    pub fn try_parse(revision: &str) -> anyhow::Result<Revision> {
        let looks_like_oid = revision.len() >= MIN_OBJECT_ID_PREFIX_LENGTH
            && revision.len() <= OBJECT_ID_LENGTH
            && revision.chars().all(|c| c.is_ascii_hexdigit());

        if !looks_like_oid {
            return Err(GitletError::not_found(NO_SUCH_COMMIT).into());
        }

        if revision.len() == OBJECT_ID_LENGTH {
            Ok(Revision::Full(ObjectId::try_parse(revision.to_string())?))
        } else {
            Ok(Revision::Prefix(revision.to_ascii_lowercase()))
        }
    }

    /// Resolve to the id of a stored commit
    pub fn resolve(&self, database: &Database) -> anyhow::Result<ObjectId> {
        let candidates = match self {
            Revision::Full(oid) => vec![oid.clone()],
            Revision::Prefix(prefix) => database.find_objects_by_prefix(prefix)?,
        };

        let commits = candidates
            .into_iter()
            .filter(|oid| matches!(database.object_type(oid), Ok(ObjectType::Commit)))
            .collect::<Vec<_>>();

        match commits.as_slice() {
            [] => Err(GitletError::not_found(NO_SUCH_COMMIT).into()),
            [oid] => Ok(oid.clone()),
            _ => {
                let candidates = commits
                    .iter()
                    .map(ObjectId::to_short_oid)
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(GitletError::invalid_operation(format!(
                    "Commit id {self} is ambiguous; candidates are {candidates}."
                ))
                .into())
            }
        }
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Revision::Full(oid) => write!(f, "{oid}"),
            Revision::Prefix(prefix) => write!(f, "{prefix}"),
        }
    }
}
