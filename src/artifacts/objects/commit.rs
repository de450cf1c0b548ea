//! Commit object
//!
//! Commits are immutable snapshots. Each one records:
//! - Parent commit ID(s): none for a root commit, one normally, two for a merge
//! - A timestamp
//! - A manifest mapping every tracked path to the blob holding its content
//! - A message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! parent <second-parent-sha>
//! timestamp <unix-seconds> <timezone>
//! file <blob-sha> <path>
//! file <blob-sha> <path>
//!
//! <commit message>
//! ```
//!
//! Manifest lines are sorted by path, so equal commits always serialize to equal bytes.

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Path -> blob id mapping recorded by a commit
pub type Manifest = BTreeMap<PathBuf, ObjectId>;

pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// Parent links of a commit
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Parents {
    /// First commit of the repository
    Root,
    /// Ordinary commit on top of a single parent
    Normal(ObjectId),
    /// Merge commit: first the branch merged into, then the merged branch
    Merge([ObjectId; 2]),
}

impl Parents {
    pub fn try_from_vec(mut parents: Vec<ObjectId>) -> anyhow::Result<Self> {
        match parents.len() {
            0 => Ok(Parents::Root),
            1 => Ok(Parents::Normal(parents.remove(0))),
            2 => {
                let second = parents.remove(1);
                let first = parents.remove(0);
                Ok(Parents::Merge([first, second]))
            }
            count => anyhow::bail!("a commit has at most two parents, found {count}"),
        }
    }

    pub fn as_slice(&self) -> &[ObjectId] {
        match self {
            Parents::Root => &[],
            Parents::Normal(parent) => std::slice::from_ref(parent),
            Parents::Merge(parents) => parents,
        }
    }

    pub fn first(&self) -> Option<&ObjectId> {
        self.as_slice().first()
    }

    pub fn is_merge(&self) -> bool {
        matches!(self, Parents::Merge(_))
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    parents: Parents,
    timestamp: DateTime<FixedOffset>,
    manifest: Manifest,
    message: String,
}

impl Commit {
    pub fn new(
        message: String,
        parents: Parents,
        manifest: Manifest,
        timestamp: DateTime<FixedOffset>,
    ) -> Self {
        Commit {
            parents,
            timestamp,
            manifest,
            message,
        }
    }

    /// The root commit every repository starts with
    ///
    /// Its timestamp is the Unix epoch, so it hashes the same everywhere.
    pub fn initial() -> Self {
        Commit {
            parents: Parents::Root,
            timestamp: DateTime::<chrono::Utc>::UNIX_EPOCH.fixed_offset(),
            manifest: Manifest::new(),
            message: INITIAL_COMMIT_MESSAGE.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn parents(&self) -> &Parents {
        &self.parents
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn blob_for(&self, path: &Path) -> Option<&ObjectId> {
        self.manifest.get(path)
    }

    pub fn tracks(&self, path: &Path) -> bool {
        self.manifest.contains_key(path)
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Format timestamp like "Thu Jan 1 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    fn header_lines(&self) -> anyhow::Result<Vec<String>> {
        let mut lines = vec![];

        for parent in self.parents.as_slice() {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        lines.push(format!(
            "timestamp {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for (path, oid) in &self.manifest {
            let path = path
                .to_str()
                .with_context(|| format!("path is not valid UTF-8: {}", path.display()))?;
            if path.contains('\n') {
                anyhow::bail!("path contains a newline: {path:?}");
            }
            lines.push(format!("file {} {}", oid.as_ref(), path));
        }

        Ok(lines)
    }

    fn parse_timestamp(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
        let (seconds, timezone) = value
            .split_once(' ')
            .context("Invalid commit object: timestamp without timezone")?;
        let seconds = seconds
            .parse::<i64>()
            .context("Invalid commit object: timestamp is not a number")?;
        let offset = DateTime::parse_from_str(
            &format!("1970-01-01 00:00:00 {timezone}"),
            "%Y-%m-%d %H:%M:%S %z",
        )
        .context("Invalid commit object: bad timezone")?
        .offset()
        .to_owned();

        DateTime::from_timestamp(seconds, 0)
            .map(|utc| utc.with_timezone(&offset))
            .context("Invalid commit object: timestamp out of range")
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        frame(self.object_type(), &self.payload()?)
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .context("Invalid commit object: not UTF-8")?;

        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut parents = Vec::new();
        let mut timestamp = None;
        let mut manifest = Manifest::new();

        for line in header.lines() {
            let (key, value) = line
                .split_once(' ')
                .with_context(|| format!("Invalid commit object: malformed line {line:?}"))?;

            match key {
                "parent" => parents.push(ObjectId::try_parse(value.to_string())?),
                "timestamp" => timestamp = Some(Self::parse_timestamp(value)?),
                "file" => {
                    let (oid, path) = value
                        .split_once(' ')
                        .context("Invalid commit object: malformed file line")?;
                    manifest.insert(PathBuf::from(path), ObjectId::try_parse(oid.to_string())?);
                }
                other => anyhow::bail!("Invalid commit object: unknown field {other:?}"),
            }
        }

        Ok(Commit {
            parents: Parents::try_from_vec(parents)?,
            timestamp: timestamp.context("Invalid commit object: missing timestamp")?,
            manifest,
            message: message.to_string(),
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn payload(&self) -> anyhow::Result<Bytes> {
        let mut lines = self.header_lines()?;
        lines.push(String::new());
        lines.push(self.message.to_string());

        Ok(Bytes::from(lines.join("\n")))
    }

    fn display(&self) -> String {
        self.payload()
            .map(|payload| String::from_utf8_lossy(&payload).to_string())
            .unwrap_or_default()
    }
}
