//! Commit object
//!
//! A commit links one tree (the snapshot root) to at most one parent commit,
//! plus a committer label, a timestamp and a free-text message. The root
//! commit of a repository has no parent.
//!
//! The identifier is the digest of the full serialized form, so message,
//! committer and timestamp are all part of the content address: two commits
//! with the same tree and parent but different messages get different ids.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0tree <tree-sha>
//! parent <parent-sha>
//! committer <label> <timestamp> <timezone>
//!
//! <commit message>
//! ```
//!
//! The parent line is omitted for the root commit.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_kind::ObjectKind;
use anyhow::Context;
use bytes::Bytes;
use std::io::{BufRead, Write};

/// Environment variable overriding the committer label
pub const COMMITTER_ENV: &str = "GIL_COMMITTER";

const DEFAULT_COMMITTER: &str = "anonymous";

/// Committer label with the moment the snapshot was recorded
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Committer {
    label: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Committer {
    pub fn new(label: String) -> Self {
        Committer {
            label,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    pub fn new_with_timestamp(
        label: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        Committer { label, timestamp }
    }

    /// Committer taken from `GIL_COMMITTER`, falling back to a fixed label
    pub fn load_from_env() -> Self {
        let label = std::env::var(COMMITTER_ENV).unwrap_or_else(|_| DEFAULT_COMMITTER.to_string());
        Committer::new(label)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }

    /// Serialized form: `label timestamp timezone`
    pub fn display(&self) -> String {
        format!(
            "{} {} {}",
            self.label,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }
}

impl TryFrom<&str> for Committer {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // Format: "label timestamp timezone"; the label may contain spaces,
        // so split from the right
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            return Err(anyhow::anyhow!("Invalid committer format: {value}"));
        }

        let timezone = parts[0];
        let timestamp = parts[1]
            .parse::<i64>()
            .map_err(|_| anyhow::anyhow!("Invalid committer timestamp"))?;
        let label = parts[2].to_string();

        // %s fixes the instant, %z only relocates it; the unix timestamp
        // read back must equal the one that was written
        let datetime =
            chrono::DateTime::parse_from_str(&format!("{} {}", timestamp, timezone), "%s %z")
                .map_err(|_| anyhow::anyhow!("Invalid committer timezone"))?;

        Ok(Committer {
            label,
            timestamp: datetime,
        })
    }
}

/// Immutable snapshot record linking a tree to an optional parent commit
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    tree_oid: ObjectId,
    /// None for the root commit
    parent: Option<ObjectId>,
    committer: Committer,
    message: String,
}

impl Commit {
    pub fn new(
        tree_oid: ObjectId,
        parent: Option<ObjectId>,
        committer: Committer,
        message: String,
    ) -> Self {
        Commit {
            tree_oid,
            parent,
            committer,
            message,
        }
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn committer(&self) -> &Committer {
        &self.committer
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the message, for one-line display
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = vec![];

        object_content.push(format!("tree {}", self.tree_oid.as_ref()));
        if let Some(parent) = &self.parent {
            object_content.push(format!("parent {}", parent.as_ref()));
        }
        object_content.push(format!("committer {}", self.committer.display()));
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        let content_bytes = object_content.join("\n").into_bytes();

        let mut commit_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_kind().as_str(), content_bytes.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let content = String::from_utf8(content)?;
        let mut lines = content.lines();

        let tree_line = lines
            .next()
            .context("Invalid commit object: missing tree line")?;
        let tree_oid = tree_line
            .strip_prefix("tree ")
            .context("Invalid commit object: invalid tree line")?
            .to_string();
        let tree_oid = ObjectId::try_parse(tree_oid)?;

        let mut next_line = lines
            .next()
            .context("Invalid commit object: missing committer line")?;

        let parent = match next_line.strip_prefix("parent ") {
            Some(parent_oid) => {
                let parent = ObjectId::try_parse(parent_oid.to_string())?;
                next_line = lines
                    .next()
                    .context("Invalid commit object: missing committer line")?;
                Some(parent)
            }
            None => None,
        };

        let committer = next_line
            .strip_prefix("committer ")
            .context("Invalid commit object: invalid committer line")?;
        let committer = Committer::try_from(committer)?;

        // skip the empty line
        lines.next();

        let message = lines.collect::<Vec<&str>>().join("\n");
        Ok(Self::new(tree_oid, parent, committer, message))
    }
}

impl Object for Commit {
    fn object_kind(&self) -> ObjectKind {
        ObjectKind::Commit
    }

    fn display(&self) -> String {
        let mut lines = vec![];

        lines.push(format!("tree {}", self.tree_oid.as_ref()));
        if let Some(parent) = &self.parent {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        lines.push(format!("committer {}", self.committer.display()));
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn oid(seed: char) -> ObjectId {
        ObjectId::try_parse(seed.to_string().repeat(40)).unwrap()
    }

    fn committer() -> Committer {
        let timestamp = chrono::DateTime::parse_from_rfc3339("2024-06-01T12:00:00+02:00").unwrap();
        Committer::new_with_timestamp("stefan".to_string(), timestamp)
    }

    fn reparse(commit: &Commit) -> Commit {
        let payload = commit.serialize().unwrap();
        let header_end = payload.iter().position(|&b| b == 0).unwrap() + 1;
        Commit::deserialize(Cursor::new(payload.slice(header_end..))).unwrap()
    }

    #[test]
    fn test_root_commit_round_trip() {
        let commit = Commit::new(oid('a'), None, committer(), "first".to_string());
        let parsed = reparse(&commit);

        assert_eq!(parsed, commit);
        assert!(parsed.parent().is_none());
    }

    #[test]
    fn test_round_trip_preserves_instant_and_identifier() {
        // the unix timestamp and the object id must survive reparsing
        // unchanged, whichever side of UTC the committer sits on
        for zone in ["2024-06-01T12:00:00+02:00", "2024-06-01T12:00:00-05:00"] {
            let timestamp = chrono::DateTime::parse_from_rfc3339(zone).unwrap();
            let commit = Commit::new(
                oid('a'),
                None,
                Committer::new_with_timestamp("stefan".to_string(), timestamp),
                "tick".to_string(),
            );
            let parsed = reparse(&commit);

            assert_eq!(
                parsed.committer().timestamp().timestamp(),
                commit.committer().timestamp().timestamp()
            );
            assert_eq!(
                parsed.committer().timestamp().offset(),
                commit.committer().timestamp().offset()
            );
            assert_eq!(parsed.object_id().unwrap(), commit.object_id().unwrap());
        }
    }

    #[test]
    fn test_child_commit_round_trip_keeps_parent() {
        let commit = Commit::new(
            oid('a'),
            Some(oid('b')),
            committer(),
            "second\n\nwith a body".to_string(),
        );
        let parsed = reparse(&commit);

        assert_eq!(parsed, commit);
        assert_eq!(parsed.parent(), Some(&oid('b')));
        assert_eq!(parsed.message(), "second\n\nwith a body");
    }

    #[test]
    fn test_message_is_part_of_the_identifier() {
        // identical tree and parent with different messages must not collide
        let one = Commit::new(oid('a'), Some(oid('b')), committer(), "one".to_string());
        let other = Commit::new(oid('a'), Some(oid('b')), committer(), "two".to_string());

        assert_ne!(one.object_id().unwrap(), other.object_id().unwrap());
    }

    #[test]
    fn test_committer_label_with_spaces_survives() {
        let timestamp = chrono::DateTime::parse_from_rfc3339("2024-06-01T12:00:00+02:00").unwrap();
        let commit = Commit::new(
            oid('a'),
            None,
            Committer::new_with_timestamp("Stefan :)".to_string(), timestamp),
            "hi".to_string(),
        );
        let parsed = reparse(&commit);

        assert_eq!(parsed.committer().label(), "Stefan :)");
    }

    #[test]
    fn test_short_message_takes_first_line() {
        let commit = Commit::new(oid('a'), None, committer(), "title\nbody".to_string());
        assert_eq!(commit.short_message(), "title");
    }
}
