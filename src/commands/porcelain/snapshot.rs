use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Commit, Committer};
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::snapshot::TreeBuilder;
use colored::Colorize;
use std::io::Write;
use std::path::Path;

/// Result of a snapshot attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotOutcome {
    /// A new commit was stored and the reference advanced to it
    Created(ObjectId),
    /// The working tree hashes to the current commit's tree; nothing was
    /// stored and the reference was not touched
    NoChange,
}

impl Repository {
    /// Record the working tree as a new commit on top of the current head
    ///
    /// Builds the root tree, compares it against the tree of the commit HEAD
    /// points at, and only constructs a commit when they differ. The
    /// reference is advanced exactly once, after the commit object is
    /// durably stored. Re-snapshotting an unchanged tree is a pure no-op.
    ///
    /// Concurrent snapshots against the same repository are not supported:
    /// the ref write itself is file-locked, but the whole
    /// resolve-build-store-advance sequence is not atomic.
    pub fn snapshot(&self, message: &str) -> anyhow::Result<SnapshotOutcome> {
        let mut builder = TreeBuilder::new(self.workspace(), self.database());
        self.snapshot_with(&mut builder, message)
    }

    /// Snapshot through a caller-owned builder, leaving its written/reused
    /// tallies available for reporting afterwards
    pub fn snapshot_with(
        &self,
        builder: &mut TreeBuilder<'_>,
        message: &str,
    ) -> anyhow::Result<SnapshotOutcome> {
        let tree_oid = builder.build(Path::new(""))?;

        let parent = self.refs().read_head()?;
        if let Some(parent_oid) = &parent {
            let parent_commit = self
                .database()
                .parse_object_as_commit(parent_oid)?
                .ok_or_else(|| anyhow::anyhow!("HEAD does not point at a commit"))?;

            if parent_commit.tree_oid() == &tree_oid {
                return Ok(SnapshotOutcome::NoChange);
            }
        }

        let committer = Committer::load_from_env();
        let message = message.trim().to_string();

        let commit = Commit::new(tree_oid, parent, committer, message);
        let commit_oid = commit.object_id()?;
        self.database().store(&commit)?;
        self.refs().update_head(commit_oid.clone())?;

        Ok(SnapshotOutcome::Created(commit_oid))
    }

    /// CLI entry point: snapshot and report what happened
    pub fn commit(&self, message: &str) -> anyhow::Result<()> {
        let is_root = self.refs().read_head()?.is_none();
        let mut builder = TreeBuilder::new(self.workspace(), self.database());

        match self.snapshot_with(&mut builder, message)? {
            SnapshotOutcome::Created(commit_oid) => {
                let root_marker = if is_root { "(root-commit) " } else { "" };
                let commit = self
                    .database()
                    .parse_object_as_commit(&commit_oid)?
                    .ok_or_else(|| anyhow::anyhow!("stored commit not readable"))?;

                writeln!(
                    self.writer(),
                    "[{}{}] {}",
                    root_marker,
                    commit_oid.to_short_oid(),
                    commit.short_message()
                )?;
                writeln!(
                    self.writer(),
                    " {} objects written, {} reused",
                    builder.written(),
                    builder.reused()
                )?;
            }
            SnapshotOutcome::NoChange => {
                writeln!(
                    self.writer(),
                    "{} nothing changed, nothing to commit",
                    "warning:".yellow()
                )?;
            }
        }

        Ok(())
    }
}
