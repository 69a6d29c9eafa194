//! Commit history traversal
//!
//! History is read by walking backward from the reference through parent
//! links, using the object store as the sole data source. The walk is finite
//! (it terminates at the parent-less root commit) and restartable: each call
//! to [`Repository::history`] re-resolves the reference.

use crate::areas::database::Database;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

/// Lazy walk over commits, newest first
pub struct History<'h> {
    database: &'h Database,
    next_oid: Option<ObjectId>,
}

impl<'h> History<'h> {
    pub fn new(database: &'h Database, start: ObjectId) -> Self {
        History {
            database,
            next_oid: Some(start),
        }
    }

    fn read_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        self.database
            .parse_object_as_commit(oid)?
            .ok_or_else(|| anyhow::anyhow!("object {} is not a commit", oid))
    }
}

impl Iterator for History<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = self.next_oid.take()?;

        match self.read_commit(&oid) {
            Ok(commit) => {
                self.next_oid = commit.parent().cloned();
                Some(Ok((oid, commit)))
            }
            // a broken chain ends the walk after surfacing the error
            Err(err) => Some(Err(err)),
        }
    }
}

impl Repository {
    /// Walk the commit history starting at the current reference
    ///
    /// Fails if the reference is unset: a fresh repository has no history to
    /// show, and on this path that is the caller's problem to report.
    pub fn history(&self) -> anyhow::Result<History<'_>> {
        let head = self
            .refs()
            .read_head()?
            .ok_or_else(|| anyhow::anyhow!("no reference: the repository has no snapshots yet"))?;

        Ok(History::new(self.database(), head))
    }
}
