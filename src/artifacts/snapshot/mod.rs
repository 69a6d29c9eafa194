//! Tree builder
//!
//! Walks a directory bottom-up, hashing and storing blobs and subtrees, and
//! produces the identifier of the root tree. The result depends only on the
//! names and byte content of the files underneath, never on filesystem
//! enumeration order or timestamps.
//!
//! The walk is all-or-nothing: an entry the object model cannot represent
//! aborts the whole build before any enclosing tree is stored, so no root
//! tree ever references a partial snapshot.

use crate::areas::database::{Database, StoreError, StoreOutcome};
use crate::areas::workspace::{EntryKind, Workspace};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use std::path::{Path, PathBuf};

/// Errors from a tree build
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The entry is neither a regular file nor a directory (symlink, device,
    /// socket); the object model has no representation for it.
    #[error("unsupported entry kind: {0:?}")]
    UnsupportedEntry(PathBuf),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Recursive snapshot walk over a workspace, storing into a database
///
/// Counts written vs. reused objects so the calling layer can report what
/// the walk did; the builder itself never prints.
pub struct TreeBuilder<'b> {
    workspace: &'b Workspace,
    database: &'b Database,
    written: usize,
    reused: usize,
}

impl<'b> TreeBuilder<'b> {
    pub fn new(workspace: &'b Workspace, database: &'b Database) -> Self {
        TreeBuilder {
            workspace,
            database,
            written: 0,
            reused: 0,
        }
    }

    /// Hash and store the directory at `dir_path` (relative to the
    /// workspace root), returning the identifier of its tree
    pub fn build(&mut self, dir_path: &Path) -> Result<ObjectId, BuildError> {
        let mut entries = Vec::new();

        for entry in self.workspace.list_dir(dir_path)? {
            let entry_path = dir_path.join(&entry.name);

            let oid = match entry.kind {
                EntryKind::File => {
                    let content = self.workspace.read_file(&entry_path)?;
                    let blob = Blob::new(content);
                    let oid = blob.object_id()?;
                    self.record(self.database.store(&blob)?);
                    oid
                }
                EntryKind::Directory => self.build(&entry_path)?,
                EntryKind::Other => {
                    return Err(BuildError::UnsupportedEntry(entry_path));
                }
            };

            entries.push(TreeEntry::new(oid, entry.name));
        }

        let tree = Tree::new(entries);
        let oid = tree.object_id()?;
        self.record(self.database.store(&tree)?);

        Ok(oid)
    }

    fn record(&mut self, outcome: StoreOutcome) {
        match outcome {
            StoreOutcome::Written => self.written += 1,
            StoreOutcome::AlreadyPresent => self.reused += 1,
        }
    }

    /// Objects actually written to disk during this build
    pub fn written(&self) -> usize {
        self.written
    }

    /// Objects that were already present and skipped
    pub fn reused(&self) -> usize {
        self.reused
    }
}
