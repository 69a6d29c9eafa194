use bytes::Bytes;
use std::path::{Path, PathBuf};

/// Name of the repository control directory, skipped by every walk
pub const CONTROL_DIR: &str = ".gil";

/// What a directory entry is, as far as the object model is concerned
///
/// Anything that is neither a regular file nor a directory (symlinks,
/// sockets, devices) has no object representation and surfaces as `Other`;
/// the tree builder turns that into a hard error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

/// A single classified directory entry
#[derive(Debug, Clone)]
pub struct WorkspaceEntry {
    pub name: String,
    pub kind: EntryKind,
}

/// Working-directory collaborator
///
/// Holds an explicit repository root; every operation takes paths relative
/// to it. The core never discovers the repository from process-global state.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List the entries of a directory (relative to the workspace root)
    ///
    /// The control directory is filtered out. Symlinks are not followed:
    /// they classify as `Other`.
    pub fn list_dir(&self, dir_path: &Path) -> anyhow::Result<Vec<WorkspaceEntry>> {
        let dir_path = self.path.join(dir_path);

        if !dir_path.is_dir() {
            anyhow::bail!("The specified path is not a directory: {:?}", dir_path);
        }

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&dir_path)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();

            if name == CONTROL_DIR {
                continue;
            }

            // file_type() does not follow symlinks
            let file_type = entry.file_type()?;
            let kind = if file_type.is_file() {
                EntryKind::File
            } else if file_type.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::Other
            };

            entries.push(WorkspaceEntry { name, kind });
        }

        Ok(entries)
    }

    /// Read the full content of a file (relative to the workspace root)
    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(file_path);

        let content = std::fs::read(&file_path)?;

        Ok(Bytes::from(content))
    }

    /// Path of the control directory inside this workspace
    pub fn control_path(&self) -> PathBuf {
        self.path.join(CONTROL_DIR)
    }
}
