use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::workspace::{CONTROL_DIR, Workspace};
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Upper bound on how far `discover` walks toward the filesystem root
const DISCOVERY_DEPTH: usize = 10;

/// Explicit repository handle
///
/// Bundles the three collaborators (workspace, object database, refs) for a
/// single repository root, plus the writer all user-facing reporting goes
/// through. Every core operation hangs off this handle; nothing in the crate
/// reaches for process-global state to find the repository.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;

        let database = Database::new(path.join(CONTROL_DIR).join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(path.join(CONTROL_DIR).into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            workspace,
            refs,
        })
    }

    /// Find the enclosing repository by walking upward from `start`
    ///
    /// This is a convenience for the CLI layer; the core itself only ever
    /// works off the handle returned here.
    pub fn discover(start: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let start = start.canonicalize()?;
        let mut current = start.as_path();

        for _ in 0..DISCOVERY_DEPTH {
            if current.join(CONTROL_DIR).is_dir() {
                return Self::new(&current.to_string_lossy(), writer);
            }
            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        anyhow::bail!(
            "not a gil repository (no {} directory found above {})",
            CONTROL_DIR,
            start.display()
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }
}
