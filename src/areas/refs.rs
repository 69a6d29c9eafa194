//! References: HEAD and branch heads
//!
//! A reference is a named mutable cell pointing at the latest commit. HEAD
//! is symbolic (`ref: refs/heads/main`) and the branch file under
//! `refs/heads/` holds a raw 40-character commit id, nothing else.
//!
//! A fresh repository has an existing HEAD symref but no branch file yet;
//! that state reads back as `None` and is the expected, recoverable
//! "no reference" case of the very first snapshot.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Branch every new repository starts on
pub const DEFAULT_BRANCH: &str = "main";

/// Reference manager rooted at the control directory (`.gil`)
#[derive(Debug, new)]
pub struct Refs {
    path: Box<Path>,
}

/// A reference file's content: either a pointer to another ref or a raw id
#[derive(Debug, Clone)]
enum SymRefOrOid {
    SymRef { name: String },
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn read_symref_or_oid(path: &Path) -> anyhow::Result<Option<SymRefOrOid>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        if let Some(symref_match) = symref_match {
            Ok(Some(SymRefOrOid::SymRef {
                name: symref_match[1].to_string(),
            }))
        } else {
            Ok(Some(SymRefOrOid::Oid(ObjectId::try_parse(
                content.to_string(),
            )?)))
        }
    }
}

impl Refs {
    /// Resolve HEAD to a commit id
    ///
    /// `None` means the reference cell is unset: a fresh repository with no
    /// snapshot yet. Callers branch on the option; there is no error case
    /// for "no reference".
    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.read_symref(&self.head_path())
    }

    /// Advance HEAD to a new commit id
    ///
    /// Writes through the symref chain so the branch file is what actually
    /// changes. The final write happens under an exclusive advisory lock.
    pub fn update_head(&self, oid: ObjectId) -> anyhow::Result<()> {
        self.update_symref(self.head_path().as_ref(), oid)
    }

    /// Point HEAD at a branch, creating the symref file
    pub fn set_head(&self, branch: &str) -> anyhow::Result<()> {
        self.write_ref_file(self.head_path(), format!("ref: refs/heads/{}", branch))
    }

    fn read_symref(&self, path: &Path) -> anyhow::Result<Option<ObjectId>> {
        let ref_content = SymRefOrOid::read_symref_or_oid(path)?;

        match ref_content {
            Some(SymRefOrOid::SymRef { name }) => {
                self.read_symref(self.path.join(name).as_path())
            }
            Some(SymRefOrOid::Oid(oid)) => Ok(Some(oid)),
            None => Ok(None),
        }
    }

    fn update_symref(&self, path: &Path, oid: ObjectId) -> anyhow::Result<()> {
        let ref_content = SymRefOrOid::read_symref_or_oid(path)?;

        match ref_content {
            Some(SymRefOrOid::SymRef { name }) => {
                let target_path = self.path.join(name);
                self.update_symref(target_path.as_path(), oid)
            }
            Some(SymRefOrOid::Oid(_)) | None => self.write_ref_file(
                path.to_path_buf().into_boxed_path(),
                oid.as_ref().to_string(),
            ),
        }
    }

    fn write_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.clone())
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join("HEAD").into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }

    pub fn tags_path(&self) -> Box<Path> {
        self.refs_path().join("tags").into_boxed_path()
    }
}
