use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_kind::ObjectKind;
use crate::artifacts::objects::tree::Tree;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};

/// Whether a store call actually wrote anything
///
/// Re-storing an existing object is a no-op, not an error; this is what lets
/// the tree builder re-hash a whole directory on every snapshot while only
/// genuinely new content touches the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    Written,
    AlreadyPresent,
}

/// Errors surfaced by the object store
///
/// `NotFound` and `Corrupt` must reach the caller unchanged: silently
/// substituting an object would break the content-addressing guarantee.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    #[error("corrupt object {id}: {reason}")]
    Corrupt { id: ObjectId, reason: String },

    #[error("failed to serialize object: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Content-addressed object store under `.gil/objects`
///
/// One zlib-compressed file per object, keyed by the fan-out path of its id.
/// Write-once, read-many: objects are never rewritten in place.
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Persist an object under its identifier, unless it is already present
    pub fn store(&self, object: &impl Object) -> Result<StoreOutcome, StoreError> {
        let object_content = object
            .serialize()
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let object_path = self.path.join(
            object
                .object_path()
                .map_err(|e| StoreError::Serialization(e.to_string()))?,
        );

        if object_path.exists() {
            return Ok(StoreOutcome::AlreadyPresent);
        }

        let object_dir = object_path.parent().ok_or_else(|| {
            StoreError::Io(std::io::Error::other(format!(
                "invalid object path {}",
                object_path.display()
            )))
        })?;
        std::fs::create_dir_all(object_dir)?;

        self.write_object(&object_path, object_content)?;

        Ok(StoreOutcome::Written)
    }

    /// Whether an object with this identifier exists in the store
    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).exists()
    }

    /// Read the raw decompressed bytes of an object
    pub fn load(&self, object_id: &ObjectId) -> Result<Bytes, StoreError> {
        let object_path = self.path.join(object_id.to_path());

        self.read_object(object_id, object_path)
    }

    /// Read an object and decode it into its typed variant
    pub fn parse_object(&self, object_id: &ObjectId) -> Result<ObjectBox, StoreError> {
        let (object_kind, object_reader) = self.parse_object_as_bytes(object_id)?;

        let corrupt = |e: anyhow::Error| StoreError::Corrupt {
            id: object_id.clone(),
            reason: e.to_string(),
        };

        match object_kind {
            ObjectKind::Blob => Ok(ObjectBox::Blob(Box::new(
                Blob::deserialize(object_reader).map_err(corrupt)?,
            ))),
            ObjectKind::Tree => Ok(ObjectBox::Tree(Box::new(
                Tree::deserialize(object_reader).map_err(corrupt)?,
            ))),
            ObjectKind::Commit => Ok(ObjectBox::Commit(Box::new(
                Commit::deserialize(object_reader).map_err(corrupt)?,
            ))),
        }
    }

    /// Read an object expecting a tree; None if it is some other kind
    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> Result<Option<Tree>, StoreError> {
        match self.parse_object(object_id)? {
            ObjectBox::Tree(tree) => Ok(Some(*tree)),
            _ => Ok(None),
        }
    }

    /// Read an object expecting a commit; None if it is some other kind
    pub fn parse_object_as_commit(
        &self,
        object_id: &ObjectId,
    ) -> Result<Option<Commit>, StoreError> {
        match self.parse_object(object_id)? {
            ObjectBox::Commit(commit) => Ok(Some(*commit)),
            _ => Ok(None),
        }
    }

    /// Read only the kind tag of an object
    pub fn object_kind(&self, object_id: &ObjectId) -> Result<ObjectKind, StoreError> {
        let (object_kind, _) = self.parse_object_as_bytes(object_id)?;
        Ok(object_kind)
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> Result<(ObjectKind, impl BufRead), StoreError> {
        let object_content = self.load(object_id)?;
        let mut object_reader = Cursor::new(object_content);

        let object_kind =
            ObjectKind::parse_header(&mut object_reader).map_err(|e| StoreError::Corrupt {
                id: object_id.clone(),
                reason: e.to_string(),
            })?;

        Ok((object_kind, object_reader))
    }

    fn read_object(&self, object_id: &ObjectId, object_path: PathBuf) -> Result<Bytes, StoreError> {
        if !object_path.exists() {
            return Err(StoreError::NotFound(object_id.clone()));
        }

        let object_content = std::fs::read(&object_path)?;

        Self::decompress(object_content.into()).map_err(|e| StoreError::Corrupt {
            id: object_id.clone(),
            reason: e.to_string(),
        })
    }

    fn write_object(&self, object_path: &Path, object_content: Bytes) -> Result<(), StoreError> {
        let object_dir = object_path.parent().ok_or_else(|| {
            StoreError::Io(std::io::Error::other(format!(
                "invalid object path {}",
                object_path.display()
            )))
        })?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)?;

        file.write_all(&object_content)?;

        // rename the temp file to the object file to make the write atomic
        std::fs::rename(&temp_object_path, object_path)?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    /// Find all objects whose id starts with the given hex prefix
    ///
    /// Used to resolve abbreviated ids from the command line. Zero matches
    /// means unknown, more than one means the prefix is ambiguous; both are
    /// decided by the caller.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let mut matches = Vec::new();

        if prefix.len() >= 2 {
            // the fan-out directory is known, search only there
            let dir_name = &prefix[..2];
            let file_prefix = &prefix[2..];
            let dir_path = self.path.join(dir_name);

            if dir_path.is_dir() {
                for entry in std::fs::read_dir(&dir_path)? {
                    let entry = entry?;
                    let file_name = entry.file_name();
                    let file_name_str = file_name.to_string_lossy();

                    if file_name_str.starts_with(file_prefix) {
                        let full_oid = format!("{}{}", dir_name, file_name_str);
                        if let Ok(oid) = ObjectId::try_parse(full_oid) {
                            matches.push(oid);
                        }
                    }
                }
            }
        } else {
            // short prefix: every fan-out directory is a candidate
            for i in 0..=255 {
                let dir_name = format!("{:02x}", i);
                let dir_path = self.path.join(&dir_name);

                if dir_path.is_dir() {
                    for entry in std::fs::read_dir(&dir_path)? {
                        let entry = entry?;
                        let file_name = entry.file_name();
                        let file_name_str = file_name.to_string_lossy();
                        let full_oid = format!("{}{}", dir_name, file_name_str);

                        if full_oid.starts_with(prefix) {
                            let oid = ObjectId::try_parse(full_oid)?;
                            matches.push(oid);
                        }
                    }
                }
            }
        }

        Ok(matches)
    }
}
