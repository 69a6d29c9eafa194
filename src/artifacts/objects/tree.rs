//! Tree object
//!
//! Trees are directory snapshots: a sequence of `(id, name)` child
//! references, where a child may be a blob or another tree. The distinction
//! is not recorded in the tree itself; it is recovered by reading the child's
//! kind tag from the store.
//!
//! ## Ordering
//!
//! Entries are sorted by `(id, name)` before serialization, so two
//! directories with identical content hash identically no matter in which
//! order the filesystem enumerated them. Names are part of the serialized
//! payload, which means they are part of the hash: permuting names across
//! children changes the tree's identifier.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`, each entry `<name>\0<20-byte-sha1>`

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_kind::ObjectKind;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};

/// One named child reference inside a tree
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, new)]
pub struct TreeEntry {
    oid: ObjectId,
    name: String,
}

impl TreeEntry {
    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Immutable content-addressed directory snapshot
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tree {
    /// Children in `(id, name)` order
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Build a tree from child references collected in any order
    ///
    /// Sorting happens here, once, so every constructed tree is canonical.
    pub fn new(mut entries: Vec<TreeEntry>) -> Self {
        entries.sort();
        Tree { entries }
    }

    pub fn entries(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut content_bytes = Vec::new();
        for entry in &self.entries {
            content_bytes.write_all(entry.name.as_bytes())?;
            content_bytes.push(0);
            entry.oid.write_h40_to(&mut content_bytes)?;
        }

        let mut tree_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_kind().as_str(), content_bytes.len());
        tree_bytes.write_all(header.as_bytes())?;
        tree_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(tree_bytes))
    }
}

impl Unpackable for Tree {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let mut reader = reader;
        let mut entries = Vec::new();

        let mut name_bytes = Vec::new();
        loop {
            name_bytes.clear();
            let n = reader.read_until(b'\0', &mut name_bytes)?;
            if n == 0 {
                break; // clean EOF: no more entries
            }
            if *name_bytes.last().unwrap() != b'\0' {
                return Err(anyhow::anyhow!("unexpected EOF in entry name"));
            }
            name_bytes.pop(); // drop NUL
            let name = std::str::from_utf8(&name_bytes)?.to_owned();

            let oid =
                ObjectId::read_h40_from(&mut reader).context("unexpected EOF in object id")?;

            entries.push(TreeEntry::new(oid, name));
        }

        Ok(Tree::new(entries))
    }
}

impl Object for Tree {
    fn object_kind(&self) -> ObjectKind {
        ObjectKind::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{}\t{}", entry.oid.as_ref(), entry.name))
            .collect::<Vec<String>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn oid(seed: char) -> ObjectId {
        ObjectId::try_parse(seed.to_string().repeat(40)).unwrap()
    }

    #[test]
    fn test_entry_order_does_not_affect_identifier() {
        let forward = Tree::new(vec![
            TreeEntry::new(oid('a'), "a.txt".to_string()),
            TreeEntry::new(oid('b'), "b.txt".to_string()),
            TreeEntry::new(oid('c'), "sub".to_string()),
        ]);
        let shuffled = Tree::new(vec![
            TreeEntry::new(oid('c'), "sub".to_string()),
            TreeEntry::new(oid('a'), "a.txt".to_string()),
            TreeEntry::new(oid('b'), "b.txt".to_string()),
        ]);

        assert_eq!(forward.object_id().unwrap(), shuffled.object_id().unwrap());
    }

    #[test]
    fn test_permuted_names_change_identifier() {
        // same child ids, names swapped: must not collide
        let one = Tree::new(vec![
            TreeEntry::new(oid('a'), "x.txt".to_string()),
            TreeEntry::new(oid('b'), "y.txt".to_string()),
        ]);
        let other = Tree::new(vec![
            TreeEntry::new(oid('a'), "y.txt".to_string()),
            TreeEntry::new(oid('b'), "x.txt".to_string()),
        ]);

        assert_ne!(one.object_id().unwrap(), other.object_id().unwrap());
    }

    #[test]
    fn test_serialization_round_trip() {
        let tree = Tree::new(vec![
            TreeEntry::new(oid('1'), "readme.md".to_string()),
            TreeEntry::new(oid('2'), "src".to_string()),
        ]);

        let payload = tree.serialize().unwrap();
        let header_end = payload.iter().position(|&b| b == 0).unwrap() + 1;
        let parsed = Tree::deserialize(Cursor::new(payload.slice(header_end..))).unwrap();

        assert_eq!(parsed, tree);
    }

    #[test]
    fn test_empty_tree_round_trip() {
        let tree = Tree::default();

        let payload = tree.serialize().unwrap();
        let header_end = payload.iter().position(|&b| b == 0).unwrap() + 1;
        let parsed = Tree::deserialize(Cursor::new(payload.slice(header_end..))).unwrap();

        assert!(parsed.is_empty());
        assert_eq!(parsed.object_id().unwrap(), tree.object_id().unwrap());
    }
}
