//! Snapshot object types and operations
//!
//! gil stores every piece of content as an immutable object identified by its
//! SHA-1 hash. There are three kinds:
//!
//! - **Blob**: raw file content
//! - **Tree**: a directory snapshot (named child references, sorted)
//! - **Commit**: a tree plus an optional parent commit and metadata
//!
//! All objects serialize to the self-describing form `<kind> <size>\0<payload>`,
//! and an object's identifier is the digest of exactly those bytes, so the id
//! is reproducible from the stored payload alone.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_kind;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
