//! gil: a minimal content-addressable snapshot store
//!
//! gil records directory trees as immutable, hash-identified objects and
//! links successive snapshots into a history, mirroring the plumbing layer
//! of a version-control system. It is not a full VCS: there is no merging,
//! no diffing, no status and no network transport.
//!
//! The crate is organized the way the repository on disk is:
//!
//! - [`areas`]: repository components (workspace, object database, refs)
//! - [`artifacts`]: object model, tree builder and history traversal
//! - [`commands`]: plumbing and porcelain operations on a [`areas::repository::Repository`]

pub mod areas;
pub mod artifacts;
pub mod commands;
