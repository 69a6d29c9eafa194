//! Snapshot data structures and algorithms
//!
//! - `history`: backward walk over the commit chain
//! - `objects`: object model (blob, tree, commit) and hashing
//! - `snapshot`: recursive tree builder

pub mod history;
pub mod objects;
pub mod snapshot;
