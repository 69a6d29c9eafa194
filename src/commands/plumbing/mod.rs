//! Plumbing commands (low-level object operations)
//!
//! Direct access to the object store, equivalent to git's `hash-object` and
//! `cat-file`. Building blocks for inspection and scripting.

pub mod cat_file;
pub mod hash_object;
