//! Command implementations
//!
//! Organized into two categories, following git's split:
//!
//! - `plumbing`: direct object manipulation (hash-object, cat-file)
//! - `porcelain`: user-facing workflows (init, commit, log, graph)
//!
//! Every command is an `impl Repository` block: the repository handle is the
//! only entry point, and all output goes through its writer.

pub mod plumbing;
pub mod porcelain;
