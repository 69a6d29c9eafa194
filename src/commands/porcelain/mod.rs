//! Porcelain commands (user-facing operations)
//!
//! - `init`: create the repository skeleton
//! - `snapshot`: record the working tree as a commit (`gil commit`)
//! - `log`: show snapshot history
//! - `graph`: export the object graph as Graphviz DOT

pub mod graph;
pub mod init;
pub mod log;
pub mod snapshot;
