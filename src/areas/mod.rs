//! Core repository components
//!
//! The fundamental building blocks of a gil repository:
//!
//! - `database`: content-addressed object store (blobs, trees, commits)
//! - `refs`: reference management (HEAD, branch heads)
//! - `repository`: explicit repository handle tying the pieces together
//! - `workspace`: working directory file system operations

pub mod database;
pub mod refs;
pub mod repository;
pub mod workspace;
