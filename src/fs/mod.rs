//! File System Module
//!
//! Provides the in-memory directory tree the shell operates on:
//! - types: node variants, listing entries, options and `FsError`
//! - in_memory_fs: the arena-backed tree with resolution and mutation

pub mod types;
pub mod in_memory_fs;

pub use types::*;
pub use in_memory_fs::InMemoryFs;
pub use indextree::NodeId;
