//! vfs-shell - an in-memory filesystem driven by shell-like commands
//!
//! The tree lives in [`fs::InMemoryFs`]; commands in [`commands`] mutate it
//! through path resolution relative to a working directory, and
//! [`session::Session`] ties the two together with history and exit status.

pub mod commands;
pub mod config;
pub mod fs;
pub mod session;

pub use config::{ConfigError, ShellOptions};
pub use fs::{FsError, InMemoryFs, NodeId};
pub use session::{ExecResult, Session};
