// src/commands/mod.rs
pub mod cat;
pub mod cp;
pub mod echo;
pub mod help_cmd;
pub mod ls;
pub mod mkdir;
pub mod mv;
pub mod pwd;
pub mod registry;
pub mod rm;
pub mod rmdir_cmd;
pub mod touch;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use registry::{create_default_registry, CommandRegistry};
pub use types::{Command, CommandContext, CommandResult};
