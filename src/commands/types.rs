// src/commands/types.rs
use crate::fs::{FsError, InMemoryFs, NodeId};

/// Outcome of a single command: captured output plus exit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success(stdout: String) -> Self {
        Self { stdout, stderr: String::new(), exit_code: 0 }
    }

    pub fn error(stderr: String) -> Self {
        Self { stdout: String::new(), stderr, exit_code: 1 }
    }

    pub fn with_exit_code(stdout: String, stderr: String, exit_code: i32) -> Self {
        Self { stdout, stderr, exit_code }
    }
}

/// Everything a command may touch: its arguments, the working directory
/// and the tree itself.
pub struct CommandContext<'a> {
    pub args: Vec<String>,
    pub cwd: NodeId,
    pub fs: &'a mut InMemoryFs,
}

impl CommandContext<'_> {
    /// Split arguments into flags and operands. A lone `--` ends flag
    /// parsing.
    pub fn split_args(&self) -> (Vec<String>, Vec<String>) {
        let mut flags = Vec::new();
        let mut operands = Vec::new();
        let mut only_operands = false;
        for arg in &self.args {
            if only_operands {
                operands.push(arg.clone());
            } else if arg == "--" {
                only_operands = true;
            } else if arg.starts_with('-') && arg.len() > 1 {
                flags.push(arg.clone());
            } else {
                operands.push(arg.clone());
            }
        }
        (flags, operands)
    }
}

/// A shell command operating on the in-memory tree.
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;
    fn execute(&self, ctx: CommandContext<'_>) -> CommandResult;
}

/// Render `cmd: <action> 'operand': <reason>` for a failed operation.
pub(crate) fn diagnostic(cmd: &str, action: &str, operand: &str, err: &FsError) -> String {
    match err {
        FsError::IntoItself { .. }
        | FsError::Refused { .. }
        | FsError::DestinationExists { .. }
        | FsError::MissingOperand => {
            format!("{}: {}\n", cmd, err)
        }
        _ => format!("{}: {} '{}': {}\n", cmd, action, operand, err),
    }
}
