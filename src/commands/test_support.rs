use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::{InMemoryFs, NodeId};

pub(crate) fn run(cmd: &dyn Command, fs: &mut InMemoryFs, args: &[&str]) -> CommandResult {
    let cwd = fs.root();
    run_in(cmd, fs, cwd, args)
}

pub(crate) fn run_in(cmd: &dyn Command, fs: &mut InMemoryFs, cwd: NodeId, args: &[&str]) -> CommandResult {
    cmd.execute(CommandContext {
        args: args.iter().map(|s| s.to_string()).collect(),
        cwd,
        fs,
    })
}
