// src/commands/touch/mod.rs
use crate::commands::types::diagnostic;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct TouchCommand;

impl Command for TouchCommand {
    fn name(&self) -> &'static str {
        "touch"
    }

    fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "Usage: touch FILE...\n\n\
                 Create each FILE as an empty file if it does not exist.\n\n\
                 Options:\n\
                       --help         display this help and exit\n".to_string()
            );
        }

        let (_, files) = ctx.split_args();
        if files.is_empty() {
            return CommandResult::error("touch: missing file operand\n".to_string());
        }

        let mut stderr = String::new();
        let mut exit_code = 0;

        for file in &files {
            if let Err(e) = ctx.fs.touch(ctx.cwd, file) {
                stderr.push_str(&diagnostic("touch", "cannot touch", file, &e));
                exit_code = 1;
            }
        }

        CommandResult::with_exit_code(String::new(), stderr, exit_code)
    }
}
