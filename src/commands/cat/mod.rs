// src/commands/cat/mod.rs
use crate::commands::types::diagnostic;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct CatCommand;

impl Command for CatCommand {
    fn name(&self) -> &'static str {
        "cat"
    }

    fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let args = &ctx.args;

        if args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "Usage: cat [OPTION]... FILE...\n\n\
                 Concatenate FILE(s) to standard output.\n\n\
                 Options:\n\
                   -n, --number     number all output lines\n\
                       --help       display this help and exit\n".to_string()
            );
        }

        let mut show_line_numbers = false;
        let mut files: Vec<&str> = Vec::new();

        for arg in args {
            match arg.as_str() {
                "-n" | "--number" => show_line_numbers = true,
                _ => files.push(arg),
            }
        }

        if files.is_empty() {
            return CommandResult::error("cat: missing file operand\n".to_string());
        }

        let mut stdout = String::new();
        let mut stderr = String::new();
        let mut exit_code = 0;
        let mut line_number = 1;

        for file in &files {
            match ctx.fs.read_file(ctx.cwd, file) {
                Ok(content) if show_line_numbers => {
                    for line in content.split_inclusive('\n') {
                        stdout.push_str(&format!("{:6}\t{}", line_number, line));
                        line_number += 1;
                    }
                }
                Ok(content) => stdout.push_str(content),
                Err(e) => {
                    stderr.push_str(&diagnostic("cat", "cannot read", file, &e));
                    exit_code = 1;
                }
            }
        }

        CommandResult::with_exit_code(stdout, stderr, exit_code)
    }
}
