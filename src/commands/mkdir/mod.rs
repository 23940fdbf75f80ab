// src/commands/mkdir/mod.rs
use crate::commands::types::diagnostic;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::MkdirOptions;

pub struct MkdirCommand;

impl Command for MkdirCommand {
    fn name(&self) -> &'static str {
        "mkdir"
    }

    fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "Usage: mkdir [OPTION]... DIRECTORY...\n\n\
                 Create the DIRECTORY(ies), if they do not already exist.\n\n\
                 Options:\n\
                   -p, --parents    no error if existing, make parent directories as needed\n\
                   -v, --verbose    print a message for each created directory\n\
                       --help       display this help and exit\n".to_string()
            );
        }

        let (flags, dirs) = ctx.split_args();
        let mut parents = false;
        let mut verbose = false;

        for flag in &flags {
            match flag.as_str() {
                "--parents" => parents = true,
                "--verbose" => verbose = true,
                short if !short.starts_with("--") => {
                    for c in short.chars().skip(1) {
                        match c {
                            'p' => parents = true,
                            'v' => verbose = true,
                            _ => return CommandResult::error(format!("mkdir: invalid option -- '{}'\n", c)),
                        }
                    }
                }
                long => return CommandResult::error(format!("mkdir: unrecognized option '{}'\n", long)),
            }
        }

        if dirs.is_empty() {
            return CommandResult::error("mkdir: missing operand\n".to_string());
        }

        let mut stdout = String::new();
        let mut stderr = String::new();
        let mut exit_code = 0;
        let opts = MkdirOptions { parents };

        for dir in &dirs {
            match ctx.fs.mkdir(ctx.cwd, dir, &opts) {
                Ok(_) => {
                    if verbose {
                        stdout.push_str(&format!("mkdir: created directory '{}'\n", dir));
                    }
                }
                Err(e) => {
                    stderr.push_str(&diagnostic("mkdir", "cannot create directory", dir, &e));
                    exit_code = 1;
                }
            }
        }

        CommandResult::with_exit_code(stdout, stderr, exit_code)
    }
}
