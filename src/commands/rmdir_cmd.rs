use crate::commands::types::diagnostic;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct RmdirCommand;

const USAGE: &str = "Usage: rmdir [-v] DIRECTORY...
Remove empty directories.

Options:
  -v, --verbose   Output a diagnostic for every directory processed
      --help      Display this help and exit";

impl Command for RmdirCommand {
    fn name(&self) -> &'static str {
        "rmdir"
    }

    fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let mut verbose = false;
        let mut dirs = Vec::new();

        for arg in &ctx.args {
            match arg.as_str() {
                "--help" => return CommandResult::success(format!("{}\n", USAGE)),
                "-v" | "--verbose" => verbose = true,
                _ if arg.starts_with('-') && arg.len() > 1 => {
                    for c in arg.chars().skip(1) {
                        match c {
                            'v' => verbose = true,
                            _ => return CommandResult::error(format!("rmdir: invalid option -- '{}'\n", c)),
                        }
                    }
                }
                _ => dirs.push(arg.clone()),
            }
        }

        if dirs.is_empty() {
            return CommandResult::error("rmdir: missing operand\n".to_string());
        }

        let mut stdout = String::new();
        let mut stderr = String::new();
        let mut exit_code = 0;

        for dir in &dirs {
            match ctx.fs.rmdir(ctx.cwd, dir) {
                Ok(()) => {
                    if verbose {
                        stdout.push_str(&format!("rmdir: removing directory, '{}'\n", dir));
                    }
                }
                Err(e) => {
                    stderr.push_str(&diagnostic("rmdir", "failed to remove", dir, &e));
                    exit_code = 1;
                }
            }
        }

        CommandResult::with_exit_code(stdout, stderr, exit_code)
    }
}
