// src/commands/mv/mod.rs
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::FsError;

pub struct MvCommand;

fn describe(src: &str, dest: &str, err: &FsError) -> String {
    match err {
        FsError::NotFound { path } if path == src => {
            format!("mv: cannot stat '{}': No such file or directory\n", src)
        }
        FsError::IntoItself { .. } => {
            format!("mv: cannot move '{}' to a subdirectory of itself, '{}'\n", src, dest)
        }
        FsError::DestinationExists { .. } => "mv: destination exists\n".to_string(),
        FsError::Refused { .. } => format!("mv: cannot move '{}': Device or resource busy\n", src),
        _ => format!("mv: cannot move '{}' to '{}': {}\n", src, dest, err),
    }
}

impl Command for MvCommand {
    fn name(&self) -> &'static str {
        "mv"
    }

    fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "Usage: mv [OPTION]... SOURCE... DEST\n\n\
                 Rename SOURCE to DEST, or move SOURCE(s) to DIRECTORY.\n\
                 Existing files are never overwritten.\n\n\
                 Options:\n\
                   -v, --verbose      explain what is being done\n\
                       --help         display this help and exit\n".to_string()
            );
        }

        let (flags, mut paths) = ctx.split_args();
        let mut verbose = false;

        for flag in &flags {
            match flag.as_str() {
                "-v" | "--verbose" => verbose = true,
                other => return CommandResult::error(format!("mv: unrecognized option '{}'\n", other)),
            }
        }

        let dest = match paths.len() {
            0 => return CommandResult::error(format!("mv: {}\n", FsError::MissingOperand)),
            1 => {
                return CommandResult::error(format!(
                    "mv: missing destination file operand after '{}'\n",
                    paths[0]
                ))
            }
            _ => paths.pop().unwrap_or_default(),
        };
        let sources = paths;

        let dest_is_dir = ctx
            .fs
            .lookup(ctx.cwd, &dest)
            .map(|id| ctx.fs.is_directory(id))
            .unwrap_or(false);
        if sources.len() > 1 && !dest_is_dir {
            return CommandResult::error(format!("mv: target '{}' is not a directory\n", dest));
        }

        let mut stdout = String::new();
        let mut stderr = String::new();
        let mut exit_code = 0;

        for src in &sources {
            match ctx.fs.mv(ctx.cwd, src, &dest) {
                Ok(moved) => {
                    if verbose {
                        stdout.push_str(&format!("renamed '{}' -> '{}'\n", src, ctx.fs.path(moved)));
                    }
                }
                Err(e) => {
                    stderr.push_str(&describe(src, &dest, &e));
                    exit_code = 1;
                }
            }
        }

        CommandResult::with_exit_code(stdout, stderr, exit_code)
    }
}
