// src/commands/cp/mod.rs
use crate::commands::types::diagnostic;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::{CpOptions, FsError};

pub struct CpCommand;

fn describe(src: &str, dest: &str, err: &FsError) -> String {
    match err {
        FsError::NotFound { path } if path == src => {
            format!("cp: cannot stat '{}': No such file or directory\n", src)
        }
        FsError::IsADirectory { .. } => {
            format!("cp: -r not specified; omitting directory '{}'\n", src)
        }
        FsError::NameConflict { path } => diagnostic("cp", "cannot create", path, err),
        _ => diagnostic("cp", "cannot create", dest, err),
    }
}

impl Command for CpCommand {
    fn name(&self) -> &'static str {
        "cp"
    }

    fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "Usage: cp [OPTION]... SOURCE... DEST\n\n\
                 Copy SOURCE to DEST, or multiple SOURCE(s) to DIRECTORY.\n\
                 Existing files are never overwritten.\n\n\
                 Options:\n\
                   -r, -R, --recursive  copy directories recursively\n\
                   -v, --verbose        explain what is being done\n\
                       --help           display this help and exit\n".to_string()
            );
        }

        let (flags, mut paths) = ctx.split_args();
        let mut recursive = false;
        let mut verbose = false;

        for flag in &flags {
            match flag.as_str() {
                "--recursive" => recursive = true,
                "--verbose" => verbose = true,
                short if !short.starts_with("--") => {
                    for c in short.chars().skip(1) {
                        match c {
                            'r' | 'R' => recursive = true,
                            'v' => verbose = true,
                            _ => return CommandResult::error(format!("cp: invalid option -- '{}'\n", c)),
                        }
                    }
                }
                long => return CommandResult::error(format!("cp: unrecognized option '{}'\n", long)),
            }
        }

        let dest = match paths.len() {
            0 => return CommandResult::error(format!("cp: {}\n", FsError::MissingOperand)),
            1 => {
                return CommandResult::error(format!(
                    "cp: missing destination file operand after '{}'\n",
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
            return CommandResult::error(format!("cp: target '{}' is not a directory\n", dest));
        }

        let mut stdout = String::new();
        let mut stderr = String::new();
        let mut exit_code = 0;
        let opts = CpOptions { recursive };

        for src in &sources {
            match ctx.fs.cp(ctx.cwd, src, &dest, &opts) {
                Ok(copy) => {
                    if verbose {
                        stdout.push_str(&format!("'{}' -> '{}'\n", src, ctx.fs.path(copy)));
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
