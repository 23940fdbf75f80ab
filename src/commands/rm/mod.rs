// src/commands/rm/mod.rs
use crate::commands::types::diagnostic;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::RmOptions;

pub struct RmCommand;

impl Command for RmCommand {
    fn name(&self) -> &'static str {
        "rm"
    }

    fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "Usage: rm [OPTION]... [FILE]...\n\n\
                 Remove (unlink) the FILE(s).\n\n\
                 Options:\n\
                   -f, --force      ignore nonexistent files and arguments\n\
                   -r, -R, --recursive  remove directories and their contents recursively\n\
                   -v, --verbose    explain what is being done\n\
                       --help       display this help and exit\n".to_string()
            );
        }

        let (flags, paths) = ctx.split_args();
        let mut recursive = false;
        let mut force = false;
        let mut verbose = false;

        for flag in &flags {
            match flag.as_str() {
                "--recursive" => recursive = true,
                "--force" => force = true,
                "--verbose" => verbose = true,
                short if !short.starts_with("--") => {
                    for c in short.chars().skip(1) {
                        match c {
                            'r' | 'R' => recursive = true,
                            'f' => force = true,
                            'v' => verbose = true,
                            _ => return CommandResult::error(format!("rm: invalid option -- '{}'\n", c)),
                        }
                    }
                }
                long => return CommandResult::error(format!("rm: unrecognized option '{}'\n", long)),
            }
        }

        if paths.is_empty() {
            if force {
                return CommandResult::success(String::new());
            }
            return CommandResult::error("rm: missing operand\n".to_string());
        }

        let mut stdout = String::new();
        let mut stderr = String::new();
        let mut exit_code = 0;
        let opts = RmOptions { recursive, force };

        for path in &paths {
            match ctx.fs.rm(ctx.cwd, path, &opts) {
                Ok(()) => {
                    if verbose {
                        stdout.push_str(&format!("removed '{}'\n", path));
                    }
                }
                Err(e) => {
                    stderr.push_str(&diagnostic("rm", "cannot remove", path, &e));
                    exit_code = 1;
                }
            }
        }

        CommandResult::with_exit_code(stdout, stderr, exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::run;
    use crate::fs::{InMemoryFs, MkdirOptions};

    fn populated() -> InMemoryFs {
        let mut fs = InMemoryFs::new();
        let root = fs.root();
        fs.mkdir(root, "dir/sub", &MkdirOptions { parents: true }).unwrap();
        fs.write_file(root, "dir/sub/f", "x").unwrap();
        fs.touch(root, "file").unwrap();
        fs
    }

    #[test]
    fn test_rm_file() {
        let mut fs = populated();
        let result = run(&RmCommand, &mut fs, &["file"]);
        assert_eq!(result.exit_code, 0);
        assert!(fs.lookup(fs.root(), "file").is_err());
    }

    #[test]
    fn test_rm_directory_without_recursive() {
        let mut fs = populated();
        let result = run(&RmCommand, &mut fs, &["dir"]);
        assert_eq!(result.exit_code, 1);
        assert_eq!(result.stderr, "rm: cannot remove 'dir': Is a directory\n");
        assert!(fs.lookup(fs.root(), "dir/sub/f").is_ok());
    }

    #[test]
    fn test_rm_recursive() {
        let mut fs = populated();
        let result = run(&RmCommand, &mut fs, &["-r", "dir"]);
        assert_eq!(result.exit_code, 0);
        assert!(fs.lookup(fs.root(), "dir").is_err());
        assert!(fs.lookup(fs.root(), "dir/sub/f").is_err());
    }

    #[test]
    fn test_rm_missing() {
        let mut fs = populated();
        let result = run(&RmCommand, &mut fs, &["ghost"]);
        assert_eq!(result.exit_code, 1);
        assert_eq!(result.stderr, "rm: cannot remove 'ghost': No such file or directory\n");
    }

    #[test]
    fn test_rm_force_combined_flags() {
        let mut fs = populated();
        let result = run(&RmCommand, &mut fs, &["-rf", "ghost", "dir"]);
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.stderr, "");
        assert!(fs.lookup(fs.root(), "dir").is_err());
    }

    #[test]
    fn test_rm_refuses_root() {
        let mut fs = populated();
        let result = run(&RmCommand, &mut fs, &["-r", "/"]);
        assert_eq!(result.exit_code, 1);
        assert_eq!(result.stderr, "rm: refusing to remove '/'\n");
        assert_eq!(fs.list(fs.root(), "").unwrap().len(), 2);
    }
}
