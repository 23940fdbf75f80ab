// src/commands/ls/mod.rs
use crate::commands::types::diagnostic;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::DirentEntry;

pub struct LsCommand;

/// Entries on one tab-separated line. Empty listings print nothing at all.
fn format_entries(entries: &[DirentEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let mut out = entries
        .iter()
        .map(|e| e.name.as_str())
        .collect::<Vec<_>>()
        .join("\t");
    out.push('\n');
    out
}

impl Command for LsCommand {
    fn name(&self) -> &'static str {
        "ls"
    }

    fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "Usage: ls [FILE]...\n\n\
                 List directory contents in creation order.\n\n\
                 Options:\n\
                       --help         display this help and exit\n".to_string()
            );
        }

        let (_, operands) = ctx.split_args();
        let paths = if operands.is_empty() { vec![String::new()] } else { operands };
        let with_headers = paths.len() > 1;

        let mut stdout = String::new();
        let mut stderr = String::new();
        let mut exit_code = 0;

        for (i, path) in paths.iter().enumerate() {
            match ctx.fs.list(ctx.cwd, path) {
                Ok(entries) => {
                    if with_headers {
                        if i > 0 {
                            stdout.push('\n');
                        }
                        stdout.push_str(&format!("{}:\n", path));
                    }
                    stdout.push_str(&format_entries(&entries));
                }
                Err(e) => {
                    stderr.push_str(&diagnostic("ls", "cannot access", path, &e));
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
    use crate::commands::test_support::{run, run_in};
    use crate::fs::{InMemoryFs, MkdirOptions};

    #[test]
    fn test_ls_insertion_order() {
        let mut fs = InMemoryFs::new();
        let root = fs.root();
        fs.touch(root, "zeta").unwrap();
        fs.mkdir(root, "alpha", &MkdirOptions::default()).unwrap();
        fs.touch(root, "beta").unwrap();
        let result = run(&LsCommand, &mut fs, &[]);
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.stdout, "zeta\talpha\tbeta\n");
    }

    #[test]
    fn test_ls_empty_directory_prints_nothing() {
        let mut fs = InMemoryFs::new();
        let result = run(&LsCommand, &mut fs, &[]);
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.stdout, "");
    }

    #[test]
    fn test_ls_relative_to_cwd() {
        let mut fs = InMemoryFs::new();
        let root = fs.root();
        let d = fs.mkdir(root, "d", &MkdirOptions::default()).unwrap();
        fs.touch(root, "d/inner").unwrap();
        fs.touch(root, "top").unwrap();
        assert_eq!(run_in(&LsCommand, &mut fs, d, &[]).stdout, "inner\n");
        assert_eq!(run_in(&LsCommand, &mut fs, d, &[".."]).stdout, "d\ttop\n");
        assert_eq!(run_in(&LsCommand, &mut fs, d, &["/"]).stdout, "d\ttop\n");
    }

    #[test]
    fn test_ls_missing() {
        let mut fs = InMemoryFs::new();
        let result = run(&LsCommand, &mut fs, &["nope"]);
        assert_eq!(result.exit_code, 1);
        assert_eq!(result.stderr, "ls: cannot access 'nope': No such file or directory\n");
    }

    #[test]
    fn test_ls_multiple_with_headers() {
        let mut fs = InMemoryFs::new();
        let root = fs.root();
        fs.mkdir(root, "a", &MkdirOptions::default()).unwrap();
        fs.mkdir(root, "b", &MkdirOptions::default()).unwrap();
        fs.touch(root, "b/f").unwrap();
        let result = run(&LsCommand, &mut fs, &["a", "b"]);
        assert_eq!(result.stdout, "a:\n\nb:\nf\n");
    }
}
