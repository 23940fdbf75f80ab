// src/commands/echo/mod.rs
use crate::commands::types::diagnostic;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct EchoCommand;

enum Redirect {
    Truncate(String),
    Append(String),
}

impl Command for EchoCommand {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn execute(&self, mut ctx: CommandContext<'_>) -> CommandResult {
        let args = std::mem::take(&mut ctx.args);
        let mut no_newline = false;
        let mut words: Vec<String> = Vec::new();
        let mut redirect = None;

        let mut iter = args.into_iter().peekable();
        if iter.peek().map(String::as_str) == Some("-n") {
            no_newline = true;
            iter.next();
        }

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                ">" | ">>" => {
                    let Some(target) = iter.next() else {
                        return CommandResult::with_exit_code(
                            String::new(),
                            "echo: syntax error near unexpected token `newline'\n".to_string(),
                            2,
                        );
                    };
                    redirect = Some(if arg == ">" {
                        Redirect::Truncate(target)
                    } else {
                        Redirect::Append(target)
                    });
                }
                _ => words.push(arg),
            }
        }

        let mut output = words.join(" ");
        if !no_newline {
            output.push('\n');
        }

        // Only the last redirection wins.
        let (path, written) = match &redirect {
            None => return CommandResult::success(output),
            Some(Redirect::Truncate(path)) => (path, ctx.fs.write_file(ctx.cwd, path, &output)),
            Some(Redirect::Append(path)) => (path, ctx.fs.append_file(ctx.cwd, path, &output)),
        };

        match written {
            Ok(()) => CommandResult::success(String::new()),
            Err(e) => CommandResult::error(diagnostic("echo", "cannot write", path, &e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{run, run_in};
    use crate::fs::{InMemoryFs, MkdirOptions};

    #[test]
    fn test_echo_words() {
        let mut fs = InMemoryFs::new();
        let result = run(&EchoCommand, &mut fs, &["hello", "world"]);
        assert_eq!(result.stdout, "hello world\n");
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn test_echo_no_newline() {
        let mut fs = InMemoryFs::new();
        assert_eq!(run(&EchoCommand, &mut fs, &["-n", "x"]).stdout, "x");
    }

    #[test]
    fn test_echo_redirect_truncate_then_append() {
        let mut fs = InMemoryFs::new();
        let root = fs.root();
        let first = run(&EchoCommand, &mut fs, &["one", ">", "f"]);
        assert_eq!(first.stdout, "");
        assert_eq!(first.exit_code, 0);
        run(&EchoCommand, &mut fs, &["two", ">>", "f"]);
        assert_eq!(fs.read_file(root, "f").unwrap(), "one\ntwo\n");
        run(&EchoCommand, &mut fs, &["three", ">", "f"]);
        assert_eq!(fs.read_file(root, "f").unwrap(), "three\n");
    }

    #[test]
    fn test_echo_redirect_relative_to_cwd() {
        let mut fs = InMemoryFs::new();
        let root = fs.root();
        let d = fs.mkdir(root, "d", &MkdirOptions::default()).unwrap();
        run_in(&EchoCommand, &mut fs, d, &["hi", ">", "note"]);
        assert_eq!(fs.read_file(root, "d/note").unwrap(), "hi\n");
    }

    #[test]
    fn test_echo_redirect_errors() {
        let mut fs = InMemoryFs::new();
        let root = fs.root();
        fs.mkdir(root, "d", &MkdirOptions::default()).unwrap();
        let into_dir = run(&EchoCommand, &mut fs, &["x", ">", "d"]);
        assert_eq!(into_dir.exit_code, 1);
        assert_eq!(into_dir.stderr, "echo: cannot write 'd': Is a directory\n");

        let missing_parent = run(&EchoCommand, &mut fs, &["x", ">", "nope/f"]);
        assert_eq!(missing_parent.exit_code, 1);
        assert!(missing_parent.stderr.contains("No such file or directory"));

        let dangling = run(&EchoCommand, &mut fs, &["x", ">"]);
        assert_eq!(dangling.exit_code, 2);
    }
}
