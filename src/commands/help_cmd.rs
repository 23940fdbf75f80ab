use crate::commands::{Command, CommandContext, CommandResult};

pub struct HelpCommand;

const CATEGORIES: &[(&str, &[&str])] = &[
    ("File operations", &["ls", "cat", "touch", "mkdir", "rm", "rmdir", "cp", "mv"]),
    ("Navigation", &["pwd", "cd"]),
    ("Shell", &["echo", "history", "help"]),
];

const SUMMARIES: &[(&str, &str)] = &[
    ("ls", "ls [PATH]...           list directory entries in creation order"),
    ("cat", "cat [-n] FILE...       print file contents"),
    ("touch", "touch FILE...          create empty files"),
    ("mkdir", "mkdir [-p] DIR...      create directories"),
    ("rm", "rm [-rf] PATH...       remove files or directory trees"),
    ("rmdir", "rmdir DIR...           remove empty directories"),
    ("cp", "cp [-r] SRC... DEST    copy without overwriting"),
    ("mv", "mv SRC... DEST         move without overwriting"),
    ("pwd", "pwd                    print the working directory"),
    ("cd", "cd [DIR]               change the working directory, root when omitted"),
    ("echo", "echo [-n] WORD... [> FILE | >> FILE]"),
    ("history", "history [N] | -c       show or clear the command history"),
    ("help", "help [COMMAND]         show this overview"),
];

impl Command for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help" || a == "-h") {
            return CommandResult::success(
                "help - display available commands\n\nUsage: help [command]\n\nOptions:\n  -h, --help    Show this help message\n".to_string()
            );
        }

        if let Some(name) = ctx.args.first() {
            return match SUMMARIES.iter().find(|(cmd, _)| *cmd == name.as_str()) {
                Some((_, summary)) => CommandResult::success(format!("{}\n", summary)),
                None => CommandResult::error(format!("help: no help topics match '{}'\n", name)),
            };
        }

        let mut stdout = String::from("Available commands:\n\n");

        for (category, cmds) in CATEGORIES {
            stdout.push_str(&format!("  {}:\n", category));
            stdout.push_str(&format!("    {}\n\n", cmds.join(", ")));
        }

        stdout.push_str("Use 'help <command>' for a one-line synopsis.\n");

        CommandResult::success(stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::run;
    use crate::fs::InMemoryFs;

    #[test]
    fn test_help_help() {
        let mut fs = InMemoryFs::new();
        let result = run(&HelpCommand, &mut fs, &["--help"]);
        assert!(result.stdout.contains("Usage"));
    }

    #[test]
    fn test_help_lists_categories() {
        let mut fs = InMemoryFs::new();
        let result = run(&HelpCommand, &mut fs, &[]);
        assert_eq!(result.exit_code, 0);
        assert!(result.stdout.contains("File operations"));
        assert!(result.stdout.contains("rmdir"));
        assert!(result.stdout.contains("history"));
    }

    #[test]
    fn test_help_topic() {
        let mut fs = InMemoryFs::new();
        let result = run(&HelpCommand, &mut fs, &["cp"]);
        assert!(result.stdout.starts_with("cp [-r]"));
        let unknown = run(&HelpCommand, &mut fs, &["nope"]);
        assert_eq!(unknown.exit_code, 1);
        assert_eq!(unknown.stderr, "help: no help topics match 'nope'\n");
    }

    #[test]
    fn test_every_listed_command_has_a_summary() {
        for (_, cmds) in CATEGORIES {
            for cmd in *cmds {
                assert!(SUMMARIES.iter().any(|(name, _)| name == cmd), "{}", cmd);
            }
        }
    }
}
