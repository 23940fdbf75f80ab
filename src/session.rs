//! Shell session
//!
//! Owns the tree, the working directory, the last exit status and the
//! history. Each call to [`Session::exec`] runs one command line.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::commands::{create_default_registry, CommandContext, CommandRegistry};
use crate::config::ShellOptions;
use crate::fs::{FsError, InMemoryFs, MkdirOptions, NodeId};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_BANNED: i32 = 110;
pub const EXIT_NOT_FOUND: i32 = 127;

/// Output of one command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl ExecResult {
    pub fn new(stdout: String, stderr: String, exit_code: i32) -> Self {
        Self { stdout, stderr, exit_code }
    }

    fn failure(stderr: String, exit_code: i32) -> Self {
        Self { stdout: String::new(), stderr, exit_code }
    }
}

pub struct Session {
    fs: InMemoryFs,
    cwd: NodeId,
    last_exit_code: i32,
    history: Vec<String>,
    registry: CommandRegistry,
    options: ShellOptions,
}

impl Session {
    /// Create a session with a fresh tree seeded from `options`.
    pub fn new(options: ShellOptions) -> Self {
        let fs = InMemoryFs::new();
        let cwd = fs.root();
        let mut session = Self {
            fs,
            cwd,
            last_exit_code: EXIT_SUCCESS,
            history: Vec::new(),
            registry: create_default_registry(),
            options,
        };
        session.seed();
        session
    }

    fn seed(&mut self) {
        let root = self.fs.root();

        for (path, contents) in &self.options.files {
            let parent = path.trim_end_matches('/').rsplit_once('/').map(|(dir, _)| dir);
            if let Some(dir) = parent.filter(|d| !d.is_empty()) {
                if let Err(e) = self.fs.mkdir(root, dir, &MkdirOptions { parents: true }) {
                    warn!(path = %path, error = %e, "cannot create parent of seeded file");
                    continue;
                }
            }
            if let Err(e) = self.fs.write_file(root, path, contents) {
                warn!(path = %path, error = %e, "cannot seed file");
            }
        }

        if let Some(cwd) = &self.options.cwd {
            match self.fs.mkdir(root, cwd, &MkdirOptions { parents: true }) {
                Ok(dir) => self.cwd = dir,
                Err(e) => warn!(cwd = %cwd, error = %e, "cannot use configured working directory"),
            }
        }

        debug!(nodes = self.fs.node_count(), cwd = %self.cwd_path(), "session ready");
    }

    /// Drop all state and start over with the same options.
    pub fn reset(&mut self) {
        let options = std::mem::take(&mut self.options);
        *self = Self::new(options);
    }

    pub fn fs(&self) -> &InMemoryFs {
        &self.fs
    }

    pub fn fs_mut(&mut self) -> &mut InMemoryFs {
        &mut self.fs
    }

    pub fn cwd(&self) -> NodeId {
        self.cwd
    }

    pub fn cwd_path(&self) -> String {
        self.fs.path(self.cwd)
    }

    pub fn last_exit_code(&self) -> i32 {
        self.last_exit_code
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn options(&self) -> &ShellOptions {
        &self.options
    }

    /// Run one command line.
    pub fn exec(&mut self, line: &str) -> ExecResult {
        let result = self.dispatch(line);
        if !self.fs.contains(self.cwd) {
            warn!("working directory was removed, returning to /");
            self.cwd = self.fs.root();
        }
        self.last_exit_code = result.exit_code;
        result
    }

    /// Run every non-blank, non-comment line in order. Output is
    /// concatenated and the exit status is that of the last line run.
    pub fn exec_script(&mut self, script: &str) -> ExecResult {
        let mut combined = ExecResult::default();
        for line in script.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let result = self.exec(trimmed);
            combined.stdout.push_str(&result.stdout);
            combined.stderr.push_str(&result.stderr);
            combined.exit_code = result.exit_code;
        }
        combined
    }

    fn dispatch(&mut self, line: &str) -> ExecResult {
        let line = line.trim();
        if line.is_empty() {
            return ExecResult::failure(String::new(), EXIT_NOT_FOUND);
        }
        self.record(line);

        let mut words = line.split_whitespace().map(String::from);
        let Some(name) = words.next() else {
            return ExecResult::failure(String::new(), EXIT_NOT_FOUND);
        };
        let args: Vec<String> = words.collect();

        if self.options.is_banned(&name) {
            info!(command = %name, "refused banned command");
            return ExecResult::failure(format!("{}: permission denied\n", name), EXIT_BANNED);
        }

        match name.as_str() {
            "cd" => return self.cd(&args),
            "history" => return self.show_history(&args),
            _ => {}
        }

        let Some(cmd) = self.registry.get(&name) else {
            info!(command = %name, "command not found");
            return ExecResult::failure(format!("{}: command not found\n", name), EXIT_NOT_FOUND);
        };

        debug!(command = %name, ?args, "running");
        let result = cmd.execute(CommandContext { args, cwd: self.cwd, fs: &mut self.fs });
        if result.exit_code != EXIT_SUCCESS {
            info!(command = %name, exit_code = result.exit_code, "command failed");
        }
        ExecResult::new(result.stdout, result.stderr, result.exit_code)
    }

    fn record(&mut self, line: &str) {
        if self.history.last().map(String::as_str) == Some(line) {
            return;
        }
        self.history.push(line.to_string());
        let excess = self.history.len().saturating_sub(self.options.history_limit);
        if excess > 0 {
            self.history.drain(..excess);
        }
    }

    fn cd(&mut self, args: &[String]) -> ExecResult {
        let target = match args {
            [] => {
                self.cwd = self.fs.root();
                return ExecResult::default();
            }
            [path] => path,
            _ => return ExecResult::failure("cd: too many arguments\n".to_string(), EXIT_FAILURE),
        };

        match self.fs.lookup(self.cwd, target) {
            Ok(dir) if self.fs.is_directory(dir) => {
                self.cwd = dir;
                ExecResult::default()
            }
            Ok(_) => {
                let err = FsError::NotADirectory { path: target.clone() };
                ExecResult::failure(format!("cd: {}: {}\n", target, err), EXIT_FAILURE)
            }
            Err(e) => ExecResult::failure(format!("cd: {}: {}\n", target, e), EXIT_FAILURE),
        }
    }

    fn show_history(&mut self, args: &[String]) -> ExecResult {
        let count = match args.first().map(String::as_str) {
            None => self.history.len(),
            Some("-c") => {
                self.history.clear();
                return ExecResult::default();
            }
            Some(arg) => match arg.parse::<usize>() {
                Ok(n) => n.min(self.history.len()),
                Err(_) => {
                    return ExecResult::failure(
                        format!("history: {}: numeric argument required\n", arg),
                        EXIT_FAILURE,
                    )
                }
            },
        };

        let start = self.history.len() - count;
        let mut stdout = String::new();
        for (i, cmd) in self.history.iter().enumerate().skip(start) {
            stdout.push_str(&format!("{:5}  {}\n", i + 1, cmd));
        }
        ExecResult::new(stdout, String::new(), EXIT_SUCCESS)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ShellOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::default()
    }

    #[test]
    fn test_empty_line_is_not_found() {
        let mut s = session();
        let result = s.exec("   ");
        assert_eq!(result.exit_code, EXIT_NOT_FOUND);
        assert_eq!(s.last_exit_code(), EXIT_NOT_FOUND);
        assert!(s.history().is_empty());
    }

    #[test]
    fn test_unknown_command() {
        let mut s = session();
        let result = s.exec("frobnicate now");
        assert_eq!(result.exit_code, EXIT_NOT_FOUND);
        assert_eq!(result.stderr, "frobnicate: command not found\n");
    }

    #[test]
    fn test_banned_command() {
        let mut s = session();
        let result = s.exec("sudo rm -r /");
        assert_eq!(result.exit_code, EXIT_BANNED);
        assert_eq!(result.stderr, "sudo: permission denied\n");
        assert_eq!(s.last_exit_code(), EXIT_BANNED);
    }

    #[test]
    fn test_cd_and_pwd() {
        let mut s = session();
        s.exec("mkdir -p a/b");
        assert_eq!(s.exec("cd a/b").exit_code, 0);
        assert_eq!(s.cwd_path(), "/a/b");
        assert_eq!(s.exec("pwd").stdout, "/a/b\n");
        s.exec("cd ..");
        assert_eq!(s.cwd_path(), "/a");
        s.exec("cd");
        assert_eq!(s.cwd_path(), "/");
    }

    #[test]
    fn test_cd_errors() {
        let mut s = session();
        s.exec("touch f");
        let file = s.exec("cd f");
        assert_eq!(file.exit_code, 1);
        assert_eq!(file.stderr, "cd: f: Not a directory\n");
        let missing = s.exec("cd nowhere");
        assert_eq!(missing.stderr, "cd: nowhere: No such file or directory\n");
        assert_eq!(s.exec("cd a b").stderr, "cd: too many arguments\n");
        assert_eq!(s.cwd_path(), "/");
    }

    #[test]
    fn test_cwd_reset_when_removed() {
        let mut s = session();
        s.exec("mkdir -p a/b");
        s.exec("cd a/b");
        let result = s.exec("rm -r /a");
        assert_eq!(result.exit_code, 0);
        assert_eq!(s.cwd(), s.fs().root());
    }

    #[test]
    fn test_history() {
        let mut s = session();
        s.exec("pwd");
        s.exec("pwd");
        s.exec("ls");
        assert_eq!(s.history(), &["pwd", "ls"]);
        let shown = s.exec("history 2");
        assert_eq!(shown.stdout, "    2  ls\n    3  history 2\n");
        s.exec("history -c");
        assert!(s.history().is_empty());
        assert_eq!(s.exec("history x").exit_code, 1);
    }

    #[test]
    fn test_history_limit() {
        let mut s = Session::new(ShellOptions { history_limit: 2, ..Default::default() });
        s.exec("pwd");
        s.exec("ls");
        s.exec("help");
        assert_eq!(s.history(), &["ls", "help"]);
    }

    #[test]
    fn test_seeded_files_and_cwd() {
        let mut options = ShellOptions { cwd: Some("/home/user".to_string()), ..Default::default() };
        options.files.insert("/etc/motd".to_string(), "welcome\n".to_string());
        let mut s = Session::new(options);
        assert_eq!(s.cwd_path(), "/home/user");
        assert_eq!(s.exec("cat /etc/motd").stdout, "welcome\n");
        assert_eq!(s.exec("ls /").stdout, "etc\thome\n");
    }

    #[test]
    fn test_reset() {
        let mut s = session();
        s.exec("mkdir a");
        s.exec("cd a");
        s.reset();
        assert_eq!(s.cwd_path(), "/");
        assert!(s.history().is_empty());
        assert!(s.fs().lookup(s.cwd(), "a").is_err());
    }

    #[test]
    fn test_exec_script() {
        let mut s = session();
        let result = s.exec_script("# setup\nmkdir d\n\ntouch d/f\nls d\nls missing\n");
        assert_eq!(result.stdout, "f\n");
        assert_eq!(result.stderr, "ls: cannot access 'missing': No such file or directory\n");
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn test_exec_result_json_shape() {
        let json = serde_json::to_value(ExecResult::new("a".into(), String::new(), 3)).unwrap();
        assert_eq!(json, serde_json::json!({"stdout": "a", "stderr": "", "exitCode": 3}));
    }
}
