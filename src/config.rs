//! Session configuration.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Options for creating a [`Session`](crate::session::Session).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellOptions {
    /// Command names rejected with exit status 110.
    pub banned_commands: Vec<String>,
    /// Maximum number of lines kept in the history.
    pub history_limit: usize,
    /// Initial working directory, created if missing.
    pub cwd: Option<String>,
    /// Files seeded into the tree, keyed by absolute path.
    pub files: IndexMap<String, String>,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            banned_commands: ["sudo", "su", "shutdown", "reboot"]
                .into_iter()
                .map(String::from)
                .collect(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            cwd: None,
            files: IndexMap::new(),
        }
    }
}

impl ShellOptions {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn is_banned(&self, name: &str) -> bool {
        self.banned_commands.iter().any(|b| b == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let opts = ShellOptions::default();
        assert!(opts.is_banned("sudo"));
        assert!(!opts.is_banned("ls"));
        assert_eq!(opts.history_limit, DEFAULT_HISTORY_LIMIT);
        assert!(opts.cwd.is_none());
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(ShellOptions::from_toml_str("").unwrap(), ShellOptions::default());
    }

    #[test]
    fn test_partial_document() {
        let opts = ShellOptions::from_toml_str(
            r#"
            banned_commands = ["rm"]
            cwd = "/home/user"

            [files]
            "/etc/motd" = "hello\n"
            "/home/user/notes.txt" = ""
            "#,
        )
        .unwrap();
        assert!(opts.is_banned("rm"));
        assert!(!opts.is_banned("sudo"));
        assert_eq!(opts.history_limit, DEFAULT_HISTORY_LIMIT);
        assert_eq!(opts.cwd.as_deref(), Some("/home/user"));
        let keys: Vec<_> = opts.files.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["/etc/motd", "/home/user/notes.txt"]);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ShellOptions::from_toml_str("hostname = \"box\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "history_limit = 5").unwrap();
        let opts = ShellOptions::load(file.path()).unwrap();
        assert_eq!(opts.history_limit, 5);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ShellOptions::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().starts_with("cannot read config file"));
    }
}
