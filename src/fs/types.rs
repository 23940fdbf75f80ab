//! File System Types
//!
//! Core types for the virtual file system tree: the node variants,
//! listing entries, operation options and the error taxonomy.

use thiserror::Error;

/// File system errors.
///
/// `Display` renders the strerror-like tail of a diagnostic; commands prefix
/// it with their own name and the offending operand.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FsError {
    #[error("No such file or directory")]
    NotFound { path: String },

    #[error("File exists")]
    NameConflict { path: String },

    /// A copy or move destination that is an existing file.
    #[error("destination exists")]
    DestinationExists { path: String },

    #[error("Not a directory")]
    NotADirectory { path: String },

    #[error("Is a directory")]
    IsADirectory { path: String },

    #[error("Directory not empty")]
    NotEmpty { path: String },

    #[error("missing file operand")]
    MissingOperand,

    #[error("cannot copy a directory, '{src}', into itself, '{dest}'")]
    IntoItself { src: String, dest: String },

    #[error("Invalid argument")]
    InvalidName { name: String },

    #[error("refusing to remove '{path}'")]
    Refused { path: String },
}

impl FsError {
    pub(crate) fn not_found(path: &str) -> Self {
        FsError::NotFound { path: path.to_string() }
    }
}

/// What a node is, and for files what it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    File { contents: String },
    Directory,
}

/// A node stored in the tree arena. Children and the parent link are kept
/// by the arena itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
}

impl Node {
    pub fn file(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: NodeKind::File { contents: String::new() } }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: NodeKind::Directory }
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File { .. })
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory)
    }

    /// File payload, `None` for directories.
    pub fn read(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File { contents } => Some(contents),
            NodeKind::Directory => None,
        }
    }

    /// Overwrite the payload. Returns false for directories.
    pub fn write(&mut self, text: &str) -> bool {
        match &mut self.kind {
            NodeKind::File { contents } => {
                contents.clear();
                contents.push_str(text);
                true
            }
            NodeKind::Directory => false,
        }
    }

    /// Extend the payload. Returns false for directories.
    pub fn append(&mut self, text: &str) -> bool {
        match &mut self.kind {
            NodeKind::File { contents } => {
                contents.push_str(text);
                true
            }
            NodeKind::Directory => false,
        }
    }
}

/// Directory entry with type information, as handed to display code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirentEntry {
    pub name: String,
    pub is_directory: bool,
}

/// Options for mkdir operation
#[derive(Debug, Clone, Default)]
pub struct MkdirOptions {
    pub parents: bool,
}

/// Options for rm operation
#[derive(Debug, Clone, Default)]
pub struct RmOptions {
    pub recursive: bool,
    pub force: bool,
}

/// Options for cp operation
#[derive(Debug, Clone, Default)]
pub struct CpOptions {
    pub recursive: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kinds() {
        let file = Node::file("a.txt");
        assert!(file.is_file());
        assert!(!file.is_directory());
        assert_eq!(file.read(), Some(""));

        let dir = Node::directory("d");
        assert!(dir.is_directory());
        assert_eq!(dir.read(), None);
    }

    #[test]
    fn test_write_and_append() {
        let mut file = Node::file("notes");
        assert!(file.write("hello"));
        assert!(file.append(" world"));
        assert_eq!(file.read(), Some("hello world"));
        assert!(file.write("bye"));
        assert_eq!(file.read(), Some("bye"));

        let mut dir = Node::directory("d");
        assert!(!dir.write("x"));
        assert!(!dir.append("x"));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(FsError::not_found("x").to_string(), "No such file or directory");
        assert_eq!(
            FsError::IntoItself { src: "a".into(), dest: "a/a".into() }.to_string(),
            "cannot copy a directory, 'a', into itself, 'a/a'"
        );
    }
}
