//! In-Memory File System Implementation
//!
//! A pure in-memory directory tree. Nodes live in an `indextree` arena: the
//! arena owns every node, each directory's children keep insertion order,
//! and the parent link is a plain `NodeId` handle, so `..` and `path()`
//! can walk upward without any ownership cycle.
//!
//! Resolution (`resolve`, `resolve_parent`) is strictly relative to the
//! start directory. The operation layer (`mkdir`, `rm`, `cp`, ...) anchors
//! paths with a leading `/` at the root before resolving.

use indextree::{Arena, NodeId};
use tracing::debug;

use super::types::*;

/// In-memory virtual file system.
pub struct InMemoryFs {
    arena: Arena<Node>,
    root: NodeId,
}

impl InMemoryFs {
    /// Create a new file system holding only the root directory `/`.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(Node::directory("/"));
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Whether `id` still refers to a live node of this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.get(id).is_some() && !id.is_removed(&self.arena)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        self.arena[id].get()
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.node(id).name
    }

    pub fn is_file(&self, id: NodeId) -> bool {
        self.node(id).is_file()
    }

    pub fn is_directory(&self, id: NodeId) -> bool {
        self.node(id).is_directory()
    }

    /// Parent directory, `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].parent()
    }

    pub fn children(&self, dir: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        dir.children(&self.arena)
    }

    /// `dir` followed by everything beneath it, depth first.
    pub fn descendants(&self, dir: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        dir.descendants(&self.arena)
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.descendants(self.root).count()
    }

    // ========================================================================
    // Node model primitives
    // ========================================================================

    /// Linear scan of `dir`'s children for an exact name match.
    pub fn find_child(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        self.children(dir).find(|&child| self.name(child) == name)
    }

    /// Attach a new node under `dir`, keeping names unique.
    pub fn add_child(&mut self, dir: NodeId, node: Node) -> Result<NodeId, FsError> {
        if !self.is_directory(dir) {
            return Err(FsError::NotADirectory { path: self.path(dir) });
        }
        validate_name(&node.name)?;
        if self.find_child(dir, &node.name).is_some() {
            return Err(FsError::NameConflict { path: self.child_path(dir, &node.name) });
        }
        let id = self.arena.new_node(node);
        dir.append(id, &mut self.arena);
        Ok(id)
    }

    /// True iff any child of `dir` is a directory.
    pub fn has_subdirectory(&self, dir: NodeId) -> bool {
        self.children(dir).any(|child| self.is_directory(child))
    }

    /// Absolute path of `id`. The root renders as `/`.
    pub fn path(&self, id: NodeId) -> String {
        let mut names: Vec<&str> = id
            .ancestors(&self.arena)
            .take_while(|&a| a != self.root)
            .map(|a| self.name(a))
            .collect();
        if names.is_empty() {
            return self.name(self.root).to_string();
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }

    fn child_path(&self, dir: NodeId, name: &str) -> String {
        if dir == self.root {
            format!("/{}", name)
        } else {
            format!("{}/{}", self.path(dir), name)
        }
    }

    /// Whether `node` is `ancestor` or lies somewhere beneath it.
    pub fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        node.ancestors(&self.arena).any(|a| a == ancestor)
    }

    // ========================================================================
    // Path resolution
    // ========================================================================

    /// Resolve `path` segment by segment starting at `start`.
    ///
    /// `..` climbs to the parent (the root is its own parent) and `.` stays
    /// put. Any other segment must name a child of the current directory; a
    /// file may only appear as the final segment. A single trailing `/` is
    /// accepted after a directory. A `start` that has been removed resolves
    /// nothing.
    pub fn resolve(&self, start: NodeId, path: &str) -> Result<NodeId, FsError> {
        self.check_live(start, path)?;
        if path.is_empty() {
            return Ok(start);
        }
        let segments: Vec<&str> = path.split('/').collect();
        let last = segments.len() - 1;
        let mut current = start;

        for (i, segment) in segments.iter().enumerate() {
            match *segment {
                ".." => current = self.parent(current).unwrap_or(current),
                "." => {}
                "" if i == last => {}
                name => {
                    let child = self
                        .find_child(current, name)
                        .ok_or_else(|| FsError::not_found(path))?;
                    if self.is_file(child) && i != last {
                        return Err(FsError::not_found(path));
                    }
                    current = child;
                }
            }
        }
        Ok(current)
    }

    /// Resolve everything but the final segment. Returns the containing
    /// directory and the final segment, which need not exist yet.
    pub fn resolve_parent<'p>(&self, start: NodeId, path: &'p str) -> Result<(NodeId, &'p str), FsError> {
        self.check_live(start, path)?;
        let trimmed = if path.len() > 1 { path.trim_end_matches('/') } else { path };
        let (parent, name) = match trimmed.rsplit_once('/') {
            None => (start, trimmed),
            Some((dir, name)) => (self.resolve(start, dir)?, name),
        };
        if !self.is_directory(parent) {
            return Err(FsError::NotADirectory { path: path.to_string() });
        }
        Ok((parent, name))
    }

    /// Stale handles may alias a reused arena slot, so they must never be
    /// walked from.
    fn check_live(&self, start: NodeId, path: &str) -> Result<(), FsError> {
        if self.contains(start) {
            Ok(())
        } else {
            Err(FsError::not_found(path))
        }
    }

    /// Pick the starting point for a user-supplied path: the root for
    /// absolute paths, `start` otherwise.
    pub fn anchor<'p>(&self, start: NodeId, path: &'p str) -> (NodeId, &'p str) {
        match path.strip_prefix('/') {
            Some(rest) => (self.root, rest.trim_start_matches('/')),
            None => (start, path),
        }
    }

    /// `resolve` after anchoring absolute paths.
    pub fn lookup(&self, start: NodeId, path: &str) -> Result<NodeId, FsError> {
        let (base, rel) = self.anchor(start, path);
        self.resolve(base, rel).map_err(|_| FsError::not_found(path))
    }

    fn lookup_parent<'p>(&self, start: NodeId, path: &'p str) -> Result<(NodeId, &'p str), FsError> {
        let (base, rel) = self.anchor(start, path);
        self.resolve_parent(base, rel).map_err(|e| match e {
            FsError::NotFound { .. } => FsError::not_found(path),
            other => other,
        })
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Entries of the directory at `path` in insertion order. A file lists
    /// as itself.
    pub fn list(&self, start: NodeId, path: &str) -> Result<Vec<DirentEntry>, FsError> {
        let id = self.lookup(start, path)?;
        if self.is_file(id) {
            return Ok(vec![DirentEntry { name: self.name(id).to_string(), is_directory: false }]);
        }
        Ok(self
            .children(id)
            .map(|child| DirentEntry {
                name: self.name(child).to_string(),
                is_directory: self.is_directory(child),
            })
            .collect())
    }

    pub fn read_file(&self, start: NodeId, path: &str) -> Result<&str, FsError> {
        let id = self.lookup(start, path)?;
        self.node(id)
            .read()
            .ok_or_else(|| FsError::IsADirectory { path: path.to_string() })
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Create a directory at `path`.
    ///
    /// Without `parents` the path must not exist and its parent must. With
    /// `parents` missing intermediate directories are created and an
    /// existing directory is accepted. A failure part way removes whatever
    /// this call created.
    pub fn mkdir(&mut self, start: NodeId, path: &str, options: &MkdirOptions) -> Result<NodeId, FsError> {
        if let Ok(existing) = self.lookup(start, path) {
            if options.parents && self.is_directory(existing) {
                return Ok(existing);
            }
            return Err(FsError::NameConflict { path: path.to_string() });
        }

        if !options.parents {
            let (parent, name) = self.lookup_parent(start, path)?;
            let id = self.add_child(parent, Node::directory(name))?;
            debug!(path = %self.path(id), "created directory");
            return Ok(id);
        }

        let (base, rel) = self.anchor(start, path);
        self.check_live(base, path)?;
        let mut created: Vec<NodeId> = Vec::new();
        let mut current = base;
        for segment in rel.split('/') {
            let step = match segment {
                "" | "." => Ok(current),
                ".." => Ok(self.parent(current).unwrap_or(current)),
                name => match self.find_child(current, name) {
                    Some(child) if self.is_directory(child) => Ok(child),
                    Some(_) => Err(FsError::NotADirectory { path: path.to_string() }),
                    None => self.add_child(current, Node::directory(name)).map(|id| {
                        created.push(id);
                        id
                    }),
                },
            };
            match step {
                Ok(next) => current = next,
                Err(e) => {
                    for id in created.into_iter().rev() {
                        id.remove_subtree(&mut self.arena);
                    }
                    return Err(e);
                }
            }
        }
        debug!(path = %self.path(current), created = created.len(), "created directories");
        Ok(current)
    }

    /// Create an empty file unless something already exists at `path`.
    pub fn touch(&mut self, start: NodeId, path: &str) -> Result<NodeId, FsError> {
        if let Ok(existing) = self.lookup(start, path) {
            return Ok(existing);
        }
        let (parent, name) = self.lookup_parent(start, path)?;
        let id = self.add_child(parent, Node::file(name))?;
        debug!(path = %self.path(id), "created file");
        Ok(id)
    }

    /// Replace a file's contents, creating the file if needed.
    pub fn write_file(&mut self, start: NodeId, path: &str, text: &str) -> Result<(), FsError> {
        let id = self.touch(start, path)?;
        if !self.arena[id].get_mut().write(text) {
            return Err(FsError::IsADirectory { path: path.to_string() });
        }
        Ok(())
    }

    /// Append to a file's contents, creating the file if needed.
    pub fn append_file(&mut self, start: NodeId, path: &str, text: &str) -> Result<(), FsError> {
        let id = self.touch(start, path)?;
        if !self.arena[id].get_mut().append(text) {
            return Err(FsError::IsADirectory { path: path.to_string() });
        }
        Ok(())
    }

    /// Remove a file, or a directory subtree when `recursive` is set.
    pub fn rm(&mut self, start: NodeId, path: &str, options: &RmOptions) -> Result<(), FsError> {
        let id = match self.lookup(start, path) {
            Ok(id) => id,
            Err(_) if options.force => return Ok(()),
            Err(e) => return Err(e),
        };
        self.check_removable(id, path)?;
        if self.is_directory(id) && !options.recursive {
            return Err(FsError::IsADirectory { path: path.to_string() });
        }
        debug!(path = %self.path(id), "removing");
        id.remove_subtree(&mut self.arena);
        Ok(())
    }

    /// Remove an empty directory.
    pub fn rmdir(&mut self, start: NodeId, path: &str) -> Result<(), FsError> {
        let id = self.lookup(start, path)?;
        if self.is_file(id) {
            return Err(FsError::NotADirectory { path: path.to_string() });
        }
        self.check_removable(id, path)?;
        if self.children(id).next().is_some() {
            return Err(FsError::NotEmpty { path: path.to_string() });
        }
        debug!(path = %self.path(id), "removing directory");
        id.remove(&mut self.arena);
        Ok(())
    }

    fn check_removable(&self, id: NodeId, path: &str) -> Result<(), FsError> {
        let last = path.trim_end_matches('/').rsplit('/').next().unwrap_or("");
        if id == self.root || last == "." || last == ".." {
            return Err(FsError::Refused { path: path.to_string() });
        }
        Ok(())
    }

    /// Copy `src` to `dest`.
    ///
    /// An existing directory at `dest` receives the copy under the source's
    /// name; otherwise `dest`'s parent must be a directory and the copy takes
    /// `dest`'s final segment as its name. Existing files are never
    /// overwritten, and a directory can't be copied into its own subtree.
    /// Returns the root of the new subtree.
    pub fn cp(&mut self, start: NodeId, src: &str, dest: &str, options: &CpOptions) -> Result<NodeId, FsError> {
        let src_id = self.lookup(start, src)?;
        let dest_id = self.lookup(start, dest).ok();

        if let Some(d) = dest_id {
            if self.is_file(d) {
                return Err(FsError::DestinationExists { path: dest.to_string() });
            }
        }
        if self.is_directory(src_id) && !options.recursive {
            return Err(FsError::IsADirectory { path: src.to_string() });
        }

        let (target, name) = match dest_id {
            Some(d) => (d, self.name(src_id).to_string()),
            // `dest/` names a directory, which a file copy can't create.
            None if dest.ends_with('/') && self.is_file(src_id) => {
                return Err(FsError::NotADirectory { path: dest.to_string() });
            }
            None => {
                let (parent, name) = self.lookup_parent(start, dest)?;
                (parent, name.to_string())
            }
        };

        if self.is_directory(src_id) && self.is_within(target, src_id) {
            return Err(FsError::IntoItself {
                src: src.to_string(),
                dest: format!("{}/{}", dest.trim_end_matches('/'), name),
            });
        }
        validate_name(&name)?;
        if self.find_child(target, &name).is_some() {
            return Err(FsError::NameConflict { path: self.child_path(target, &name) });
        }

        let copy = self.deep_clone(src_id);
        self.arena[copy].get_mut().name = name;
        target.append(copy, &mut self.arena);
        debug!(from = %self.path(src_id), to = %self.path(copy), "copied");
        Ok(copy)
    }

    /// Move `src` to `dest` as a recursive copy followed by removal of the
    /// original. Nothing changes unless the copy succeeds.
    pub fn mv(&mut self, start: NodeId, src: &str, dest: &str) -> Result<NodeId, FsError> {
        let src_id = self.lookup(start, src)?;
        self.check_removable(src_id, src)?;
        if let Ok(d) = self.lookup(start, dest) {
            if self.is_file(d) {
                return Err(FsError::DestinationExists { path: dest.to_string() });
            }
        }
        let copy = self.cp(start, src, dest, &CpOptions { recursive: true })?;
        src_id.remove_subtree(&mut self.arena);
        debug!(to = %self.path(copy), "moved");
        Ok(copy)
    }

    /// Structural copy of the subtree at `src` into fresh, detached nodes.
    /// Walks with an explicit stack so tree depth is bounded by memory, not
    /// by the call stack.
    fn deep_clone(&mut self, src: NodeId) -> NodeId {
        let node = self.node(src).clone();
        let root_copy = self.arena.new_node(node);
        let mut pending = vec![(src, root_copy)];
        while let Some((original, copy)) = pending.pop() {
            let children: Vec<NodeId> = original.children(&self.arena).collect();
            for child in children {
                let node = self.node(child).clone();
                let child_copy = self.arena.new_node(node);
                copy.append(child_copy, &mut self.arena);
                pending.push((child, child_copy));
            }
        }
        root_copy
    }
}

impl Default for InMemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_name(name: &str) -> Result<(), FsError> {
    if name.is_empty() || name == "." || name == ".." || name.contains('/') {
        return Err(FsError::InvalidName { name: name.to_string() });
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
