//! In-memory virtual file system backing Explorer, Notepad and the viewer apps.
//!
//! Nodes live in an arena keyed by [`NodeId`]; a children-by-parent index keeps
//! [`FileSystemPort::get_children`] from scanning the whole arena. Every mutation validates
//! before it writes, so a rejected call leaves both maps untouched.

use std::collections::{BTreeMap, HashMap};

use platform_host::{join_virtual_path, virtual_path_segments};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{model::NodeId, use_cases::FileSystemPort};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    pub id: NodeId,
    pub name: String,
    pub parent_id: Option<NodeId>,
    pub content: String,
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderNode {
    pub id: NodeId,
    pub name: String,
    pub parent_id: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FsNode {
    File(FileNode),
    Folder(FolderNode),
}

impl FsNode {
    pub fn id(&self) -> NodeId {
        match self {
            Self::File(file) => file.id,
            Self::Folder(folder) => folder.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::File(file) => &file.name,
            Self::Folder(folder) => &folder.name,
        }
    }

    pub fn parent_id(&self) -> Option<NodeId> {
        match self {
            Self::File(file) => file.parent_id,
            Self::Folder(folder) => folder.parent_id,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder(_))
    }

    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            Self::File(file) => Some(file),
            Self::Folder(_) => None,
        }
    }

    fn set_name(&mut self, name: String) {
        match self {
            Self::File(file) => file.name = name,
            Self::Folder(folder) => folder.name = name,
        }
    }

    fn set_parent(&mut self, parent_id: Option<NodeId>) {
        match self {
            Self::File(file) => file.parent_id = parent_id,
            Self::Folder(folder) => folder.parent_id = parent_id,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Rejections from [`FileSystemStore`] mutations.
pub enum FsError {
    /// No node has this id.
    #[error("node {0} not found")]
    NotFound(NodeId),
    /// The parent id is missing or names a file.
    #[error("parent {0} is missing or not a folder")]
    InvalidParent(NodeId),
    /// A file operation targeted a folder.
    #[error("node {0} is a folder, not a file")]
    TypeMismatch(NodeId),
    /// A sibling already uses this name.
    #[error("`{name}` already exists in this folder")]
    DuplicateName {
        /// Conflicting name.
        name: String,
    },
    /// Empty name or one containing a path separator.
    #[error("invalid node name `{0}`")]
    InvalidName(String),
    /// The move would place a folder inside its own subtree.
    #[error("cannot move node {node} into its own subtree")]
    CycleDetected {
        /// Node being moved.
        node: NodeId,
    },
}

/// Guesses a MIME type from the file extension.
pub fn mime_hint_for_name(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    let mime = match ext.to_ascii_lowercase().as_str() {
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "json" => "application/json",
        "html" | "htm" => "text/html",
        "csv" => "text/csv",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        _ => return None,
    };
    Some(mime.to_string())
}

fn validate_name(name: &str) -> Result<String, FsError> {
    let trimmed = name.trim();
    let has_separator = trimmed.contains(|c: char| c == '/' || c == '\\');
    if trimmed.is_empty() || has_separator || trimmed == "." || trimmed == ".." {
        return Err(FsError::InvalidName(name.to_string()));
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FileSystemStore {
    nodes: BTreeMap<NodeId, FsNode>,
    children: HashMap<Option<NodeId>, Vec<NodeId>>,
    next_node_id: u64,
}

impl FileSystemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node below `id`, parents before children. Empty for files and unknown ids.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.child_ids(Some(id)).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.child_ids(Some(next)).iter().rev().copied());
        }
        out
    }

    /// Absolute virtual path of a node, e.g. `/Documents/readme.txt`.
    pub fn path_of(&self, id: NodeId) -> Option<String> {
        let mut names = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.nodes.get(&current)?;
            names.push(node.name().to_string());
            cursor = node.parent_id();
        }
        Some(
            names
                .iter()
                .rev()
                .fold("/".to_string(), |path, name| join_virtual_path(&path, name)),
        )
    }

    /// Looks a node up by virtual path. `/` itself is not a node.
    pub fn resolve_path(&self, path: &str) -> Option<&FsNode> {
        let mut parent: Option<NodeId> = None;
        let mut found = None;
        for segment in virtual_path_segments(path) {
            let node = self
                .child_ids(parent)
                .iter()
                .filter_map(|id| self.nodes.get(id))
                .find(|node| node.name() == segment)?;
            parent = Some(node.id());
            found = Some(node);
        }
        found
    }

    /// Renames a node, keeping sibling names unique.
    ///
    /// # Errors
    ///
    /// [`FsError::NotFound`], [`FsError::InvalidName`] or [`FsError::DuplicateName`].
    pub fn rename(&mut self, id: NodeId, name: &str) -> Result<(), FsError> {
        let parent_id = self.nodes.get(&id).ok_or(FsError::NotFound(id))?.parent_id();
        let name = validate_name(name)?;
        self.ensure_unique_name(parent_id, &name, Some(id))?;
        if let Some(node) = self.nodes.get_mut(&id) {
            node.set_name(name);
        }
        Ok(())
    }

    /// Moves a node under `new_parent` (`None` = root).
    ///
    /// # Errors
    ///
    /// [`FsError::NotFound`], [`FsError::InvalidParent`], [`FsError::CycleDetected`] or
    /// [`FsError::DuplicateName`].
    pub fn move_node(&mut self, id: NodeId, new_parent: Option<NodeId>) -> Result<(), FsError> {
        let node = self.nodes.get(&id).ok_or(FsError::NotFound(id))?;
        let old_parent = node.parent_id();
        let name = node.name().to_string();
        if old_parent == new_parent {
            return Ok(());
        }
        self.ensure_folder_parent(new_parent)?;
        if let Some(target) = new_parent {
            if target == id || self.is_ancestor(id, target) {
                return Err(FsError::CycleDetected { node: id });
            }
        }
        self.ensure_unique_name(new_parent, &name, Some(id))?;

        self.unlink_child(old_parent, id);
        self.children.entry(new_parent).or_default().push(id);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.set_parent(new_parent);
        }
        Ok(())
    }

    fn is_ancestor(&self, ancestor: NodeId, of: NodeId) -> bool {
        let mut cursor = self.nodes.get(&of).and_then(FsNode::parent_id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.nodes.get(&current).and_then(FsNode::parent_id);
        }
        false
    }

    fn child_ids(&self, parent: Option<NodeId>) -> &[NodeId] {
        self.children.get(&parent).map(Vec::as_slice).unwrap_or(&[])
    }

    fn unlink_child(&mut self, parent: Option<NodeId>, id: NodeId) {
        if let Some(siblings) = self.children.get_mut(&parent) {
            siblings.retain(|sibling| *sibling != id);
            if siblings.is_empty() {
                self.children.remove(&parent);
            }
        }
    }

    fn ensure_folder_parent(&self, parent_id: Option<NodeId>) -> Result<(), FsError> {
        match parent_id {
            None => Ok(()),
            Some(id) => match self.nodes.get(&id) {
                Some(FsNode::Folder(_)) => Ok(()),
                _ => Err(FsError::InvalidParent(id)),
            },
        }
    }

    fn ensure_unique_name(
        &self,
        parent_id: Option<NodeId>,
        name: &str,
        ignore: Option<NodeId>,
    ) -> Result<(), FsError> {
        let taken = self
            .child_ids(parent_id)
            .iter()
            .filter(|id| Some(**id) != ignore)
            .filter_map(|id| self.nodes.get(id))
            .any(|node| node.name() == name);
        if taken {
            return Err(FsError::DuplicateName {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn allocate_id(&mut self) -> NodeId {
        self.next_node_id = self.next_node_id.saturating_add(1);
        NodeId(self.next_node_id)
    }

    fn insert(&mut self, node: FsNode) {
        self.children
            .entry(node.parent_id())
            .or_default()
            .push(node.id());
        self.nodes.insert(node.id(), node);
    }

    fn prepare_create(&self, name: &str, parent_id: Option<NodeId>) -> Result<String, FsError> {
        self.ensure_folder_parent(parent_id)?;
        let name = validate_name(name)?;
        self.ensure_unique_name(parent_id, &name, None)?;
        Ok(name)
    }
}

impl FileSystemPort for FileSystemStore {
    fn get_node(&self, id: NodeId) -> Option<&FsNode> {
        self.nodes.get(&id)
    }

    fn get_children(&self, folder_id: Option<NodeId>) -> Vec<&FsNode> {
        self.child_ids(folder_id)
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .collect()
    }

    fn get_root_nodes(&self) -> Vec<&FsNode> {
        self.get_children(None)
    }

    fn create_file(
        &mut self,
        name: &str,
        content: &str,
        parent_id: Option<NodeId>,
    ) -> Result<FileNode, FsError> {
        let name = self.prepare_create(name, parent_id)?;
        let file = FileNode {
            id: self.allocate_id(),
            mime_type: mime_hint_for_name(&name),
            name,
            parent_id,
            content: content.to_string(),
        };
        self.insert(FsNode::File(file.clone()));
        Ok(file)
    }

    fn create_folder(
        &mut self,
        name: &str,
        parent_id: Option<NodeId>,
    ) -> Result<FolderNode, FsError> {
        let name = self.prepare_create(name, parent_id)?;
        let folder = FolderNode {
            id: self.allocate_id(),
            name,
            parent_id,
        };
        self.insert(FsNode::Folder(folder.clone()));
        Ok(folder)
    }

    fn update_file(&mut self, id: NodeId, content: &str) -> Result<(), FsError> {
        match self.nodes.get_mut(&id) {
            Some(FsNode::File(file)) => {
                file.content = content.to_string();
                Ok(())
            }
            Some(FsNode::Folder(_)) => Err(FsError::TypeMismatch(id)),
            None => Err(FsError::NotFound(id)),
        }
    }

    fn delete(&mut self, id: NodeId) -> Vec<NodeId> {
        let Some(parent_id) = self.nodes.get(&id).map(FsNode::parent_id) else {
            return Vec::new();
        };
        let mut removed = vec![id];
        removed.extend(self.descendants(id));
        for node_id in &removed {
            self.nodes.remove(node_id);
            self.children.remove(&Some(*node_id));
        }
        self.unlink_child(parent_id, id);
        removed
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn names(nodes: Vec<&FsNode>) -> Vec<String> {
        nodes.into_iter().map(|n| n.name().to_string()).collect()
    }

    #[test]
    fn create_file_stores_content_and_parent() {
        let mut fs = FileSystemStore::new();
        let docs = fs.create_folder("Docs", None).expect("folder");
        let file = fs.create_file("a.txt", "hi", Some(docs.id)).expect("file");

        let node = fs.get_node(file.id).and_then(FsNode::as_file).expect("file node");
        assert_eq!(node.content, "hi");
        assert_eq!(node.parent_id, Some(docs.id));
        assert_eq!(node.mime_type.as_deref(), Some("text/plain"));
    }

    #[test]
    fn update_file_changes_only_content() {
        let mut fs = FileSystemStore::new();
        let file = fs.create_file("a.txt", "hi", None).expect("file");
        fs.update_file(file.id, "bye").expect("update");

        let updated = fs.get_node(file.id).and_then(FsNode::as_file).expect("file");
        assert_eq!(
            updated,
            &FileNode {
                content: "bye".to_string(),
                ..file
            }
        );
    }

    #[test]
    fn update_file_rejects_folders_and_unknown_ids() {
        let mut fs = FileSystemStore::new();
        let folder = fs.create_folder("Docs", None).expect("folder");
        let before = fs.clone();

        assert_eq!(
            fs.update_file(folder.id, "x"),
            Err(FsError::TypeMismatch(folder.id))
        );
        assert_eq!(
            fs.update_file(NodeId(404), "x"),
            Err(FsError::NotFound(NodeId(404)))
        );
        assert_eq!(fs, before);
    }

    #[test]
    fn create_rejects_invalid_parent_without_mutating() {
        let mut fs = FileSystemStore::new();
        let file = fs.create_file("a.txt", "", None).expect("file");
        let before = fs.clone();

        assert_eq!(
            fs.create_file("b.txt", "", Some(NodeId(77))),
            Err(FsError::InvalidParent(NodeId(77)))
        );
        assert_eq!(
            fs.create_folder("Sub", Some(file.id)),
            Err(FsError::InvalidParent(file.id))
        );
        assert_eq!(fs, before);
    }

    #[test]
    fn duplicate_sibling_names_are_rejected() {
        let mut fs = FileSystemStore::new();
        let docs = fs.create_folder("Docs", None).expect("folder");
        fs.create_file("a.txt", "", Some(docs.id)).expect("file");

        assert_eq!(
            fs.create_folder("a.txt", Some(docs.id)),
            Err(FsError::DuplicateName {
                name: "a.txt".to_string()
            })
        );
        fs.create_file("a.txt", "", None)
            .expect("same name in another folder is fine");
    }

    #[test]
    fn invalid_names_are_rejected() {
        let mut fs = FileSystemStore::new();
        for bad in ["", "   ", "a/b", "..", "c\\d"] {
            assert!(
                matches!(fs.create_file(bad, "", None), Err(FsError::InvalidName(_))),
                "name={bad:?}"
            );
        }
        let trimmed = fs.create_folder("  Music ", None).expect("folder");
        assert_eq!(trimmed.name, "Music");
    }

    #[test]
    fn delete_cascades_through_nested_folders() {
        let mut fs = FileSystemStore::new();
        let docs = fs.create_folder("Docs", None).expect("docs");
        let work = fs.create_folder("Work", Some(docs.id)).expect("work");
        let note = fs.create_file("note.txt", "x", Some(docs.id)).expect("note");
        let plan = fs.create_file("plan.md", "y", Some(work.id)).expect("plan");
        let keep = fs.create_file("keep.txt", "z", None).expect("keep");

        let removed = fs.delete(docs.id);

        assert_eq!(removed, vec![docs.id, work.id, plan.id, note.id]);
        for id in [docs.id, work.id, note.id, plan.id] {
            assert!(fs.get_node(id).is_none());
            assert!(fs.get_children(Some(id)).is_empty());
        }
        assert_eq!(names(fs.get_root_nodes()), vec!["keep.txt".to_string()]);
        assert!(fs.get_node(keep.id).is_some());
        assert_eq!(fs.len(), 1);
    }

    #[test]
    fn delete_unknown_id_removes_nothing() {
        let mut fs = FileSystemStore::new();
        fs.create_file("a.txt", "", None).expect("file");
        assert!(fs.delete(NodeId(12)).is_empty());
        assert_eq!(fs.len(), 1);
    }

    #[test]
    fn children_keep_creation_order() {
        let mut fs = FileSystemStore::new();
        let docs = fs.create_folder("Docs", None).expect("docs");
        fs.create_file("b.txt", "", Some(docs.id)).expect("b");
        fs.create_file("a.txt", "", Some(docs.id)).expect("a");
        assert_eq!(
            names(fs.get_children(Some(docs.id))),
            vec!["b.txt".to_string(), "a.txt".to_string()]
        );
    }

    #[test]
    fn paths_resolve_both_ways() {
        let mut fs = FileSystemStore::new();
        let docs = fs.create_folder("Documents", None).expect("docs");
        let file = fs
            .create_file("readme.txt", "hello", Some(docs.id))
            .expect("file");

        assert_eq!(
            fs.path_of(file.id).as_deref(),
            Some("/Documents/readme.txt")
        );
        assert_eq!(
            fs.resolve_path("Documents/./readme.txt").map(FsNode::id),
            Some(file.id)
        );
        assert!(fs.resolve_path("/Documents/missing.txt").is_none());
        assert!(fs.resolve_path("/").is_none());
    }

    #[test]
    fn rename_keeps_names_unique() {
        let mut fs = FileSystemStore::new();
        let a = fs.create_file("a.txt", "", None).expect("a");
        fs.create_file("b.txt", "", None).expect("b");

        assert_eq!(
            fs.rename(a.id, "b.txt"),
            Err(FsError::DuplicateName {
                name: "b.txt".to_string()
            })
        );
        fs.rename(a.id, "a.txt").expect("renaming to its own name");
        fs.rename(a.id, "c.txt").expect("rename");
        assert_eq!(fs.get_node(a.id).map(FsNode::name), Some("c.txt"));
    }

    #[test]
    fn move_node_rejects_cycles() {
        let mut fs = FileSystemStore::new();
        let outer = fs.create_folder("Outer", None).expect("outer");
        let inner = fs.create_folder("Inner", Some(outer.id)).expect("inner");
        let before = fs.clone();

        assert_eq!(
            fs.move_node(outer.id, Some(inner.id)),
            Err(FsError::CycleDetected { node: outer.id })
        );
        assert_eq!(
            fs.move_node(outer.id, Some(outer.id)),
            Err(FsError::CycleDetected { node: outer.id })
        );
        assert_eq!(fs, before);
    }

    #[test]
    fn move_node_updates_index() {
        let mut fs = FileSystemStore::new();
        let docs = fs.create_folder("Docs", None).expect("docs");
        let file = fs.create_file("a.txt", "", None).expect("file");

        fs.move_node(file.id, Some(docs.id)).expect("move");
        assert_eq!(names(fs.get_root_nodes()), vec!["Docs".to_string()]);
        assert_eq!(names(fs.get_children(Some(docs.id))), vec!["a.txt".to_string()]);
        assert_eq!(fs.get_node(file.id).and_then(FsNode::parent_id), Some(docs.id));
    }

    #[test]
    fn mime_hints_follow_extension() {
        assert_eq!(mime_hint_for_name("photo.JPG").as_deref(), Some("image/jpeg"));
        assert_eq!(mime_hint_for_name("paper.pdf").as_deref(), Some("application/pdf"));
        assert_eq!(mime_hint_for_name("Makefile"), None);
        assert_eq!(mime_hint_for_name("archive.xyz"), None);
    }

    #[test]
    fn node_serializes_with_kind_tag() {
        let node = FsNode::Folder(FolderNode {
            id: NodeId(1),
            name: "Docs".to_string(),
            parent_id: None,
        });
        let value = serde_json::to_value(&node).expect("serialize");
        assert_eq!(value["kind"], "folder");
        assert_eq!(value["name"], "Docs");
    }
}
