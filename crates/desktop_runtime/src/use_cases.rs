//! Ports and the stateless use cases the UI layer calls.
//!
//! Each use case forwards one intent to exactly one port call and returns the port's result
//! unchanged. Callers depend on the traits, so tests and alternative hosts can substitute
//! their own window manager or file system.

use crate::{
    filesystem::{FileNode, FolderNode, FsError, FsNode},
    model::{NodeId, OpenWindowRequest, WindowId, WindowRecord},
};

/// Window lifecycle, geometry and stacking operations.
///
/// Lifecycle calls on unknown ids are no-ops and return `false`.
pub trait WindowManagerPort {
    /// Creates a window on top of the stack.
    fn open(&mut self, request: OpenWindowRequest) -> WindowRecord;
    /// Removes a window entirely.
    fn close(&mut self, window_id: WindowId) -> bool;
    /// Hides a window without changing its stacking position.
    fn minimize(&mut self, window_id: WindowId) -> bool;
    /// Maximizes and raises a window unless it opted out of maximizing.
    fn maximize(&mut self, window_id: WindowId) -> bool;
    /// Returns a minimized or maximized window to normal and raises it.
    fn restore(&mut self, window_id: WindowId) -> bool;
    /// Raises a window to the top of the stack without changing its state.
    fn focus(&mut self, window_id: WindowId) -> bool;
    /// Overwrites the window position.
    fn move_window(&mut self, window_id: WindowId, x: i32, y: i32) -> bool;
    /// Overwrites the window size, clamped to its minimum.
    fn resize(&mut self, window_id: WindowId, w: i32, h: i32) -> bool;
    /// All open windows in creation order.
    fn get_all(&self) -> &[WindowRecord];
    /// One window, or `None`.
    fn get_by_id(&self, window_id: WindowId) -> Option<&WindowRecord>;
}

/// Virtual file-system operations used by file-backed apps.
pub trait FileSystemPort {
    /// One node, or `None`.
    fn get_node(&self, id: NodeId) -> Option<&FsNode>;
    /// Direct children of a folder; `None` lists the root.
    fn get_children(&self, folder_id: Option<NodeId>) -> Vec<&FsNode>;
    /// Nodes without a parent.
    fn get_root_nodes(&self) -> Vec<&FsNode>;
    /// Creates a text file.
    ///
    /// # Errors
    ///
    /// Rejects a missing or non-folder parent, a duplicate sibling name or an invalid name.
    fn create_file(
        &mut self,
        name: &str,
        content: &str,
        parent_id: Option<NodeId>,
    ) -> Result<FileNode, FsError>;
    /// Creates a folder.
    ///
    /// # Errors
    ///
    /// Rejects a missing or non-folder parent, a duplicate sibling name or an invalid name.
    fn create_folder(
        &mut self,
        name: &str,
        parent_id: Option<NodeId>,
    ) -> Result<FolderNode, FsError>;
    /// Replaces a file's content.
    ///
    /// # Errors
    ///
    /// Rejects unknown ids and folder ids.
    fn update_file(&mut self, id: NodeId, content: &str) -> Result<(), FsError>;
    /// Deletes a node and its whole subtree, returning every removed id.
    fn delete(&mut self, id: NodeId) -> Vec<NodeId>;
}

pub fn open_app<W: WindowManagerPort + ?Sized>(
    windows: &mut W,
    request: OpenWindowRequest,
) -> WindowRecord {
    windows.open(request)
}

pub fn close_window<W: WindowManagerPort + ?Sized>(windows: &mut W, window_id: WindowId) -> bool {
    windows.close(window_id)
}

pub fn minimize_window<W: WindowManagerPort + ?Sized>(
    windows: &mut W,
    window_id: WindowId,
) -> bool {
    windows.minimize(window_id)
}

pub fn maximize_window<W: WindowManagerPort + ?Sized>(
    windows: &mut W,
    window_id: WindowId,
) -> bool {
    windows.maximize(window_id)
}

pub fn restore_window<W: WindowManagerPort + ?Sized>(
    windows: &mut W,
    window_id: WindowId,
) -> bool {
    windows.restore(window_id)
}

pub fn focus_window<W: WindowManagerPort + ?Sized>(windows: &mut W, window_id: WindowId) -> bool {
    windows.focus(window_id)
}

pub fn move_window<W: WindowManagerPort + ?Sized>(
    windows: &mut W,
    window_id: WindowId,
    x: i32,
    y: i32,
) -> bool {
    windows.move_window(window_id, x, y)
}

pub fn resize_window<W: WindowManagerPort + ?Sized>(
    windows: &mut W,
    window_id: WindowId,
    w: i32,
    h: i32,
) -> bool {
    windows.resize(window_id, w, h)
}

pub fn get_windows<W: WindowManagerPort + ?Sized>(windows: &W) -> &[WindowRecord] {
    windows.get_all()
}

pub fn get_window<W: WindowManagerPort + ?Sized>(
    windows: &W,
    window_id: WindowId,
) -> Option<&WindowRecord> {
    windows.get_by_id(window_id)
}

/// # Errors
///
/// Forwards the port's [`FsError`].
pub fn create_file<F: FileSystemPort + ?Sized>(
    fs: &mut F,
    name: &str,
    content: &str,
    parent_id: Option<NodeId>,
) -> Result<FileNode, FsError> {
    fs.create_file(name, content, parent_id)
}

/// # Errors
///
/// Forwards the port's [`FsError`].
pub fn create_folder<F: FileSystemPort + ?Sized>(
    fs: &mut F,
    name: &str,
    parent_id: Option<NodeId>,
) -> Result<FolderNode, FsError> {
    fs.create_folder(name, parent_id)
}

/// # Errors
///
/// Forwards the port's [`FsError`].
pub fn update_file<F: FileSystemPort + ?Sized>(
    fs: &mut F,
    id: NodeId,
    content: &str,
) -> Result<(), FsError> {
    fs.update_file(id, content)
}

pub fn delete_node<F: FileSystemPort + ?Sized>(fs: &mut F, id: NodeId) -> Vec<NodeId> {
    fs.delete(id)
}

pub fn list_children<F: FileSystemPort + ?Sized>(
    fs: &F,
    folder_id: Option<NodeId>,
) -> Vec<&FsNode> {
    fs.get_children(folder_id)
}

pub fn read_node<F: FileSystemPort + ?Sized>(fs: &F, id: NodeId) -> Option<&FsNode> {
    fs.get_node(id)
}
