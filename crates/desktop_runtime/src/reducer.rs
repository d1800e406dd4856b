//! Reducer actions, side-effect intents, and transition logic for the desktop session.

use thiserror::Error;

use crate::{
    filesystem::FsError,
    model::{
        DesktopSettings, IconId, IconTarget, NodeId, OpenWindowRequest, ThemeColors, ThemeMode,
        WindowId,
    },
    session::DesktopSession,
    use_cases::{self, WindowManagerPort},
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_session`] to mutate a [`DesktopSession`].
pub enum DesktopAction {
    /// Open a new window using the supplied request.
    OpenApp(OpenWindowRequest),
    /// Open a file-system node in the app matching its kind.
    OpenNode {
        /// Node to open.
        node_id: NodeId,
    },
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Raise a window to the top of the stack.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Minimize a window.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Maximize a window.
    MaximizeWindow {
        /// Window to maximize.
        window_id: WindowId,
    },
    /// Restore a minimized or maximized window.
    RestoreWindow {
        /// Window to restore.
        window_id: WindowId,
    },
    /// Toggle taskbar behavior for a window (focus, minimize, or restore).
    ToggleTaskbarWindow {
        /// Window associated with the taskbar button.
        window_id: WindowId,
    },
    /// Move a window's top-left corner.
    MoveWindow {
        /// Window being moved.
        window_id: WindowId,
        /// New left edge.
        x: i32,
        /// New top edge.
        y: i32,
    },
    /// Resize a window; the size is clamped to its minimum.
    ResizeWindow {
        /// Window being resized.
        window_id: WindowId,
        /// Requested width.
        w: i32,
        /// Requested height.
        h: i32,
    },
    /// Create a text file.
    CreateFile {
        /// File name.
        name: String,
        /// Initial content.
        content: String,
        /// Containing folder, `None` for the root.
        parent_id: Option<NodeId>,
    },
    /// Create a folder.
    CreateFolder {
        /// Folder name.
        name: String,
        /// Containing folder, `None` for the root.
        parent_id: Option<NodeId>,
    },
    /// Replace a file's content.
    UpdateFile {
        /// File to update.
        node_id: NodeId,
        /// New content.
        content: String,
    },
    /// Delete a node and everything below it.
    DeleteNode {
        /// Node to delete.
        node_id: NodeId,
    },
    /// Rename a node.
    RenameNode {
        /// Node to rename.
        node_id: NodeId,
        /// New name.
        name: String,
    },
    /// Move a node to another folder.
    MoveNode {
        /// Node to move.
        node_id: NodeId,
        /// New containing folder, `None` for the root.
        parent_id: Option<NodeId>,
    },
    /// Place a desktop icon.
    AddIcon {
        /// Label under the icon.
        name: String,
        /// Icon glyph id.
        icon: String,
        /// Left edge.
        x: i32,
        /// Top edge.
        y: i32,
        /// What activating the icon opens.
        target: IconTarget,
    },
    /// Remove a desktop icon.
    RemoveIcon {
        /// Icon to remove.
        icon_id: IconId,
    },
    /// Reposition a desktop icon.
    MoveIcon {
        /// Icon to move.
        icon_id: IconId,
        /// New left edge.
        x: i32,
        /// New top edge.
        y: i32,
    },
    /// Open whatever a desktop icon points at.
    ActivateIcon {
        /// Icon being activated.
        icon_id: IconId,
    },
    /// Pick a theme mode manually.
    SetThemeMode {
        /// Chosen mode.
        mode: ThemeMode,
    },
    /// Flip between light and dark manually.
    ToggleTheme,
    /// The OS color-scheme preference changed.
    SystemColorSchemeChanged {
        /// New OS preference.
        mode: ThemeMode,
    },
    /// Drop the manual theme choice and follow the OS again.
    ResetThemeToSystem,
    /// Set or clear custom theme colors.
    SetCustomColors {
        /// Colors to use, `None` to fall back to the mode palette.
        colors: Option<ThemeColors>,
    },
    /// Set the UI font family.
    SetFont {
        /// Font family name.
        font_family: String,
    },
    /// Set the active wallpaper preset id.
    SetWallpaper {
        /// Wallpaper preset id.
        wallpaper_id: String,
    },
    /// Restore persisted settings.
    HydrateSettings {
        /// Settings loaded from the prefs store.
        settings: DesktopSettings,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_session`] for the runtime to execute.
pub enum RuntimeEffect {
    /// Persist the current settings snapshot.
    PersistSettings,
    /// Move focus into the newly focused window's primary input.
    FocusWindowInput(WindowId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for invalid actions (for example, referencing a missing window).
pub enum ReducerError {
    /// The target window id was not found in the current session.
    #[error("window {0} not found")]
    WindowNotFound(WindowId),
    /// The target icon id was not found in the current session.
    #[error("icon {0} not found")]
    IconNotFound(IconId),
    /// The file system rejected the operation.
    #[error(transparent)]
    Fs(#[from] FsError),
}

/// Applies a [`DesktopAction`] to the session and collects resulting side effects.
///
/// A rejected action leaves the session unchanged.
///
/// # Errors
///
/// Returns [`ReducerError::WindowNotFound`] or [`ReducerError::IconNotFound`] for unknown
/// targets, and [`ReducerError::Fs`] when the file system rejects a mutation. Closing an
/// unknown window is a no-op.
pub fn reduce_session(
    session: &mut DesktopSession,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenApp(request) => {
            let window = use_cases::open_app(session, request);
            effects.push(RuntimeEffect::FocusWindowInput(window.id));
        }
        DesktopAction::OpenNode { node_id } => {
            let window = session.open_node(node_id)?;
            effects.push(RuntimeEffect::FocusWindowInput(window.id));
        }
        DesktopAction::CloseWindow { window_id } => {
            // Closing an already closed window is a no-op; dismissals can race.
            use_cases::close_window(session, window_id);
        }
        DesktopAction::FocusWindow { window_id } => {
            ensure_window(session, window_id)?;
            use_cases::focus_window(session, window_id);
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        DesktopAction::MinimizeWindow { window_id } => {
            ensure_window(session, window_id)?;
            use_cases::minimize_window(session, window_id);
        }
        DesktopAction::MaximizeWindow { window_id } => {
            ensure_window(session, window_id)?;
            if use_cases::maximize_window(session, window_id) {
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        DesktopAction::RestoreWindow { window_id } => {
            ensure_window(session, window_id)?;
            if use_cases::restore_window(session, window_id) {
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        DesktopAction::ToggleTaskbarWindow { window_id } => {
            ensure_window(session, window_id)?;
            session.toggle_taskbar_window(window_id);
            if session.windows().active_window_id() == Some(window_id) {
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        DesktopAction::MoveWindow { window_id, x, y } => {
            ensure_window(session, window_id)?;
            use_cases::move_window(session, window_id, x, y);
        }
        DesktopAction::ResizeWindow { window_id, w, h } => {
            ensure_window(session, window_id)?;
            use_cases::resize_window(session, window_id, w, h);
        }
        DesktopAction::CreateFile {
            name,
            content,
            parent_id,
        } => {
            use_cases::create_file(session, &name, &content, parent_id)?;
        }
        DesktopAction::CreateFolder { name, parent_id } => {
            use_cases::create_folder(session, &name, parent_id)?;
        }
        DesktopAction::UpdateFile { node_id, content } => {
            use_cases::update_file(session, node_id, &content)?;
        }
        DesktopAction::DeleteNode { node_id } => {
            if use_cases::delete_node(session, node_id).is_empty() {
                return Err(FsError::NotFound(node_id).into());
            }
        }
        DesktopAction::RenameNode { node_id, name } => {
            session.rename_node(node_id, &name)?;
        }
        DesktopAction::MoveNode { node_id, parent_id } => {
            session.move_node(node_id, parent_id)?;
        }
        DesktopAction::AddIcon {
            name,
            icon,
            x,
            y,
            target,
        } => {
            session.add_icon(name, icon, x, y, target)?;
        }
        DesktopAction::RemoveIcon { icon_id } => {
            if !session.remove_icon(icon_id) {
                return Err(ReducerError::IconNotFound(icon_id));
            }
        }
        DesktopAction::MoveIcon { icon_id, x, y } => {
            if !session.move_icon(icon_id, x, y) {
                return Err(ReducerError::IconNotFound(icon_id));
            }
        }
        DesktopAction::ActivateIcon { icon_id } => {
            let window = session
                .activate_icon(icon_id)?
                .ok_or(ReducerError::IconNotFound(icon_id))?;
            effects.push(RuntimeEffect::FocusWindowInput(window.id));
        }
        DesktopAction::SetThemeMode { mode } => {
            session.set_theme_mode(mode);
            effects.push(RuntimeEffect::PersistSettings);
        }
        DesktopAction::ToggleTheme => {
            session.toggle_theme();
            effects.push(RuntimeEffect::PersistSettings);
        }
        DesktopAction::SystemColorSchemeChanged { mode } => {
            session.apply_system_color_scheme(mode);
        }
        DesktopAction::ResetThemeToSystem => {
            session.reset_theme_to_system();
            effects.push(RuntimeEffect::PersistSettings);
        }
        DesktopAction::SetCustomColors { colors } => {
            match colors {
                Some(colors) => session.set_custom_colors(colors),
                None => session.clear_custom_colors(),
            }
            effects.push(RuntimeEffect::PersistSettings);
        }
        DesktopAction::SetFont { font_family } => {
            session.set_font(font_family);
            effects.push(RuntimeEffect::PersistSettings);
        }
        DesktopAction::SetWallpaper { wallpaper_id } => {
            session.set_wallpaper(wallpaper_id);
            effects.push(RuntimeEffect::PersistSettings);
        }
        DesktopAction::HydrateSettings { settings } => {
            session.apply_settings(settings);
        }
    }
    Ok(effects)
}

fn ensure_window(session: &DesktopSession, window_id: WindowId) -> Result<(), ReducerError> {
    session
        .get_by_id(window_id)
        .map(|_| ())
        .ok_or(ReducerError::WindowNotFound(window_id))
}
