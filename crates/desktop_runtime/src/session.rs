//! Desktop session: the composition root that owns windows, files, icons, theme and settings.
//!
//! A session is a plain value built once by the host entry layer and handed to the use cases,
//! the reducer and the leptos runtime context. It implements both ports by delegating to its
//! components, so use cases can run against the whole session or a single component alike.

use leptos::logging;

use crate::{
    config::DesktopConfig,
    filesystem::{FileNode, FileSystemStore, FolderNode, FsError, FsNode},
    model::{
        AppId, DesktopIcon, DesktopSettings, IconId, IconTarget, NodeId, OpenWindowRequest, Theme,
        ThemeColors, ThemeMode, WindowId, WindowRecord,
    },
    theme::ThemeProvider,
    use_cases::{self, FileSystemPort, WindowManagerPort},
    window_manager::WindowManager,
};

const ICON_COLUMN_X: i32 = 16;
const ICON_ROW_START_Y: i32 = 16;
const ICON_ROW_STEP: i32 = 88;

const WELCOME_TEXT: &str = "Welcome to your desktop.\n\nDouble-click an icon to open it.\n";

#[derive(Debug, Clone, PartialEq)]
pub struct DesktopSession {
    config: DesktopConfig,
    windows: WindowManager,
    fs: FileSystemStore,
    theme: ThemeProvider,
    system_mode: ThemeMode,
    icons: Vec<DesktopIcon>,
    next_icon_id: u64,
    font_family: String,
    wallpaper_id: String,
}

impl DesktopSession {
    /// Fresh session following the OS color scheme.
    pub fn new(config: DesktopConfig, system_mode: ThemeMode) -> Self {
        Self::boot(config, system_mode, None)
    }

    /// Builds a session and applies previously persisted settings when present.
    pub fn boot(
        config: DesktopConfig,
        system_mode: ThemeMode,
        settings: Option<DesktopSettings>,
    ) -> Self {
        let mut session = Self {
            windows: WindowManager::new(&config),
            fs: FileSystemStore::new(),
            theme: ThemeProvider::from_system(system_mode),
            system_mode,
            icons: Vec::new(),
            next_icon_id: 1,
            font_family: config.default_font_family.clone(),
            wallpaper_id: config.default_wallpaper_id.clone(),
            config,
        };
        if let Some(settings) = settings {
            session.apply_settings(settings);
        }
        if session.config.seed_default_desktop {
            if let Err(err) = session.seed_default_desktop() {
                logging::warn!("default desktop seed failed: {err}");
            }
        }
        session
    }

    fn seed_default_desktop(&mut self) -> Result<(), FsError> {
        self.fs.create_folder("Desktop", None)?;
        let documents = self.fs.create_folder("Documents", None)?;
        self.fs
            .create_file("readme.txt", WELCOME_TEXT, Some(documents.id))?;
        self.fs.create_folder("Pictures", None)?;

        for app_id in [
            AppId::Explorer,
            AppId::Notepad,
            AppId::Calendar,
            AppId::Settings,
        ] {
            let slot = self.next_icon_slot();
            self.push_icon(
                app_id.title().to_string(),
                app_id.icon_id().to_string(),
                slot,
                IconTarget::App { app_id },
            );
        }
        let slot = self.next_icon_slot();
        self.push_icon(
            documents.name,
            AppId::Explorer.icon_id().to_string(),
            slot,
            IconTarget::Node {
                node_id: documents.id,
            },
        );
        Ok(())
    }

    /// Next free cell in the default icon column.
    fn next_icon_slot(&self) -> (i32, i32) {
        let row = self.icons.len() as i32;
        (ICON_COLUMN_X, ICON_ROW_START_Y + row * ICON_ROW_STEP)
    }

    fn push_icon(
        &mut self,
        name: String,
        icon: String,
        (x, y): (i32, i32),
        target: IconTarget,
    ) -> DesktopIcon {
        let icon = DesktopIcon {
            id: IconId(self.next_icon_id),
            name,
            icon,
            x,
            y,
            target,
        };
        self.next_icon_id = self.next_icon_id.saturating_add(1);
        self.icons.push(icon.clone());
        icon
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    pub fn windows(&self) -> &WindowManager {
        &self.windows
    }

    pub fn fs(&self) -> &FileSystemStore {
        &self.fs
    }

    pub fn theme_provider(&self) -> &ThemeProvider {
        &self.theme
    }

    /// Effective theme for rendering.
    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    /// Last OS color scheme reported to the session.
    pub fn system_mode(&self) -> ThemeMode {
        self.system_mode
    }

    pub fn icons(&self) -> &[DesktopIcon] {
        &self.icons
    }

    pub fn icon(&self, icon_id: IconId) -> Option<&DesktopIcon> {
        self.icons.iter().find(|icon| icon.id == icon_id)
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn wallpaper_id(&self) -> &str {
        &self.wallpaper_id
    }

    /// Snapshot of everything that survives a reload.
    pub fn settings(&self) -> DesktopSettings {
        DesktopSettings {
            theme_mode: self.theme.mode(),
            theme_set_manually: self.theme.is_set_manually(),
            font_family: self.font_family.clone(),
            wallpaper_id: self.wallpaper_id.clone(),
            custom_colors: self.theme.custom_colors().cloned(),
        }
    }

    /// Replaces theme, font and wallpaper with persisted values.
    pub fn apply_settings(&mut self, settings: DesktopSettings) {
        self.theme = ThemeProvider::hydrate(
            self.system_mode,
            settings.theme_mode,
            settings.theme_set_manually,
            settings.custom_colors,
        );
        self.font_family = settings.font_family;
        self.wallpaper_id = settings.wallpaper_id;
    }

    pub fn set_theme_mode(&mut self, mode: ThemeMode) {
        self.theme.set_mode(mode);
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme.toggle()
    }

    /// Records the OS preference and applies it unless the user picked a mode.
    pub fn apply_system_color_scheme(&mut self, mode: ThemeMode) -> bool {
        self.system_mode = mode;
        self.theme.apply_system_preference(mode)
    }

    pub fn reset_theme_to_system(&mut self) {
        self.theme.reset_to_system(self.system_mode);
    }

    pub fn set_custom_colors(&mut self, colors: ThemeColors) {
        self.theme.set_custom_colors(Some(colors));
    }

    /// Falls back to the mode palette.
    pub fn clear_custom_colors(&mut self) {
        self.theme.set_custom_colors(None);
    }

    pub fn set_font(&mut self, font_family: impl Into<String>) {
        self.font_family = font_family.into();
    }

    pub fn set_wallpaper(&mut self, wallpaper_id: impl Into<String>) {
        self.wallpaper_id = wallpaper_id.into();
    }

    /// Places a new icon on the desktop.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::NotFound`] when a node target does not exist.
    pub fn add_icon(
        &mut self,
        name: impl Into<String>,
        icon: impl Into<String>,
        x: i32,
        y: i32,
        target: IconTarget,
    ) -> Result<DesktopIcon, FsError> {
        if let IconTarget::Node { node_id } = &target {
            if self.fs.get_node(*node_id).is_none() {
                return Err(FsError::NotFound(*node_id));
            }
        }
        Ok(self.push_icon(name.into(), icon.into(), (x, y), target))
    }

    pub fn remove_icon(&mut self, icon_id: IconId) -> bool {
        let before = self.icons.len();
        self.icons.retain(|icon| icon.id != icon_id);
        self.icons.len() != before
    }

    pub fn move_icon(&mut self, icon_id: IconId, x: i32, y: i32) -> bool {
        let Some(icon) = self.icons.iter_mut().find(|icon| icon.id == icon_id) else {
            return false;
        };
        icon.x = x;
        icon.y = y;
        true
    }

    /// Opens whatever the icon points at. `Ok(None)` when no icon has this id.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::NotFound`] when the icon's node was deleted.
    pub fn activate_icon(&mut self, icon_id: IconId) -> Result<Option<WindowRecord>, FsError> {
        let Some(target) = self.icon(icon_id).map(|icon| icon.target.clone()) else {
            return Ok(None);
        };
        match target {
            IconTarget::App { app_id } => Ok(Some(use_cases::open_app(
                self,
                OpenWindowRequest::new(app_id),
            ))),
            IconTarget::Node { node_id } => self.open_node(node_id).map(Some),
        }
    }

    /// Opens a node in the app matching its kind: Explorer for folders, otherwise a viewer
    /// picked from the MIME hint.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::NotFound`] for unknown ids.
    pub fn open_node(&mut self, node_id: NodeId) -> Result<WindowRecord, FsError> {
        let node = use_cases::read_node(&*self, node_id).ok_or(FsError::NotFound(node_id))?;
        let app_id = match node {
            FsNode::Folder(_) => AppId::Explorer,
            FsNode::File(file) => AppId::for_mime_type(file.mime_type.as_deref()),
        };
        let request = OpenWindowRequest::new(app_id)
            .with_title(node.name())
            .with_node(node_id);
        Ok(use_cases::open_app(self, request))
    }

    /// Node a window displays. `None` once the node is deleted; the window stays open.
    pub fn window_node(&self, window_id: WindowId) -> Option<&FsNode> {
        let node_id = self.windows.get_by_id(window_id)?.node_ref()?;
        self.fs.get_node(node_id)
    }

    /// Taskbar button behavior: restore a minimized window, minimize the active one, otherwise
    /// bring it forward.
    pub fn toggle_taskbar_window(&mut self, window_id: WindowId) -> bool {
        let Some(window) = self.windows.get_by_id(window_id) else {
            return false;
        };
        if window.is_minimized() {
            use_cases::restore_window(self, window_id)
        } else if self.windows.active_window_id() == Some(window_id) {
            use_cases::minimize_window(self, window_id)
        } else {
            use_cases::focus_window(self, window_id)
        }
    }

    /// # Errors
    ///
    /// Forwards [`FileSystemStore::rename`] rejections.
    pub fn rename_node(&mut self, node_id: NodeId, name: &str) -> Result<(), FsError> {
        self.fs.rename(node_id, name)
    }

    /// # Errors
    ///
    /// Forwards [`FileSystemStore::move_node`] rejections.
    pub fn move_node(&mut self, node_id: NodeId, parent_id: Option<NodeId>) -> Result<(), FsError> {
        self.fs.move_node(node_id, parent_id)
    }
}

impl WindowManagerPort for DesktopSession {
    fn open(&mut self, request: OpenWindowRequest) -> WindowRecord {
        self.windows.open(request)
    }

    fn close(&mut self, window_id: WindowId) -> bool {
        self.windows.close(window_id)
    }

    fn minimize(&mut self, window_id: WindowId) -> bool {
        self.windows.minimize(window_id)
    }

    fn maximize(&mut self, window_id: WindowId) -> bool {
        self.windows.maximize(window_id)
    }

    fn restore(&mut self, window_id: WindowId) -> bool {
        self.windows.restore(window_id)
    }

    fn focus(&mut self, window_id: WindowId) -> bool {
        self.windows.focus(window_id)
    }

    fn move_window(&mut self, window_id: WindowId, x: i32, y: i32) -> bool {
        self.windows.move_window(window_id, x, y)
    }

    fn resize(&mut self, window_id: WindowId, w: i32, h: i32) -> bool {
        self.windows.resize(window_id, w, h)
    }

    fn get_all(&self) -> &[WindowRecord] {
        self.windows.get_all()
    }

    fn get_by_id(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.get_by_id(window_id)
    }
}

impl FileSystemPort for DesktopSession {
    fn get_node(&self, id: NodeId) -> Option<&FsNode> {
        self.fs.get_node(id)
    }

    fn get_children(&self, folder_id: Option<NodeId>) -> Vec<&FsNode> {
        self.fs.get_children(folder_id)
    }

    fn get_root_nodes(&self) -> Vec<&FsNode> {
        self.fs.get_root_nodes()
    }

    fn create_file(
        &mut self,
        name: &str,
        content: &str,
        parent_id: Option<NodeId>,
    ) -> Result<FileNode, FsError> {
        self.fs.create_file(name, content, parent_id)
    }

    fn create_folder(
        &mut self,
        name: &str,
        parent_id: Option<NodeId>,
    ) -> Result<FolderNode, FsError> {
        self.fs.create_folder(name, parent_id)
    }

    fn update_file(&mut self, id: NodeId, content: &str) -> Result<(), FsError> {
        self.fs.update_file(id, content)
    }

    fn delete(&mut self, id: NodeId) -> Vec<NodeId> {
        self.fs.delete(id)
    }
}
