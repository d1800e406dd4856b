use platform_host::ColorScheme;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_WINDOW_WIDTH: i32 = 640;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 480;
pub const DEFAULT_MIN_WINDOW_WIDTH: i32 = 240;
pub const DEFAULT_MIN_WINDOW_HEIGHT: i32 = 160;

/// Key inside `content_data` that carries a file-system node reference.
pub const NODE_REF_KEY: &str = "node_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IconId(pub u64);

impl std::fmt::Display for IconId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// App catalog. The runtime only uses it for title and icon defaults; resolving an id to a
/// renderable app happens outside the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppId {
    Explorer,
    Notepad,
    ImageViewer,
    PdfViewer,
    Calendar,
    Settings,
}

impl AppId {
    pub fn title(self) -> &'static str {
        match self {
            Self::Explorer => "File Explorer",
            Self::Notepad => "Notepad",
            Self::ImageViewer => "Image Viewer",
            Self::PdfViewer => "PDF Viewer",
            Self::Calendar => "Calendar",
            Self::Settings => "Settings",
        }
    }

    pub fn icon_id(self) -> &'static str {
        match self {
            Self::Explorer => "folder",
            Self::Notepad => "notepad",
            Self::ImageViewer => "image",
            Self::PdfViewer => "pdf",
            Self::Calendar => "calendar",
            Self::Settings => "settings",
        }
    }

    /// Picks the viewer for a file from its MIME hint. Unknown types open in Notepad.
    pub fn for_mime_type(mime_type: Option<&str>) -> Self {
        match mime_type {
            Some("application/pdf") => Self::PdfViewer,
            Some(mime) if mime.starts_with("image/") => Self::ImageViewer,
            _ => Self::Notepad,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub w: i32,
    pub h: i32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            w: DEFAULT_MIN_WINDOW_WIDTH,
            h: DEFAULT_MIN_WINDOW_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn moved_to(self, x: i32, y: i32) -> Self {
        Self { x, y, ..self }
    }

    pub fn clamped_min(self, min: WindowSize) -> Self {
        Self {
            w: self.w.max(min.w),
            h: self.h.max(min.h),
            ..self
        }
    }
}

impl Default for WindowRect {
    fn default() -> Self {
        Self {
            x: 40,
            y: 48,
            w: DEFAULT_WINDOW_WIDTH,
            h: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub title: String,
    pub content: AppId,
    pub icon: Option<String>,
    /// Secondary icon id (e.g. a file-type badge) shown next to the title.
    pub fc_icon: Option<String>,
    pub content_data: Value,
    pub rect: WindowRect,
    pub min_size: WindowSize,
    pub is_open: bool,
    pub state: WindowState,
    pub z_index: u32,
    pub can_maximize: Option<bool>,
}

impl WindowRecord {
    pub fn is_minimized(&self) -> bool {
        self.state == WindowState::Minimized
    }

    pub fn is_maximized(&self) -> bool {
        self.state == WindowState::Maximized
    }

    /// `false` only when the window explicitly opted out of maximizing.
    pub fn maximizable(&self) -> bool {
        self.can_maximize != Some(false)
    }

    /// File-system node this window displays, if its payload references one.
    pub fn node_ref(&self) -> Option<NodeId> {
        self.content_data
            .get(NODE_REF_KEY)
            .and_then(Value::as_u64)
            .map(NodeId)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenWindowRequest {
    pub content: AppId,
    pub title: Option<String>,
    pub icon: Option<String>,
    pub fc_icon: Option<String>,
    pub rect: Option<WindowRect>,
    pub min_size: Option<WindowSize>,
    pub content_data: Value,
    pub can_maximize: Option<bool>,
}

impl OpenWindowRequest {
    pub fn new(content: AppId) -> Self {
        Self {
            content,
            title: None,
            icon: None,
            fc_icon: None,
            rect: None,
            min_size: None,
            content_data: Value::Null,
            can_maximize: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_fc_icon(mut self, fc_icon: impl Into<String>) -> Self {
        self.fc_icon = Some(fc_icon.into());
        self
    }

    pub fn with_rect(mut self, rect: WindowRect) -> Self {
        self.rect = Some(rect);
        self
    }

    pub fn with_min_size(mut self, min_size: WindowSize) -> Self {
        self.min_size = Some(min_size);
        self
    }

    pub fn with_can_maximize(mut self, can_maximize: bool) -> Self {
        self.can_maximize = Some(can_maximize);
        self
    }

    /// Points the window at a file-system node.
    pub fn with_node(mut self, node_id: NodeId) -> Self {
        let mut payload = serde_json::Map::new();
        payload.insert(NODE_REF_KEY.to_string(), Value::from(node_id.0));
        self.content_data = Value::Object(payload);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl From<ColorScheme> for ThemeMode {
    fn from(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self::Light,
            ColorScheme::Dark => Self::Dark,
        }
    }
}

/// CSS color strings for the four themed desktop surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub desktop: String,
    pub taskbar: String,
    pub window: String,
    pub accent: String,
}

impl ThemeColors {
    pub fn for_mode(mode: ThemeMode) -> Self {
        let (desktop, taskbar, window, accent) = match mode {
            ThemeMode::Light => ("#3a6ea5", "#e4e4e7", "#ffffff", "#2563eb"),
            ThemeMode::Dark => ("#0f172a", "#1f2937", "#111827", "#60a5fa"),
        };
        Self {
            desktop: desktop.to_string(),
            taskbar: taskbar.to_string(),
            window: window.to_string(),
            accent: accent.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub mode: ThemeMode,
    pub colors: ThemeColors,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum IconTarget {
    App { app_id: AppId },
    Node { node_id: NodeId },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopIcon {
    pub id: IconId,
    pub name: String,
    pub icon: String,
    pub x: i32,
    pub y: i32,
    pub target: IconTarget,
}

/// Settings snapshot persisted between reloads.
///
/// On the wire it is one flat object: custom colors are stored as four `custom_*_color` keys
/// and only count as set when all four are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SettingsRecord", into = "SettingsRecord")]
pub struct DesktopSettings {
    pub theme_mode: ThemeMode,
    pub theme_set_manually: bool,
    pub font_family: String,
    pub wallpaper_id: String,
    pub custom_colors: Option<ThemeColors>,
}

impl Default for DesktopSettings {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::Light,
            theme_set_manually: false,
            font_family: crate::config::DEFAULT_FONT_FAMILY.to_string(),
            wallpaper_id: crate::config::DEFAULT_WALLPAPER_ID.to_string(),
            custom_colors: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct SettingsRecord {
    theme_mode: ThemeMode,
    theme_set_manually: bool,
    font_family: String,
    wallpaper_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_desktop_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_taskbar_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_window_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_accent_color: Option<String>,
}

impl Default for SettingsRecord {
    fn default() -> Self {
        DesktopSettings::default().into()
    }
}

impl From<SettingsRecord> for DesktopSettings {
    fn from(record: SettingsRecord) -> Self {
        let custom_colors = match (
            record.custom_desktop_color,
            record.custom_taskbar_color,
            record.custom_window_color,
            record.custom_accent_color,
        ) {
            (Some(desktop), Some(taskbar), Some(window), Some(accent)) => Some(ThemeColors {
                desktop,
                taskbar,
                window,
                accent,
            }),
            _ => None,
        };
        Self {
            theme_mode: record.theme_mode,
            theme_set_manually: record.theme_set_manually,
            font_family: record.font_family,
            wallpaper_id: record.wallpaper_id,
            custom_colors,
        }
    }
}

impl From<DesktopSettings> for SettingsRecord {
    fn from(settings: DesktopSettings) -> Self {
        let (desktop, taskbar, window, accent) = match settings.custom_colors {
            Some(colors) => (
                Some(colors.desktop),
                Some(colors.taskbar),
                Some(colors.window),
                Some(colors.accent),
            ),
            None => (None, None, None, None),
        };
        Self {
            theme_mode: settings.theme_mode,
            theme_set_manually: settings.theme_set_manually,
            font_family: settings.font_family,
            wallpaper_id: settings.wallpaper_id,
            custom_desktop_color: desktop,
            custom_taskbar_color: taskbar,
            custom_window_color: window,
            custom_accent_color: accent,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn node_ref_reads_content_data() {
        let req = OpenWindowRequest::new(AppId::Notepad).with_node(NodeId(7));
        assert_eq!(req.content_data, json!({ "node_id": 7 }));

        let record = WindowRecord {
            id: WindowId(1),
            title: "a.txt".to_string(),
            content: AppId::Notepad,
            icon: None,
            fc_icon: None,
            content_data: req.content_data,
            rect: WindowRect::default(),
            min_size: WindowSize::default(),
            is_open: true,
            state: WindowState::Normal,
            z_index: 1,
            can_maximize: None,
        };
        assert_eq!(record.node_ref(), Some(NodeId(7)));
        assert!(record.maximizable());
    }

    #[test]
    fn app_for_mime_type() {
        assert_eq!(AppId::for_mime_type(Some("image/png")), AppId::ImageViewer);
        assert_eq!(
            AppId::for_mime_type(Some("application/pdf")),
            AppId::PdfViewer
        );
        assert_eq!(AppId::for_mime_type(Some("text/plain")), AppId::Notepad);
        assert_eq!(AppId::for_mime_type(None), AppId::Notepad);
    }

    #[test]
    fn settings_fill_missing_fields_from_defaults() {
        let settings: DesktopSettings =
            serde_json::from_value(json!({ "theme_mode": "dark" })).expect("deserialize");
        assert_eq!(settings.theme_mode, ThemeMode::Dark);
        assert!(!settings.theme_set_manually);
        assert_eq!(settings.font_family, crate::config::DEFAULT_FONT_FAMILY);
    }

    #[test]
    fn settings_store_custom_colors_as_flat_keys() {
        let settings = DesktopSettings {
            custom_colors: Some(ThemeColors::for_mode(ThemeMode::Dark)),
            ..DesktopSettings::default()
        };
        let value = serde_json::to_value(&settings).expect("serialize");

        assert!(value
            .as_object()
            .expect("object")
            .values()
            .all(|v| !v.is_object() && !v.is_array()));
        assert_eq!(value["custom_accent_color"], json!("#60a5fa"));
        assert_eq!(
            serde_json::from_value::<DesktopSettings>(value).expect("deserialize"),
            settings
        );
    }

    #[test]
    fn partial_custom_colors_are_ignored() {
        let settings: DesktopSettings =
            serde_json::from_value(json!({ "custom_desktop_color": "#000000" }))
                .expect("deserialize");
        assert_eq!(settings.custom_colors, None);
        assert!(serde_json::to_value(DesktopSettings::default())
            .expect("serialize")
            .get("custom_desktop_color")
            .is_none());
    }

    #[test]
    fn wire_names_are_kebab_case() {
        assert_eq!(
            serde_json::to_value(AppId::ImageViewer).expect("serialize"),
            json!("image-viewer")
        );
        assert_eq!(
            serde_json::to_value(WindowState::Minimized).expect("serialize"),
            json!("minimized")
        );
        assert_eq!(
            serde_json::to_value(IconTarget::App {
                app_id: AppId::Calendar
            })
            .expect("serialize"),
            json!({ "kind": "app", "app_id": "calendar" })
        );
    }
}
