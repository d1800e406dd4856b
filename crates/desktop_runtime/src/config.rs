//! Session configuration supplied by the host entry layer.

use serde::{Deserialize, Serialize};

use crate::model::{WindowSize, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};

pub const DEFAULT_FONT_FAMILY: &str = "Inter";
pub const DEFAULT_WALLPAPER_ID: &str = "bliss";

/// Tunables for a desktop session.
///
/// Every field has a default, so hosts may pass a partial JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    /// Size for windows opened without an explicit rect.
    pub default_window_size: WindowSize,
    /// Minimum size for windows opened without an explicit one.
    pub default_min_size: WindowSize,
    /// Top-left corner of the first cascaded window.
    pub cascade_origin_x: i32,
    pub cascade_origin_y: i32,
    /// Offset between consecutive cascaded windows.
    pub cascade_step: i32,
    /// Cascade positions before wrapping back to the origin.
    pub cascade_slots: u32,
    pub default_font_family: String,
    pub default_wallpaper_id: String,
    /// Create the standard folders and icons when the session starts.
    pub seed_default_desktop: bool,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            default_window_size: WindowSize {
                w: DEFAULT_WINDOW_WIDTH,
                h: DEFAULT_WINDOW_HEIGHT,
            },
            default_min_size: WindowSize::default(),
            cascade_origin_x: 40,
            cascade_origin_y: 48,
            cascade_step: 24,
            cascade_slots: 8,
            default_font_family: DEFAULT_FONT_FAMILY.to_string(),
            default_wallpaper_id: DEFAULT_WALLPAPER_ID.to_string(),
            seed_default_desktop: true,
        }
    }
}

impl DesktopConfig {
    /// Parses a (possibly partial) JSON config.
    ///
    /// # Errors
    ///
    /// Returns an error when `raw` is not valid JSON for this shape.
    pub fn from_json(raw: &str) -> Result<Self, String> {
        serde_json::from_str(raw).map_err(|e| format!("invalid desktop config: {e}"))
    }

    /// Config without seeded folders or icons.
    pub fn empty_desktop() -> Self {
        Self {
            seed_default_desktop: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            DesktopConfig::from_json(r#"{ "cascade_step": 10, "seed_default_desktop": false }"#)
                .expect("parse");
        assert_eq!(config.cascade_step, 10);
        assert!(!config.seed_default_desktop);
        assert_eq!(config.default_font_family, DEFAULT_FONT_FAMILY);
        assert_eq!(config.default_min_size, WindowSize::default());
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = DesktopConfig::from_json("{ cascade_step: 10 }").expect_err("invalid");
        assert!(err.starts_with("invalid desktop config"));
    }
}
