//! Light/dark mode state with a manual-override latch.

use crate::model::{Theme, ThemeColors, ThemeMode};

/// Owns the session's theme mode.
///
/// The mode starts from the OS preference. Any user choice (`set_mode`, `toggle`) latches
/// `set_manually`, after which OS preference changes are ignored until `reset_to_system`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThemeProvider {
    mode: ThemeMode,
    set_manually: bool,
    custom_colors: Option<ThemeColors>,
}

impl ThemeProvider {
    pub fn from_system(mode: ThemeMode) -> Self {
        Self {
            mode,
            set_manually: false,
            custom_colors: None,
        }
    }

    /// Restores persisted state. A persisted mode only wins when it was chosen manually.
    pub fn hydrate(
        system_mode: ThemeMode,
        persisted_mode: ThemeMode,
        set_manually: bool,
        custom_colors: Option<ThemeColors>,
    ) -> Self {
        Self {
            mode: if set_manually {
                persisted_mode
            } else {
                system_mode
            },
            set_manually,
            custom_colors,
        }
    }

    /// Effective theme: custom colors when set, otherwise the mode palette.
    pub fn theme(&self) -> Theme {
        Theme {
            mode: self.mode,
            colors: self
                .custom_colors
                .clone()
                .unwrap_or_else(|| ThemeColors::for_mode(self.mode)),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_set_manually(&self) -> bool {
        self.set_manually
    }

    pub fn custom_colors(&self) -> Option<&ThemeColors> {
        self.custom_colors.as_ref()
    }

    pub fn set_mode(&mut self, mode: ThemeMode) {
        self.mode = mode;
        self.set_manually = true;
    }

    pub fn toggle(&mut self) -> ThemeMode {
        self.set_mode(self.mode.toggled());
        self.mode
    }

    /// Applies an OS preference change. Returns `false` when ignored because of a manual choice.
    pub fn apply_system_preference(&mut self, mode: ThemeMode) -> bool {
        if self.set_manually {
            return false;
        }
        self.mode = mode;
        true
    }

    /// Drops the manual latch and follows the OS again.
    pub fn reset_to_system(&mut self, system_mode: ThemeMode) {
        self.set_manually = false;
        self.mode = system_mode;
    }

    pub fn set_custom_colors(&mut self, colors: Option<ThemeColors>) {
        self.custom_colors = colors;
    }
}
