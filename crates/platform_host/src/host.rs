//! Host service bundle injected into the desktop runtime.

use std::rc::Rc;

use crate::{
    ColorSchemeSource, MemoryColorSchemeSource, MemoryPrefsStore, NoopColorSchemeSource,
    NoopPrefsStore, PrefsStore,
};

/// Host environment the runtime was composed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Plain browser tab.
    Browser,
    /// Electron-style desktop shell wrapping the browser runtime.
    Electron,
    /// No host integration (tests, headless tools).
    Headless,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Electron => "electron",
            Self::Headless => "headless",
        }
    }
}

/// Host services handed to the desktop runtime by the entry layer.
///
/// Concrete adapter selection happens before this bundle is built, so the runtime never
/// depends on browser or shell specifics.
#[derive(Clone)]
pub struct HostServices {
    /// Settings storage.
    pub prefs: Rc<dyn PrefsStore>,
    /// OS light/dark preference signal.
    pub color_scheme: Rc<dyn ColorSchemeSource>,
    /// Strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// Bundle with no storage and a fixed light preference.
    pub fn headless() -> Self {
        Self {
            prefs: Rc::new(NoopPrefsStore),
            color_scheme: Rc::new(NoopColorSchemeSource),
            host_strategy: HostStrategy::Headless,
        }
    }

    /// Bundle backed by the given in-memory adapters.
    pub fn in_memory(prefs: MemoryPrefsStore, color_scheme: MemoryColorSchemeSource) -> Self {
        Self {
            prefs: Rc::new(prefs),
            color_scheme: Rc::new(color_scheme),
            host_strategy: HostStrategy::Headless,
        }
    }
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices")
            .field("host_strategy", &self.host_strategy)
            .finish_non_exhaustive()
    }
}
