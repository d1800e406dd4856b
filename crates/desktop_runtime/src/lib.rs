pub mod config;
pub mod effect_executor;
pub mod filesystem;
pub mod model;
pub mod persistence;
pub mod reducer;
pub mod runtime_context;
pub mod session;
pub mod theme;
pub mod use_cases;
pub mod window_manager;

pub use config::DesktopConfig;
pub use filesystem::{FileNode, FileSystemStore, FolderNode, FsError, FsNode};
pub use model::*;
pub use persistence::{boot_session, load_settings, persist_settings, SETTINGS_KEY};
pub use reducer::{reduce_session, DesktopAction, ReducerError, RuntimeEffect};
pub use runtime_context::{
    provide_desktop_runtime, use_desktop_runtime, DesktopProvider, DesktopRuntimeContext,
};
pub use session::DesktopSession;
pub use theme::ThemeProvider;
pub use use_cases::{FileSystemPort, WindowManagerPort};
pub use window_manager::WindowManager;
