//! Host-domain contracts consumed by the desktop runtime.
//!
//! The runtime never talks to browser or shell APIs directly. It receives a [`HostServices`]
//! bundle carrying a settings store and the OS color-scheme signal, plus shared helpers for
//! virtual paths.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod appearance;
pub mod fs;
pub mod host;
pub mod storage;

pub use appearance::{
    ColorScheme, ColorSchemeListener, ColorSchemeSource, ColorSchemeSubscription,
    MemoryColorSchemeSource, NoopColorSchemeSource,
};
pub use fs::path::{join_virtual_path, normalize_virtual_path, virtual_path_segments};
pub use host::{HostServices, HostStrategy};
pub use storage::prefs::{
    load_pref_with, save_pref_with, MemoryPrefsStore, NoopPrefsStore, PrefsStore, PrefsStoreFuture,
};
