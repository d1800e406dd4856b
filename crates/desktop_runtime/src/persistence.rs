//! Settings persistence through the host prefs store, plus session boot hydration.

use leptos::logging;
use platform_host::{load_pref_with, save_pref_with, HostServices, PrefsStore};

use crate::{
    config::DesktopConfig,
    model::{DesktopSettings, ThemeMode},
    session::DesktopSession,
};

/// Prefs key holding the flat settings object.
pub const SETTINGS_KEY: &str = "desktop.settings.v1";

/// Loads persisted settings. Store failures and malformed JSON are logged and treated as absent.
pub async fn load_settings(prefs: &dyn PrefsStore) -> Option<DesktopSettings> {
    match load_pref_with::<_, DesktopSettings>(prefs, SETTINGS_KEY).await {
        Ok(settings) => settings,
        Err(err) => {
            logging::warn!("desktop settings load failed: {err}");
            None
        }
    }
}

/// Persists the settings snapshot.
///
/// # Errors
///
/// Returns the prefs store error message when the write fails.
pub async fn persist_settings(
    prefs: &dyn PrefsStore,
    settings: &DesktopSettings,
) -> Result<(), String> {
    save_pref_with(prefs, SETTINGS_KEY, settings).await
}

/// Builds a session from the host's OS color scheme and any persisted settings.
pub async fn boot_session(host: &HostServices, config: DesktopConfig) -> DesktopSession {
    let system_mode = ThemeMode::from(host.color_scheme.preferred_scheme());
    let settings = load_settings(host.prefs.as_ref()).await;
    let restored = settings.is_some();
    let session = DesktopSession::boot(config, system_mode, settings);
    logging::log!(
        "desktop session booted on {} host: theme={} restored_settings={restored}",
        host.host_strategy.as_str(),
        session.theme().mode.as_str(),
    );
    session
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use platform_host::{ColorScheme, MemoryColorSchemeSource, MemoryPrefsStore};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_settings_load_as_none() {
        let prefs = MemoryPrefsStore::default();
        assert_eq!(block_on(load_settings(&prefs)), None);
    }

    #[test]
    fn malformed_settings_are_ignored() {
        let prefs = MemoryPrefsStore::with_entries([(SETTINGS_KEY, "{\"theme_mode\": 7")]);
        assert_eq!(block_on(load_settings(&prefs)), None);
    }

    #[test]
    fn persisted_settings_round_trip_through_prefs() {
        let prefs = MemoryPrefsStore::default();
        let settings = DesktopSettings {
            theme_mode: ThemeMode::Dark,
            theme_set_manually: true,
            font_family: "Fira Sans".to_string(),
            ..DesktopSettings::default()
        };
        block_on(persist_settings(&prefs, &settings)).expect("persist");

        assert_eq!(prefs.keys(), vec![SETTINGS_KEY.to_string()]);
        assert_eq!(block_on(load_settings(&prefs)), Some(settings));
    }

    #[test]
    fn boot_uses_os_scheme_without_saved_settings() {
        let host = HostServices::in_memory(
            MemoryPrefsStore::default(),
            MemoryColorSchemeSource::new(ColorScheme::Dark),
        );
        let session = block_on(boot_session(&host, DesktopConfig::empty_desktop()));
        assert_eq!(session.theme().mode, ThemeMode::Dark);
        assert!(!session.theme_provider().is_set_manually());
    }

    #[test]
    fn boot_prefers_manual_theme_from_prefs() {
        let prefs = MemoryPrefsStore::with_entries([(
            SETTINGS_KEY,
            r#"{"theme_mode":"light","theme_set_manually":true,"wallpaper_id":"dunes"}"#,
        )]);
        let host =
            HostServices::in_memory(prefs, MemoryColorSchemeSource::new(ColorScheme::Dark));
        let session = block_on(boot_session(&host, DesktopConfig::empty_desktop()));

        assert_eq!(session.theme().mode, ThemeMode::Light);
        assert_eq!(session.wallpaper_id(), "dunes");
        assert_eq!(session.font_family(), crate::config::DEFAULT_FONT_FAMILY);
    }

    #[test]
    fn boot_ignores_automatic_saved_mode() {
        let prefs = MemoryPrefsStore::with_entries([(
            SETTINGS_KEY,
            r#"{"theme_mode":"light","theme_set_manually":false}"#,
        )]);
        let host =
            HostServices::in_memory(prefs, MemoryColorSchemeSource::new(ColorScheme::Dark));
        let session = block_on(boot_session(&host, DesktopConfig::empty_desktop()));
        assert_eq!(session.theme().mode, ThemeMode::Dark);
    }
}
