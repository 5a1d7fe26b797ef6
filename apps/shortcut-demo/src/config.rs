//! Configuration for the shortcut demo.

use tui_shortcuts::ShortcutSettings;

pub const APP_NAME: &str = "shortcut-demo";

/// Combinations used when the user has not configured a shortcut.
const DEFAULT_SHORTCUTS: &[(&str, &str)] = &[
    ("quit", "Ctrl+Q"),
    ("save", "Ctrl+S"),
    ("submit", "Ctrl+Enter"),
    ("clear", "Delete"),
    ("fail", "Ctrl+X"),
];

/// Load user shortcuts, filling unset or empty keys with defaults.
pub fn load_settings() -> ShortcutSettings {
    with_defaults(ShortcutSettings::load(APP_NAME))
}

fn with_defaults(mut settings: ShortcutSettings) -> ShortcutSettings {
    for (key, combination) in DEFAULT_SHORTCUTS {
        let configured = settings.shortcuts.get(*key).is_some_and(|c| !c.is_empty());
        if !configured {
            settings.set(*key, *combination);
        }
    }
    settings
}

pub fn log_path() -> std::path::PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|d| d.data_local_dir().join("shortcut-demo.log"))
        .unwrap_or_else(|| std::env::temp_dir().join("shortcut-demo.log"))
}
