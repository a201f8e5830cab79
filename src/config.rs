//! Settings file and the persisted theme preference.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::shell::engine::EngineOptions;
use crate::shell::theme::Theme;

pub const DEFAULT_CONFIG_FILE: &str = "gamehub.toml";

/// Hub settings read from a TOML file. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial theme when no preference has been saved yet.
    pub dark: bool,
    pub log_file: PathBuf,
    /// Where the theme toggle is remembered between runs.
    pub state_file: PathBuf,
    /// Longest wait between redraws, in milliseconds.
    pub frame_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark: true,
            log_file: PathBuf::from("gamehub.log"),
            state_file: PathBuf::from("gamehub-state.json"),
            frame_interval_ms: 16,
        }
    }
}

impl Settings {
    /// Parses a settings file.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let settings: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse settings in {}", path.display()))?;
        debug!(?settings, "settings loaded");
        Ok(settings)
    }

    /// Loads `path` when it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    pub fn engine_options(&self, theme: Theme) -> EngineOptions {
        EngineOptions {
            theme,
            frame_interval: self.frame_interval(),
        }
    }
}

/// The one value kept between runs: whether dark mode is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub dark: bool,
}

impl Preferences {
    /// Reads saved preferences. A missing or unreadable file yields `None`.
    pub fn load(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&content) {
            Ok(prefs) => Some(prefs),
            Err(err) => {
                warn!(%err, path = %path.display(), "ignoring corrupt preferences");
                None
            }
        }
    }

    #[instrument(skip(self, path), fields(dark = self.dark, path = %path.display()))]
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write preferences to {}", path.display()))?;
        info!("preferences saved");
        Ok(())
    }
}

/// Picks the starting theme: command line, then saved preference, then settings.
pub fn resolve_theme(cli: Option<bool>, saved: Option<Preferences>, settings: &Settings) -> Theme {
    let dark = cli
        .or(saved.map(|p| p.dark))
        .unwrap_or(settings.dark);
    Theme::new(dark)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn partial_settings_fill_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "dark = false\nframe_interval_ms = 33").unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert!(!settings.dark);
        assert_eq!(settings.frame_interval(), Duration::from_millis(33));
        assert_eq!(settings.log_file, PathBuf::from("gamehub.log"));
    }

    #[test]
    fn missing_settings_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let settings = Settings::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.dark);
    }

    #[test]
    fn malformed_settings_are_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "dark = \"very\"").unwrap();
        assert!(Settings::from_file(file.path()).is_err());
    }

    #[test]
    fn preferences_survive_a_restart() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        assert_eq!(Preferences::load(&path), None);

        Preferences { dark: false }.save(&path).unwrap();
        assert_eq!(Preferences::load(&path), Some(Preferences { dark: false }));
    }

    #[test]
    fn corrupt_preferences_are_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(Preferences::load(&path), None);
    }

    #[test]
    fn theme_precedence() {
        let settings = Settings::default();
        let saved = Some(Preferences { dark: false });

        assert!(resolve_theme(Some(true), saved, &settings).dark);
        assert!(!resolve_theme(None, saved, &settings).dark);
        assert!(resolve_theme(None, None, &settings).dark);
    }
}
