//! User settings stored as settings.json in the app data directory

use crate::constants::{BACKEND_URL_ENV, DEFAULT_BACKEND_URL, DEFAULT_CONNECT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Backend
    pub backend_url: String,
    pub connect_timeout_secs: u64,

    /// From `RUMAH_BACKEND_URL`, never written back to disk
    #[serde(skip)]
    backend_override: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            backend_override: None,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let env_url = std::env::var(BACKEND_URL_ENV).ok();
        Self::load_with_override(data_dir, env_url)
    }

    fn load_with_override(data_dir: &Path, env_url: Option<String>) -> Self {
        let path = data_dir.join("settings.json");
        let mut settings = match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        };

        if let Some(url) = env_url.filter(|u| !u.trim().is_empty()) {
            info!(url = %url, "Backend URL overridden from environment");
            settings.backend_override = Some(url);
        }
        settings
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    /// The backend in use: the environment override if set, else the stored one
    pub fn backend_url(&self) -> &str {
        self.backend_override.as_deref().unwrap_or(&self.backend_url)
    }

    /// A URL chosen in the UI replaces the stored one and drops any override
    pub fn set_backend_url(&mut self, url: String) {
        self.backend_url = url;
        self.backend_override = None;
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "rumah-settings-{}-{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"window_w": 640.0}"#).unwrap();
        assert_eq!(settings.window_w, Some(640.0));
        assert_eq!(settings.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(settings.connect_timeout_secs, DEFAULT_CONNECT_TIMEOUT_SECS);
    }

    #[test]
    fn zero_timeout_is_clamped() {
        let settings = Settings {
            connect_timeout_secs: 0,
            ..Settings::default()
        };
        assert_eq!(settings.connect_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn environment_override_is_not_persisted() {
        let dir = scratch_dir("override");
        let overridden =
            Settings::load_with_override(&dir, Some("http://temp-override:9999".into()));
        assert_eq!(overridden.backend_url(), "http://temp-override:9999");

        overridden.save(&dir);
        let restarted = Settings::load_with_override(&dir, None);
        assert_eq!(restarted.backend_url(), DEFAULT_BACKEND_URL);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn url_chosen_in_ui_replaces_override_and_persists() {
        let dir = scratch_dir("choose");
        let mut settings = Settings::load_with_override(&dir, Some("http://env:1".into()));
        settings.set_backend_url("http://chosen:5000".into());
        assert_eq!(settings.backend_url(), "http://chosen:5000");

        settings.save(&dir);
        let restarted = Settings::load_with_override(&dir, None);
        assert_eq!(restarted.backend_url(), "http://chosen:5000");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn blank_override_is_ignored() {
        let dir = scratch_dir("blank");
        let settings = Settings::load_with_override(&dir, Some("   ".into()));
        assert_eq!(settings.backend_url(), DEFAULT_BACKEND_URL);
        std::fs::remove_dir_all(&dir).ok();
    }
}
