//! Configuration loader/writer plus strongly typed settings structures.
//!
//! The config lives in `~/.user-roster/config.toml` (or `$USER_ROSTER_DIR`). A
//! commented default is extracted on first run; every section falls back to its
//! defaults when missing so partial files keep working.

use crate::data::DisplayMode;
use crate::widgets::SubmitTiming;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// Embed default configuration file at compile time
const DEFAULT_CONFIG: &str = include_str!("../defaults/config.toml");

/// Environment variable overriding the data directory
pub const DIR_ENV: &str = "USER_ROSTER_DIR";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub display_mode: DisplayMode,
    pub page_title: String,
    /// Insert form heading (None = "Add New User")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub inline_label: String,
    pub popup_label: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            display_mode: DisplayMode::Popup,
            page_title: "User Directory".to_string(),
            title: None,
            inline_label: "Show Inline".to_string(),
            popup_label: "Show Popup".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub submit_delay_ms: u64,
    pub success_dwell_ms: u64,
    pub submit_timeout_ms: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 1500,
            success_dwell_ms: 2000,
            submit_timeout_ms: 10_000,
        }
    }
}

impl FormConfig {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn timing(&self) -> SubmitTiming {
        SubmitTiming {
            submit_timeout: Duration::from_millis(self.submit_timeout_ms),
            success_dwell: Duration::from_millis(self.success_dwell_ms),
        }
    }
}

/// Hex colors ("#rrggbb"); "-" means terminal default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub border: String,
    pub text: String,
    pub background: String,
    pub label: String,
    pub label_focused: String,
    pub input_background: String,
    pub error: String,
    pub success: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            border: "#00ffff".to_string(),
            text: "#ffffff".to_string(),
            background: "#000000".to_string(),
            label: "#00ffff".to_string(),
            label_focused: "#ffd700".to_string(),
            input_background: "#400000".to_string(),
            error: "#ff5555".to_string(),
            success: "#50fa7b".to_string(),
        }
    }
}

impl Config {
    /// Load from the standard location, extracting the default file on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            Self::extract_defaults(&config_path)?;
        }
        Self::load_from_path(&config_path)
    }

    /// Load from an explicit file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).context(format!("Failed to read config file: {:?}", path))?;
        Self::parse(&contents).context(format!("Failed to parse config file: {:?}", path))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create config directory: {:?}", parent))?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents).context(format!("Failed to write config file: {:?}", path))?;
        Ok(())
    }

    fn extract_defaults(config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create config directory: {:?}", parent))?;
        }
        fs::write(config_path, DEFAULT_CONFIG).context("Failed to write default config.toml")?;
        tracing::info!("Extracted default config to {:?}", config_path);
        Ok(())
    }

    /// Get the base user-roster directory (~/.user-roster/)
    /// Can be overridden with USER_ROSTER_DIR environment variable
    pub fn base_dir() -> Result<PathBuf> {
        if let Ok(custom_dir) = std::env::var(DIR_ENV) {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".user-roster"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.toml"))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("user-roster.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_default_parses_to_defaults() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config = Config::parse(
            r#"
            [ui]
            display_mode = "inline"
            title = "Invite someone"

            [form]
            success_dwell_ms = 500
            "#,
        )
        .unwrap();
        assert_eq!(config.ui.display_mode, DisplayMode::Inline);
        assert_eq!(config.ui.title.as_deref(), Some("Invite someone"));
        assert_eq!(config.ui.inline_label, "Show Inline");
        assert_eq!(config.form.submit_delay_ms, 1500);
        assert_eq!(config.form.timing().success_dwell, Duration::from_millis(500));
        assert_eq!(config.theme, ThemeConfig::default());
    }

    #[test]
    fn test_unknown_display_mode_is_rejected() {
        assert!(Config::parse("[ui]\ndisplay_mode = \"sideways\"\n").is_err());
    }

    #[test]
    fn test_save_then_load_from_path() {
        let dir = std::env::temp_dir().join(format!("user-roster-test-{}", std::process::id()));
        let path = dir.join("config.toml");

        let mut config = Config::default();
        config.ui.page_title = "Team".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.ui.page_title, "Team");

        let _ = fs::remove_dir_all(&dir);
    }
}
