//! Application configuration
//!
//! Stored as JSON in the platform config directory:
//! - macOS: ~/Library/Application Support/worldclock-globe/config.json
//! - Linux: ~/.config/worldclock-globe/config.json
//! - Windows: %APPDATA%\worldclock-globe\config\config.json
//!
//! A missing file means defaults. Unknown fields are ignored and missing
//! fields take their default values.

use anyhow::{Context, Result};
use bevy::prelude::*;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::projection::MARKER_OFFSET;

const CONFIG_FILE: &str = "config.json";

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Marker sphere radius relative to the globe
    pub marker_offset: f64,
    pub rotation_duration_ms: u64,
    pub tick_interval_ms: u64,
    /// Seconds per full turn while no city is selected
    pub auto_rotate_period_secs: f32,
    pub weather_refresh_secs: u64,
    pub weather_delay_ms: u64,
    /// Fixed seed for the mock weather generator; random when unset
    pub weather_seed: Option<u64>,
    /// City id selected at startup
    pub initial_city: Option<String>,
    /// Asset path of the equirectangular Earth texture
    pub globe_texture: String,
    /// Replaces the built-in city list when set
    pub catalog_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            marker_offset: MARKER_OFFSET,
            rotation_duration_ms: 1000,
            tick_interval_ms: 1000,
            auto_rotate_period_secs: 120.0,
            weather_refresh_secs: 300,
            weather_delay_ms: 500,
            weather_seed: None,
            initial_city: Some("tokyo".to_string()),
            globe_texture: "textures/earth_atmos_2048.jpg".to_string(),
            catalog_path: None,
        }
    }
}

impl AppConfig {
    /// Platform config file path, if a home directory can be resolved.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "worldclock-globe").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from the platform path, falling back to defaults on any problem.
    /// A missing file is created with the defaults so it can be edited.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            warn!("Could not resolve a config directory; using default settings");
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(Some(config)) => {
                info!("Loaded settings from {}", path.display());
                config
            }
            Ok(None) => {
                let config = Self::default();
                match config.save_to(&path) {
                    Ok(()) => info!("Wrote default settings to {}", path.display()),
                    Err(err) => debug!("Could not write {}: {:#}", path.display(), err),
                }
                config
            }
            Err(err) => {
                warn!("Ignoring settings file {}: {:#}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Returns Ok(None) when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&contents)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(config))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn rotation_duration(&self) -> Duration {
        Duration::from_millis(self.rotation_duration_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn weather_refresh(&self) -> Duration {
        Duration::from_secs(self.weather_refresh_secs)
    }

    pub fn weather_delay(&self) -> Duration {
        Duration::from_millis(self.weather_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir(test_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "worldclock-globe-config-{}-{}-{}",
            test_name,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.marker_offset, 1.05);
        assert_eq!(config.rotation_duration(), Duration::from_millis(1000));
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.weather_refresh(), Duration::from_secs(300));
        assert_eq!(config.initial_city.as_deref(), Some("tokyo"));
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = unique_temp_dir("missing");
        let result = AppConfig::load_from(&dir.join(CONFIG_FILE)).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = unique_temp_dir("save");
        let path = dir.join(CONFIG_FILE);
        let config = AppConfig {
            weather_seed: Some(42),
            initial_city: Some("cairo".to_string()),
            ..AppConfig::default()
        };
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap().unwrap();
        assert_eq!(loaded, config);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_partial_file_uses_defaults_for_missing_fields() {
        let dir = unique_temp_dir("partial");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE);
        fs::write(&path, r#"{ "tick_interval_ms": 250 }"#).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap().unwrap();
        assert_eq!(loaded.tick_interval(), Duration::from_millis(250));
        assert_eq!(loaded.rotation_duration_ms, 1000);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = unique_temp_dir("malformed");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();

        assert!(AppConfig::load_from(&path).is_err());

        let _ = fs::remove_dir_all(dir);
    }
}
