//! Settings of the `wlbb` command line tool.
//!
//! Loaded from an explicit path, `~/.config/wlbb/wlbb.yml`, or defaults.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings file name inside the config path.
pub const SETTINGS_FILE: &str = "wlbb.yml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Log level filter (error, warn, info, debug, trace).
    pub log_level: Option<String>,

    /// Directory of named configurations.
    pub config_dir: Option<PathBuf>,

    /// Directory of log files.
    pub log_dir: Option<PathBuf>,
}

impl Settings {
    /// Load settings with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. ~/.config/wlbb/wlbb.yml
    /// 3. Defaults
    pub fn load(settings_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = settings_path {
            return Self::load_from_file(path).context(format!("Failed to load settings from {}", path.display()));
        }

        if let Ok(config_path) = wlbb::paths::config_path() {
            let user_settings = config_path.join(SETTINGS_FILE);
            if user_settings.exists() {
                match Self::load_from_file(&user_settings) {
                    Ok(settings) => {
                        log::info!("Loaded settings from {}", user_settings.display());
                        return Ok(settings);
                    }
                    Err(e) => {
                        log::warn!("Failed to load {}: {}", user_settings.display(), e);
                    }
                }
            }
        }

        log::info!("No settings file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read settings file")?;
        let settings: Self = serde_yaml::from_str(&content).context("Failed to parse settings file")?;
        Ok(settings)
    }

    /// Directory of named configurations.
    pub fn config_dir(&self) -> Result<PathBuf> {
        match &self.config_dir {
            Some(dir) => Ok(dir.clone()),
            None => wlbb::paths::config_dir().context("Failed to resolve config directory"),
        }
    }

    /// Directory of log files.
    pub fn log_dir(&self) -> Result<PathBuf> {
        match &self.log_dir {
            Some(dir) => Ok(dir.clone()),
            None => wlbb::paths::log_dir().context("Failed to resolve log directory"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.log_level.is_none());
        assert!(settings.config_dir.is_none());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
log-level: debug
config-dir: /tmp/wlbb/configs
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.log_level.as_deref(), Some("debug"));
        assert_eq!(settings.config_dir().unwrap(), PathBuf::from("/tmp/wlbb/configs"));
        assert!(settings.log_dir.is_none());
    }

    #[test]
    fn test_load_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("wlbb.yml");
        fs::write(&path, "log-dir: /var/log/wlbb\n").unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.log_dir().unwrap(), PathBuf::from("/var/log/wlbb"));
    }

    #[test]
    fn test_load_explicit_path_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.yml");
        assert!(Settings::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_explicit_path_invalid() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("wlbb.yml");
        fs::write(&path, "log-level: [unclosed\n").unwrap();
        assert!(Settings::load(Some(&path)).is_err());
    }
}
