//! Filesystem locations used by WLBB and small helpers to create them.
//!
//! Only Linux layouts are implemented:
//! - config path: `$XDG_CONFIG_HOME/wlbb` (or `~/.config/wlbb`)
//! - data path: `~/.wlbb`
//! - cache path: `$XDG_CACHE_HOME/wlbb` (or `~/.cache/wlbb`)
//! - config files: `~/.wlbb/configs`
//! - logs: `~/.wlbb/logs`

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, WlbbError};

const APP_DIR: &str = "wlbb";
const DATA_DIR: &str = ".wlbb";

fn ensure_supported(what: &str) -> Result<()> {
    if cfg!(target_os = "linux") {
        Ok(())
    } else {
        Err(WlbbError::Unsupported(format!(
            "{} path isn't yet implemented for {}",
            what,
            std::env::consts::OS
        )))
    }
}

fn missing(what: &str) -> WlbbError {
    WlbbError::Unsupported(format!("cannot resolve the {} base directory", what))
}

/// Return the user configuration path.
pub fn config_path() -> Result<PathBuf> {
    ensure_supported("Config")?;
    let base = dirs::config_dir().ok_or_else(|| missing("config"))?;
    Ok(base.join(APP_DIR))
}

/// Return the data path.
pub fn data_path() -> Result<PathBuf> {
    ensure_supported("Data")?;
    let home = dirs::home_dir().ok_or_else(|| missing("home"))?;
    Ok(home.join(DATA_DIR))
}

/// Return the cache path.
pub fn cache_path() -> Result<PathBuf> {
    ensure_supported("Cache")?;
    let base = dirs::cache_dir().ok_or_else(|| missing("cache"))?;
    Ok(base.join(APP_DIR))
}

/// Directory holding a user supplied default configuration.
pub fn default_config_dir() -> Result<PathBuf> {
    config_path()
}

/// Directory holding the named configuration files.
pub fn config_dir() -> Result<PathBuf> {
    Ok(data_path()?.join("configs"))
}

/// Directory holding the log files.
pub fn log_dir() -> Result<PathBuf> {
    Ok(data_path()?.join("logs"))
}

/// Create a directory and its parents; no-op if it exists.
pub fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Create an empty file unless one already exists.
pub fn create_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        fs::OpenOptions::new().create(true).append(true).open(path)?;
    }
    Ok(())
}

/// Delete a file if it exists.
pub fn delete_file(path: &Path) -> Result<()> {
    if path.is_file() {
        fs::remove_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[cfg(target_os = "linux")]
    #[test]
    fn test_data_layout() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(data_path().unwrap(), home.join(".wlbb"));
        assert_eq!(config_dir().unwrap(), home.join(".wlbb").join("configs"));
        assert_eq!(log_dir().unwrap(), home.join(".wlbb").join("logs"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_xdg_layout() {
        if let Some(base) = dirs::config_dir() {
            assert_eq!(config_path().unwrap(), base.join("wlbb"));
            assert_eq!(default_config_dir().unwrap(), base.join("wlbb"));
        }
        if let Some(base) = dirs::cache_dir() {
            assert_eq!(cache_path().unwrap(), base.join("wlbb"));
        }
    }

    #[cfg(not(target_os = "linux"))]
    #[test]
    fn test_unsupported_platform() {
        assert!(matches!(data_path(), Err(WlbbError::Unsupported(_))));
        assert!(matches!(config_path(), Err(WlbbError::Unsupported(_))));
    }

    #[test]
    fn test_create_dir_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("a").join("b");
        create_dir(&dir).unwrap();
        create_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_create_file_keeps_content() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("test.cfg");
        fs::write(&file, "[A]\nx = 1\n").unwrap();

        create_file(&file).unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "[A]\nx = 1\n");
    }

    #[test]
    fn test_create_and_delete_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("test.cfg");

        create_file(&file).unwrap();
        assert!(file.is_file());

        delete_file(&file).unwrap();
        assert!(!file.exists());

        // Deleting twice is fine
        delete_file(&file).unwrap();
    }
}
