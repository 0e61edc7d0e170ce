//! Builtin default configuration.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::cfg_loader::parse_cfg;
use super::loader::ConfigLoader;
use super::types::ConfigDict;
use crate::error::Result;

/// Name of the builtin default configuration.
pub const DEFAULT_CFG_NAME: &str = "default_config";

/// `data/default_config.cfg`, compiled into the crate.
pub const BUILTIN_DEFAULT_CFG: &str = include_str!("../../data/default_config.cfg");

#[derive(Clone)]
enum Source {
    Builtin,
    Stored {
        loader: Arc<dyn ConfigLoader>,
        dir: PathBuf,
        name: String,
    },
}

/// Where default configuration values come from.
#[derive(Clone)]
pub struct DefaultConfig {
    source: Source,
}

impl DefaultConfig {
    /// Defaults stored as the configuration `name` of `dir` in `loader`.
    pub fn new(loader: Arc<dyn ConfigLoader>, dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            source: Source::Stored {
                loader,
                dir: dir.into(),
                name: name.into(),
            },
        }
    }

    /// The default configuration compiled into the crate. Never touches the
    /// filesystem.
    pub fn builtin() -> Self {
        Self { source: Source::Builtin }
    }

    /// Directory of stored defaults; `None` for the builtin ones.
    pub fn dir(&self) -> Option<&Path> {
        match &self.source {
            Source::Builtin => None,
            Source::Stored { dir, .. } => Some(dir),
        }
    }

    pub fn name(&self) -> &str {
        match &self.source {
            Source::Builtin => DEFAULT_CFG_NAME,
            Source::Stored { name, .. } => name,
        }
    }

    /// Load the default configuration; empty if stored defaults do not exist.
    pub fn load(&self) -> Result<ConfigDict> {
        match &self.source {
            Source::Builtin => parse_cfg(BUILTIN_DEFAULT_CFG, Path::new("builtin/default_config.cfg")),
            Source::Stored { loader, dir, name } => loader.load_config(dir, name),
        }
    }
}

impl Default for DefaultConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for DefaultConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultConfig")
            .field("dir", &self.dir())
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryConfigLoader;
    use serde_json::json;

    #[test]
    fn test_builtin_defaults_are_embedded() {
        let defaults = DefaultConfig::builtin();
        assert!(defaults.dir().is_none());
        assert_eq!(defaults.name(), DEFAULT_CFG_NAME);

        let expected: ConfigDict =
            serde_json::from_value(json!({"DEVICES": {"backend": "none", "count": "0", "brightness": "255"}}))
                .unwrap();
        assert_eq!(defaults.load().unwrap(), expected);
    }

    #[test]
    fn test_builtin_text_is_writable() {
        let dict = DefaultConfig::default().load().unwrap();
        assert!(crate::config::check_cfg(&dict).is_ok());
    }

    #[test]
    fn test_custom_source() {
        let dict: ConfigDict = serde_json::from_value(json!({"A": {"p": -1}})).unwrap();
        let loader = MemoryConfigLoader::new().with_config("/defaults", "base", dict.clone());
        let defaults = DefaultConfig::new(Arc::new(loader), "/defaults", "base");

        assert_eq!(defaults.dir(), Some(Path::new("/defaults")));
        assert_eq!(defaults.name(), "base");
        assert_eq!(defaults.load().unwrap(), dict);
    }

    #[test]
    fn test_missing_source_is_empty() {
        let defaults = DefaultConfig::new(Arc::new(MemoryConfigLoader::new()), "/nowhere", DEFAULT_CFG_NAME);
        assert!(defaults.load().unwrap().is_empty());
    }
}
