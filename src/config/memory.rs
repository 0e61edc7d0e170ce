//! In-memory config loader.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::loader::ConfigLoader;
use super::types::ConfigDict;
use crate::error::Result;

type Dirs = HashMap<PathBuf, HashMap<String, ConfigDict>>;

/// A config loader keeping configurations in virtual directories.
///
/// Every write replaces a whole entry, so a poisoned lock still guards
/// consistent data and is recovered.
#[derive(Debug, Default)]
pub struct MemoryConfigLoader {
    dirs: RwLock<Dirs>,
}

impl MemoryConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a configuration, replacing any previous one with the same name.
    pub fn with_config(self, dir: impl AsRef<Path>, name: impl Into<String>, dict: ConfigDict) -> Self {
        self.write()
            .entry(dir.as_ref().to_path_buf())
            .or_default()
            .insert(name.into(), dict);
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, Dirs> {
        self.dirs.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Dirs> {
        self.dirs.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ConfigLoader for MemoryConfigLoader {
    fn get_config_list(&self, dir: &Path) -> Result<Vec<String>> {
        let dirs = self.read();
        let mut names: Vec<String> = dirs.get(dir).map(|c| c.keys().cloned().collect()).unwrap_or_default();
        names.sort();
        Ok(names)
    }

    fn create_config(&self, dir: &Path, name: &str) -> Result<()> {
        let mut dirs = self.write();
        dirs.entry(dir.to_path_buf())
            .or_default()
            .entry(name.to_string())
            .or_default();
        Ok(())
    }

    fn delete_config(&self, dir: &Path, name: &str) -> Result<()> {
        let mut dirs = self.write();
        if let Some(configs) = dirs.get_mut(dir) {
            configs.remove(name);
        }
        Ok(())
    }

    fn load_config(&self, dir: &Path, name: &str) -> Result<ConfigDict> {
        let dirs = self.read();
        Ok(dirs
            .get(dir)
            .and_then(|configs| configs.get(name))
            .cloned()
            .unwrap_or_default())
    }

    fn save_config(&self, dict: &ConfigDict, dir: &Path, name: &str) -> Result<()> {
        let mut dirs = self.write();
        dirs.entry(dir.to_path_buf())
            .or_default()
            .insert(name.to_string(), dict.clone());
        Ok(())
    }
}
