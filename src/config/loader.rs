//! Config loader trait definition.

use std::path::Path;

use super::types::ConfigDict;
use crate::error::Result;

/// A config loader is used to list, create, delete, load and save
/// configurations stored in a directory.
///
/// Absence is never an error: a missing directory lists nothing and a
/// missing configuration loads as an empty dictionary.
pub trait ConfigLoader: Send + Sync {
    /// Names of every configuration in `dir` this loader understands.
    fn get_config_list(&self, dir: &Path) -> Result<Vec<String>>;

    /// Create an empty configuration named `name` in `dir` unless it exists.
    fn create_config(&self, dir: &Path, name: &str) -> Result<()>;

    /// Delete the configuration named `name` in `dir` if it exists.
    fn delete_config(&self, dir: &Path, name: &str) -> Result<()>;

    /// Load the configuration named `name` from `dir`.
    fn load_config(&self, dir: &Path, name: &str) -> Result<ConfigDict>;

    /// Save `dict` as the configuration named `name` in `dir`, creating it
    /// first if needed.
    fn save_config(&self, dict: &ConfigDict, dir: &Path, name: &str) -> Result<()>;
}
