//! Configuration interface of a WLBB instance.
//!
//! `WlbbConfig` owns the merged configuration of one agent and reconciles
//! incoming dictionaries against the builtin default configuration and the
//! sections the agent declares.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use super::default::DefaultConfig;
use super::loader::ConfigLoader;
use super::section::WlbbConfigSection;
use super::types::{ConfigDict, validate_config_name};
use crate::error::Result;
use crate::logging::Logger;
use crate::paths;

/// The configuration interface for a WLBB instance which allows loading,
/// saving, generating and modifying configurations.
#[derive(Clone)]
pub struct WlbbConfig {
    cfg_name: String,
    required_sections: Vec<String>,
    loader: Arc<dyn ConfigLoader>,
    defaults: DefaultConfig,
    config_dir: Option<PathBuf>,
    logger: Arc<Logger>,
    cfg_dict: ConfigDict,
}

impl WlbbConfig {
    /// Create an empty config interface.
    ///
    /// `cfg_name` is normally the owning agent's name and `required_sections`
    /// the sections that agent declares. `loader` is used whenever no
    /// explicit loader is passed to an operation.
    pub fn new<I, S>(cfg_name: impl Into<String>, required_sections: I, loader: Arc<dyn ConfigLoader>, logger: Arc<Logger>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cfg_name: cfg_name.into(),
            required_sections: required_sections.into_iter().map(Into::into).collect(),
            loader,
            defaults: DefaultConfig::builtin(),
            config_dir: None,
            logger,
            cfg_dict: ConfigDict::new(),
        }
    }

    /// Use another source for default values.
    pub fn with_defaults(mut self, defaults: DefaultConfig) -> Self {
        self.defaults = defaults;
        self
    }

    /// Read and write named configurations in `dir` instead of the standard
    /// config directory.
    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = Some(dir.into());
        self
    }

    pub fn cfg_name(&self) -> &str {
        &self.cfg_name
    }

    pub fn required_sections(&self) -> &[String] {
        &self.required_sections
    }

    pub fn loader(&self) -> Arc<dyn ConfigLoader> {
        Arc::clone(&self.loader)
    }

    pub fn set_loader(&mut self, loader: Arc<dyn ConfigLoader>) {
        self.loader = loader;
    }

    pub fn defaults(&self) -> &DefaultConfig {
        &self.defaults
    }

    /// Directory holding the named configurations.
    pub fn config_dir(&self) -> Result<PathBuf> {
        match &self.config_dir {
            Some(dir) => Ok(dir.clone()),
            None => paths::config_dir(),
        }
    }

    fn is_required(&self, section: &str) -> bool {
        self.required_sections.iter().any(|s| s == section)
    }

    /// Replace the configuration with the declared sections of `dict`.
    fn raw_import_dict(&mut self, dict: &ConfigDict) {
        self.cfg_dict = dict
            .iter()
            .filter(|(name, _)| self.is_required(name))
            .map(|(name, params)| (name.clone(), params.clone()))
            .collect();
    }

    /// Import the default configuration, keeping only declared sections.
    ///
    /// Declared sections missing from the defaults are reported on the
    /// logger and otherwise ignored.
    pub fn import_default(&mut self) -> Result<()> {
        let defaults = self.defaults.load()?;
        self.raw_import_dict(&defaults);

        let missing: Vec<&str> = self
            .required_sections
            .iter()
            .filter(|s| !self.cfg_dict.contains_key(s.as_str()))
            .map(String::as_str)
            .collect();

        if !missing.is_empty() {
            self.logger.warn("Builtin default config doesn't contain every config section.");
            self.logger.debug(format_args!("Sections missing in the default config: {:?}.", missing));
        }

        Ok(())
    }

    /// Import the config `dict`.
    ///
    /// Without `complete_default` the configuration becomes the declared
    /// sections of `dict`; everything else is dropped.
    ///
    /// With `complete_default` the defaults are imported first and `dict` is
    /// merged into them: for each section that is both declared and present
    /// in the defaults, incoming parameters override default ones and
    /// default-only parameters are kept. Sections that are undeclared, or
    /// declared but absent from the defaults, are dropped on purpose, so the
    /// result always has the shape of the default configuration.
    pub fn import_dict(&mut self, dict: &ConfigDict, complete_default: bool) -> Result<()> {
        if !complete_default {
            self.raw_import_dict(dict);
            return Ok(());
        }

        self.import_default()?;

        for (name, params) in dict {
            if !self.is_required(name) {
                continue;
            }
            if let Some(current) = self.cfg_dict.get_mut(name) {
                current.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }

        Ok(())
    }

    /// Import the config named `cfg_name` from the config directory.
    ///
    /// Falls back to the owner's loader when `cfg_loader` is `None`. A
    /// missing configuration imports as an empty one.
    pub fn import_config(&mut self, cfg_name: &str, cfg_loader: Option<&dyn ConfigLoader>, complete_default: bool) -> Result<()> {
        validate_config_name(cfg_name)?;

        let dir = self.config_dir()?;
        let dict = {
            let loader = cfg_loader.unwrap_or(self.loader.as_ref());
            loader.load_config(&dir, cfg_name)?
        };
        log::debug!("Importing config '{}' from {}", cfg_name, dir.display());

        self.import_dict(&dict, complete_default)
    }

    /// Load the configuration associated with the owner, completed with
    /// default values.
    pub fn load(&mut self, cfg_loader: Option<&dyn ConfigLoader>) -> Result<()> {
        let name = self.cfg_name.clone();
        self.import_config(&name, cfg_loader, true)
    }

    /// Save the current configuration as the owner's configuration.
    pub fn save(&self, cfg_loader: Option<&dyn ConfigLoader>) -> Result<()> {
        validate_config_name(&self.cfg_name)?;

        let dir = self.config_dir()?;
        let loader = cfg_loader.unwrap_or(self.loader.as_ref());
        loader.save_config(&self.get_config_dict(), &dir, &self.cfg_name)?;
        self.logger.info(format_args!("Saved config '{}' to {}", self.cfg_name, dir.display()));
        Ok(())
    }

    /// Copy of the configuration dictionary.
    pub fn get_config_dict(&self) -> ConfigDict {
        self.cfg_dict.clone()
    }

    /// Sections of the configuration, derived from the dictionary.
    pub fn sections(&self) -> Vec<WlbbConfigSection> {
        self.cfg_dict
            .iter()
            .map(|(name, params)| WlbbConfigSection::with_params(name.clone(), params.clone()))
            .collect()
    }

    /// Return the requested config section if it exists.
    pub fn section(&self, name: &str) -> Option<WlbbConfigSection> {
        self.cfg_dict
            .get(name)
            .map(|params| WlbbConfigSection::with_params(name, params.clone()))
    }

    /// Store `section` in the configuration. Returns `false` and leaves the
    /// configuration untouched when the section is not declared.
    pub fn put_section(&mut self, section: WlbbConfigSection) -> bool {
        if !self.is_required(section.name()) {
            return false;
        }
        self.cfg_dict.insert(section.name().to_string(), section.get_dict());
        true
    }
}

impl fmt::Debug for WlbbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WlbbConfig")
            .field("cfg_name", &self.cfg_name)
            .field("required_sections", &self.required_sections)
            .field("defaults", &self.defaults)
            .field("config_dir", &self.config_dir)
            .field("cfg_dict", &self.cfg_dict)
            .finish_non_exhaustive()
    }
}
