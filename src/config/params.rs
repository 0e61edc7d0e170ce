//! Flat parameter configuration with per-parameter default values.
//!
//! Unlike [`WlbbConfig`](super::WlbbConfig), a `ParamConfig` has no
//! sections: every parameter is declared with [`ParamConfig::add_param`] and
//! any access to an undeclared parameter fails with
//! [`WlbbError::NotAParameter`].
//!
//! Persisted through any [`ConfigLoader`] as two sections:
//!
//! ```text
//! [PARAMETERS]
//! brightness = 200
//!
//! [DEFAULTS]
//! brightness = 255
//! ```

use std::path::Path;

use super::loader::ConfigLoader;
use super::types::{ConfigDict, ConfigValue, SectionDict, validate_config_name};
use crate::error::{Result, WlbbError};

/// Section holding current values.
pub const PARAMETERS_SECTION: &str = "PARAMETERS";

/// Section holding default values.
pub const DEFAULTS_SECTION: &str = "DEFAULTS";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamConfig {
    config_name: Option<String>,
    defaults: SectionDict,
    values: SectionDict,
}

impl ParamConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the configuration this was loaded from, if any.
    pub fn config_name(&self) -> Option<&str> {
        self.config_name.as_deref()
    }

    fn ensure_param(&self, param: &str) -> Result<()> {
        if self.values.contains_key(param) {
            Ok(())
        } else {
            Err(WlbbError::NotAParameter(param.to_string()))
        }
    }

    /// Declare `param`, setting both its default and its value.
    pub fn add_param(&mut self, param: impl Into<String>, default: ConfigValue) -> &mut Self {
        let param = param.into();
        self.defaults.insert(param.clone(), default.clone());
        self.values.insert(param, default);
        self
    }

    pub fn del_param(&mut self, param: &str) -> Result<&mut Self> {
        self.ensure_param(param)?;
        self.defaults.remove(param);
        self.values.remove(param);
        Ok(self)
    }

    pub fn set_default(&mut self, param: &str, default: ConfigValue) -> Result<&mut Self> {
        self.ensure_param(param)?;
        self.defaults.insert(param.to_string(), default);
        Ok(self)
    }

    pub fn get_default(&self, param: &str) -> Result<&ConfigValue> {
        self.ensure_param(param)?;
        self.defaults
            .get(param)
            .ok_or_else(|| WlbbError::NotAParameter(param.to_string()))
    }

    pub fn set_value(&mut self, param: &str, value: ConfigValue) -> Result<&mut Self> {
        self.ensure_param(param)?;
        self.values.insert(param.to_string(), value);
        Ok(self)
    }

    pub fn get_value(&self, param: &str) -> Result<&ConfigValue> {
        self.values
            .get(param)
            .ok_or_else(|| WlbbError::NotAParameter(param.to_string()))
    }

    /// Reset `param` to its default value.
    pub fn restore_default(&mut self, param: &str) -> Result<&mut Self> {
        let default = self.get_default(param)?.clone();
        self.set_value(param, default)
    }

    pub fn param_list(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    /// Dictionary representation used for persistence.
    pub fn to_dict(&self) -> ConfigDict {
        ConfigDict::from([
            (PARAMETERS_SECTION.to_string(), self.values.clone()),
            (DEFAULTS_SECTION.to_string(), self.defaults.clone()),
        ])
    }

    /// Replace every parameter with those found in `dict`.
    ///
    /// A parameter without a default uses its value as default, and a
    /// default without a value declares the parameter at its default.
    pub fn import_dict(&mut self, dict: &ConfigDict) {
        let mut values = dict.get(PARAMETERS_SECTION).cloned().unwrap_or_default();
        let mut defaults = dict.get(DEFAULTS_SECTION).cloned().unwrap_or_default();

        for (param, value) in &values {
            defaults.entry(param.clone()).or_insert_with(|| value.clone());
        }
        for (param, default) in &defaults {
            values.entry(param.clone()).or_insert_with(|| default.clone());
        }

        self.values = values;
        self.defaults = defaults;
    }

    /// Load the configuration `name` from `dir`.
    pub fn load(&mut self, dir: &Path, name: &str, loader: &dyn ConfigLoader) -> Result<&mut Self> {
        validate_config_name(name)?;

        let dict = loader.load_config(dir, name)?;
        self.import_dict(&dict);
        self.config_name = Some(name.to_string());
        log::debug!("Loaded {} parameter(s) from config '{}'", self.values.len(), name);
        Ok(self)
    }

    /// Save under `name` without changing this configuration's own name.
    pub fn save_as(&self, dir: &Path, name: &str, loader: &dyn ConfigLoader) -> Result<&Self> {
        validate_config_name(name)?;

        loader.save_config(&self.to_dict(), dir, name)?;
        Ok(self)
    }

    /// Save under the name this configuration was loaded from.
    pub fn save(&self, dir: &Path, loader: &dyn ConfigLoader) -> Result<&Self> {
        let name = self
            .config_name
            .as_deref()
            .ok_or_else(|| WlbbError::InvalidConfigName(String::new()))?;
        self.save_as(dir, name, loader)
    }
}
