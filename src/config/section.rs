//! A named cluster of parameters.

use super::types::{ConfigValue, SectionDict};

/// A cluster of parameters which can be modified and accessed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WlbbConfigSection {
    name: String,
    params: SectionDict,
}

impl WlbbConfigSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_params(name, SectionDict::new())
    }

    pub fn with_params(name: impl Into<String>, params: SectionDict) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Copy of the section's parameters.
    pub fn get_dict(&self) -> SectionDict {
        self.params.clone()
    }

    pub fn parameter_list(&self) -> Vec<String> {
        self.params.keys().cloned().collect()
    }

    pub fn get(&self, parameter: &str) -> Option<&ConfigValue> {
        self.params.get(parameter)
    }

    /// Add a new parameter. An existing parameter keeps its value.
    pub fn add_parameter(&mut self, parameter: impl Into<String>, value: ConfigValue) {
        self.params.entry(parameter.into()).or_insert(value);
    }
}
