//! Dictionary representation shared by config loaders and config interfaces.

use std::collections::BTreeMap;

use crate::error::{Result, WlbbError};

/// A single parameter value.
pub type ConfigValue = serde_json::Value;

/// Parameters of one section, by name.
pub type SectionDict = BTreeMap<String, ConfigValue>;

/// Sections of a configuration, by name.
///
/// ```text
/// { "PARAMETER_GROUP_1": { "parameter1": value1, "parameter2": value2 } }
/// ```
pub type ConfigDict = BTreeMap<String, SectionDict>;

const MAX_CONFIG_NAME_LEN: usize = 64;

/// Check that `name` can be used as a configuration name.
///
/// Valid names are 1 to 64 characters of ASCII letters, digits, `_` and `-`,
/// which keeps every name a plain file stem.
pub fn validate_config_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.len() <= MAX_CONFIG_NAME_LEN
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(WlbbError::InvalidConfigName(name.to_string()))
    }
}

/// Render a value the way it is written in a text config file.
pub fn value_to_text(value: &ConfigValue) -> String {
    match value {
        ConfigValue::String(s) => s.clone(),
        ConfigValue::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_config_names() {
        for name in ["a", "default_config", "test_agent", "Living-Room_2", "x".repeat(64).as_str()] {
            assert!(validate_config_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_invalid_config_names() {
        for name in ["", "../etc", "with space", "dot.cfg", "é", "x".repeat(65).as_str()] {
            let err = validate_config_name(name).unwrap_err();
            assert!(matches!(err, WlbbError::InvalidConfigName(_)), "{name} should be invalid");
        }
    }

    #[test]
    fn test_value_to_text() {
        assert_eq!(value_to_text(&json!("on")), "on");
        assert_eq!(value_to_text(&json!(-3)), "-3");
        assert_eq!(value_to_text(&json!(0.5)), "0.5");
        assert_eq!(value_to_text(&json!(true)), "true");
        assert_eq!(value_to_text(&ConfigValue::Null), "");
    }
}
