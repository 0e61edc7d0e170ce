//! Configuration subsystem for WLBB.
//!
//! A configuration is a two-level dictionary: section name to parameters.
//! - `ConfigLoader` implementations persist named configurations in a directory
//! - `WlbbConfig` merges a configuration into the builtin defaults for one agent
//! - `ParamConfig` is a flat parameter set with explicit defaults

pub use self::cfg_loader::{CFG_EXTENSION, CfgConfigLoader, FALLBACK_SECTION, check_cfg, parse_cfg, render_cfg};
pub use self::default::{BUILTIN_DEFAULT_CFG, DEFAULT_CFG_NAME, DefaultConfig};
pub use self::loader::ConfigLoader;
pub use self::memory::MemoryConfigLoader;
pub use self::params::{DEFAULTS_SECTION, PARAMETERS_SECTION, ParamConfig};
pub use self::section::WlbbConfigSection;
pub use self::types::{ConfigDict, ConfigValue, SectionDict, validate_config_name};
pub use self::wlbb_config::WlbbConfig;

mod cfg_loader;
mod default;
mod loader;
mod memory;
mod params;
mod section;
mod types;
mod wlbb_config;
