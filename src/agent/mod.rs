//! Agents: named units that own a configuration and a lifecycle.
//!
//! Each concrete agent type declares a `KIND`, used as the prefix of its
//! identifier (`"<kind>-<name>"`), and the config sections it requires.
//! Lifecycle behavior is left to the concrete type; the shared state lives
//! in [`AgentBase`].

use std::fmt;
use std::sync::Arc;

use crate::config::{CfgConfigLoader, ConfigLoader, WlbbConfig};
use crate::error::{Result, WlbbError};
use crate::logging::Logger;

mod noop;
mod simple;

pub use noop::NoopAgent;
pub use simple::SimpleAgent;

const NAME_MIN_LEN: usize = 3;
const NAME_MAX_LEN: usize = 20;

/// Check that `name` is 3 to 20 characters of `[a-z0-9_]`.
pub fn validate_agent_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    let valid = (NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len)
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(WlbbError::InvalidAgentName(name.to_string()))
    }
}

/// Status in which an agent can be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Inactive,
    Active,
}

impl Status {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inactive => write!(f, "INACTIVE"),
            Self::Active => write!(f, "ACTIVE"),
        }
    }
}

/// State shared by every agent.
#[derive(Debug)]
pub struct AgentBase {
    name: String,
    agent_id: String,
    status: Status,
    config: WlbbConfig,
    logger: Arc<Logger>,
}

impl AgentBase {
    /// Validate `name` and build the state of an agent of type `kind`.
    ///
    /// The agent starts `Inactive` with an empty configuration named after
    /// it, backed by a [`CfgConfigLoader`].
    pub fn new(kind: &str, name: &str, config_sections: &[&str], logger: Arc<Logger>) -> Result<Self> {
        validate_agent_name(name)?;

        let config = WlbbConfig::new(
            name,
            config_sections.iter().copied(),
            Arc::new(CfgConfigLoader::new()),
            Arc::clone(&logger),
        );

        Ok(Self {
            name: name.to_string(),
            agent_id: format!("{}-{}", kind, name),
            status: Status::Inactive,
            config,
            logger,
        })
    }

    /// Build the state of an agent of type `A`.
    pub fn for_agent<A: Agent>(name: &str, logger: Arc<Logger>) -> Result<Self> {
        Self::new(A::KIND, name, A::CONFIG_SECTIONS, logger)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn set_status(&mut self, status: Status) {
        if self.status != status {
            log::debug!("Agent {} {} -> {}", self.agent_id, self.status, status);
        }
        self.status = status;
    }

    pub fn config(&self) -> &WlbbConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut WlbbConfig {
        &mut self.config
    }

    /// Replace the configuration with one named after this agent and
    /// declaring the same sections.
    pub fn set_config(&mut self, config: WlbbConfig) -> Result<()> {
        if config.cfg_name() != self.config.cfg_name() || config.required_sections() != self.config.required_sections() {
            return Err(WlbbError::ConfigMismatch(format!(
                "config '{}' with sections {:?} does not belong to agent {}",
                config.cfg_name(),
                config.required_sections(),
                self.agent_id
            )));
        }
        self.config = config;
        Ok(())
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }
}

/// Abstract definition of a WLBB agent.
pub trait Agent {
    /// Agent type, prefix of the agent identifier.
    const KIND: &'static str;

    /// Config sections required by this agent type.
    const CONFIG_SECTIONS: &'static [&'static str];

    fn base(&self) -> &AgentBase;

    fn base_mut(&mut self) -> &mut AgentBase;

    /// Initialize the agent.
    fn init(&mut self) -> Result<()>;

    /// Start the agent's operation.
    fn start(&mut self) -> Result<()>;

    /// Stop the agent's operation.
    fn stop(&mut self) -> Result<()>;

    /// Uninitialize the agent.
    fn quit(&mut self) -> Result<()>;

    /// Restart the agent's operation.
    fn restart(&mut self) -> Result<()>;

    /// Reload the agent.
    fn reload(&mut self) -> Result<()>;

    fn name(&self) -> &str {
        self.base().name()
    }

    fn agent_id(&self) -> &str {
        self.base().agent_id()
    }

    fn status(&self) -> Status {
        self.base().status()
    }

    fn config_sections(&self) -> &'static [&'static str] {
        Self::CONFIG_SECTIONS
    }

    fn config(&self) -> &WlbbConfig {
        self.base().config()
    }

    fn config_mut(&mut self) -> &mut WlbbConfig {
        self.base_mut().config_mut()
    }

    fn set_config(&mut self, config: WlbbConfig) -> Result<()> {
        self.base_mut().set_config(config)
    }

    fn config_loader(&self) -> Arc<dyn ConfigLoader> {
        self.config().loader()
    }

    fn set_config_loader(&mut self, loader: Arc<dyn ConfigLoader>) {
        self.config_mut().set_loader(loader);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryConfigLoader;

    #[test]
    fn test_valid_names() {
        for name in ["abc", "test_agent", "lamp_01", "a_b", "x".repeat(20).as_str()] {
            assert!(validate_agent_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_invalid_lengths() {
        for name in ["", "ab", "x".repeat(21).as_str()] {
            assert!(matches!(validate_agent_name(name), Err(WlbbError::InvalidAgentName(_))));
        }
    }

    #[test]
    fn test_invalid_characters() {
        for name in ["Lamp", "lamp-1", "lamp 1", "lamp.cfg", "lampé", "../lamp"] {
            assert!(matches!(validate_agent_name(name), Err(WlbbError::InvalidAgentName(_))), "{name}");
        }
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::default(), Status::Inactive);
        assert_eq!(Status::Inactive.to_string(), "INACTIVE");
        assert_eq!(Status::Active.to_string(), "ACTIVE");
        assert!(Status::Active.is_active());
    }

    #[test]
    fn test_base_identity() {
        let base = AgentBase::new("dummy", "test_agent", &["A", "B"], Arc::new(Logger::empty())).unwrap();

        assert_eq!(base.name(), "test_agent");
        assert_eq!(base.agent_id(), "dummy-test_agent");
        assert_eq!(base.status(), Status::Inactive);
        assert_eq!(base.config().cfg_name(), "test_agent");
        assert_eq!(base.config().required_sections(), ["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_base_rejects_invalid_name() {
        let err = AgentBase::new("dummy", "No", &[], Arc::new(Logger::empty())).unwrap_err();
        assert!(matches!(err, WlbbError::InvalidAgentName(name) if name == "No"));
    }

    #[test]
    fn test_set_config_keeps_declared_sections() {
        let mut agent = NoopAgent::new("noop_agent", Arc::new(Logger::empty())).unwrap();
        let foreign = WlbbConfig::new(
            "noop_agent",
            ["OTHER"],
            Arc::new(MemoryConfigLoader::new()),
            Arc::new(Logger::empty()),
        );

        let err = agent.set_config(foreign).unwrap_err();
        assert!(matches!(err, WlbbError::ConfigMismatch(_)));
        assert!(agent.config().required_sections().is_empty());
    }

    #[test]
    fn test_set_config_keeps_name() {
        let mut agent = NoopAgent::new("noop_agent", Arc::new(Logger::empty())).unwrap();
        let other = NoopAgent::new("other_agent", Arc::new(Logger::empty())).unwrap();

        let err = agent.set_config(other.config().clone()).unwrap_err();
        assert!(matches!(err, WlbbError::ConfigMismatch(_)));
        assert_eq!(agent.config().cfg_name(), "noop_agent");
    }

    #[test]
    fn test_set_config_accepts_own_config() {
        let mut agent = NoopAgent::new("noop_agent", Arc::new(Logger::empty())).unwrap();
        let config = agent.config().clone().with_config_dir("/virtual/configs");

        agent.set_config(config).unwrap();
        assert_eq!(agent.config().config_dir().unwrap(), std::path::PathBuf::from("/virtual/configs"));
    }

    #[test]
    fn test_set_config_loader() {
        let mut agent = NoopAgent::new("noop_agent", Arc::new(Logger::empty())).unwrap();
        let loader: Arc<dyn ConfigLoader> = Arc::new(MemoryConfigLoader::new());

        agent.set_config_loader(Arc::clone(&loader));
        assert!(Arc::ptr_eq(&agent.config_loader(), &loader));
    }
}
