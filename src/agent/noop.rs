//! An agent that does nothing.

use std::sync::Arc;

use super::{Agent, AgentBase, Status};
use crate::error::Result;
use crate::logging::Logger;

/// An agent without config sections whose lifecycle only tracks status.
#[derive(Debug)]
pub struct NoopAgent {
    base: AgentBase,
}

impl NoopAgent {
    pub fn new(name: &str, logger: Arc<Logger>) -> Result<Self> {
        Ok(Self {
            base: AgentBase::for_agent::<Self>(name, logger)?,
        })
    }
}

impl Agent for NoopAgent {
    const KIND: &'static str = "noop";
    const CONFIG_SECTIONS: &'static [&'static str] = &[];

    fn base(&self) -> &AgentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AgentBase {
        &mut self.base
    }

    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        self.base.set_status(Status::Active);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.base.set_status(Status::Inactive);
        Ok(())
    }

    fn quit(&mut self) -> Result<()> {
        self.stop()
    }

    fn restart(&mut self) -> Result<()> {
        self.stop()?;
        self.start()
    }

    fn reload(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_lifecycle() {
        let mut agent = NoopAgent::new("idle", Arc::new(Logger::empty())).unwrap();
        assert_eq!(agent.agent_id(), "noop-idle");
        assert!(agent.config_sections().is_empty());

        agent.init().unwrap();
        agent.start().unwrap();
        assert_eq!(agent.status(), Status::Active);

        agent.restart().unwrap();
        assert_eq!(agent.status(), Status::Active);

        agent.reload().unwrap();
        agent.quit().unwrap();
        assert_eq!(agent.status(), Status::Inactive);
        assert!(agent.config().get_config_dict().is_empty());
    }
}
