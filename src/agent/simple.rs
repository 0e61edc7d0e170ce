//! A simple self-dependent agent driving a set of devices.

use std::sync::Arc;

use super::{Agent, AgentBase, Status};
use crate::error::Result;
use crate::logging::Logger;

/// A simple self-dependent WLBB agent.
///
/// Its configuration is loaded on `init` and `reload`, and saved on `quit`.
#[derive(Debug)]
pub struct SimpleAgent {
    base: AgentBase,
}

impl SimpleAgent {
    pub fn new(name: &str, logger: Arc<Logger>) -> Result<Self> {
        Ok(Self {
            base: AgentBase::for_agent::<Self>(name, logger)?,
        })
    }
}

impl Agent for SimpleAgent {
    const KIND: &'static str = "simple";
    const CONFIG_SECTIONS: &'static [&'static str] = &["DEVICES"];

    fn base(&self) -> &AgentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AgentBase {
        &mut self.base
    }

    fn init(&mut self) -> Result<()> {
        self.base.config_mut().load(None)?;
        self.base.logger().info(format_args!("{} initialized", self.base.agent_id()));
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        if !self.base.status().is_active() {
            self.base.set_status(Status::Active);
            self.base.logger().info(format_args!("{} started", self.base.agent_id()));
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if self.base.status().is_active() {
            self.base.set_status(Status::Inactive);
            self.base.logger().info(format_args!("{} stopped", self.base.agent_id()));
        }
        Ok(())
    }

    fn quit(&mut self) -> Result<()> {
        self.stop()?;
        self.base.config().save(None)
    }

    fn restart(&mut self) -> Result<()> {
        self.stop()?;
        self.start()
    }

    fn reload(&mut self) -> Result<()> {
        self.base.config_mut().load(None)?;
        self.base.logger().info(format_args!("{} reloaded its config", self.base.agent_id()));
        Ok(())
    }
}
