//! Hand-clocked driver for a [`ChannelSession`].
//!
//! Used by the headless mode and by tests: time only moves when asked, and every deadline in
//! between is visited in order so typing indicators and reveal stamps land where they would live.

use crate::clock::ManualClock;
use crate::error::ConfigError;
use crate::session::{ChannelSession, SessionConfig};
use crate::templates::{TemplateRegistry, TemplateSource};
use crate::config::{CHANNELS, Timings};

pub struct ReplayDriver {
    clock: ManualClock,
    session: ChannelSession,
}

impl ReplayDriver {
    pub fn new(config: SessionConfig, source: Box<dyn TemplateSource>) -> Self {
        let clock = ManualClock::new();
        let session = ChannelSession::new(config, source, Box::new(clock.clone()));
        Self { clock, session }
    }

    /// Embedded channels and content.
    pub fn embedded(timings: Timings) -> Result<Self, ConfigError> {
        let config = SessionConfig::embedded(timings)?;
        Ok(Self::new(config, Box::new(TemplateRegistry::from_config(&CHANNELS))))
    }

    pub fn session(&self) -> &ChannelSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ChannelSession {
        &mut self.session
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    pub fn now_ms(&self) -> u64 {
        self.session.now_ms()
    }

    /// Move time forward by `ms`, firing everything that comes due on the way.
    pub fn advance(&mut self, ms: u64) {
        let target = self.now_ms().saturating_add(ms);
        while let Some(deadline) = self.session.next_deadline()
            && deadline <= target
        {
            self.clock.set(deadline.max(self.now_ms()));
            self.session.tick();
        }
        self.clock.set(target);
        self.session.tick();
    }

    /// Run until nothing is pending. Returns the milliseconds that passed.
    pub fn settle(&mut self) -> u64 {
        let started = self.now_ms();
        while let Some(deadline) = self.session.next_deadline() {
            self.clock.set(deadline.max(self.now_ms()));
            self.session.tick();
        }
        self.now_ms() - started
    }
}
