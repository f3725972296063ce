//! Mixer subsystems.

use crate::error::SubsystemError;
use actor_framework::Actor;
use async_trait::async_trait;
use tracing::debug;

pub const DEFAULT_VOLUME: u8 = 100;

/// Volume applied in software, 0-100.
pub struct SoftwareMixer {
    volume: u8,
}

impl SoftwareMixer {
    pub fn new() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
        }
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }
}

impl Default for SoftwareMixer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Actor for SoftwareMixer {
    type Error = SubsystemError;

    fn name(&self) -> String {
        "software-mixer".to_string()
    }

    async fn on_start(&mut self) -> Result<(), SubsystemError> {
        debug!(volume = self.volume, "Software mixer ready");
        Ok(())
    }
}

/// Mixer that ignores volume changes.
pub struct DummyMixer;

#[async_trait]
impl Actor for DummyMixer {
    type Error = SubsystemError;

    fn name(&self) -> String {
        "dummy-mixer".to_string()
    }
}
