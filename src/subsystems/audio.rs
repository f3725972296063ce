//! Audio engine subsystem.

use crate::error::SubsystemError;
use actor_framework::Actor;
use async_trait::async_trait;
use tracing::info;

/// Playback state of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Ready,
}

pub struct AudioEngine {
    output: String,
    state: PlaybackState,
}

impl AudioEngine {
    pub fn new(output: &str) -> Self {
        Self {
            output: output.trim().to_string(),
            state: PlaybackState::Stopped,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }
}

#[async_trait]
impl Actor for AudioEngine {
    type Error = SubsystemError;

    fn name(&self) -> String {
        super::AUDIO.to_string()
    }

    async fn on_start(&mut self) -> Result<(), SubsystemError> {
        if self.output.is_empty() {
            return Err(SubsystemError::Failed("no audio output configured".into()));
        }
        self.state = PlaybackState::Ready;
        info!(output = %self.output, "Audio output selected");
        Ok(())
    }

    async fn on_stop(&mut self) {
        self.state = PlaybackState::Stopped;
    }
}
