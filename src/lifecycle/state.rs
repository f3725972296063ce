//! Run state of one orchestrator run.

use std::fmt;
use thiserror::Error;
use tokio::sync::watch;
use tracing::debug;

/// Where a run currently is. States only ever move forward.
///
/// ```text
/// NotStarted → LoopRunning → AudioReady → MixerReady → BackendReady
///            → FrontendsReady → Idling → ShuttingDown → Stopped
/// ```
///
/// `Aborted` is terminal and reachable from any state before `Idling`. `ShuttingDown`
/// may also be entered early, when a termination trigger arrives mid-startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    LoopRunning,
    AudioReady,
    MixerReady,
    BackendReady,
    FrontendsReady,
    Idling,
    ShuttingDown,
    Stopped,
    Aborted,
}

impl RunState {
    fn rank(self) -> u8 {
        match self {
            RunState::NotStarted => 0,
            RunState::LoopRunning => 1,
            RunState::AudioReady => 2,
            RunState::MixerReady => 3,
            RunState::BackendReady => 4,
            RunState::FrontendsReady => 5,
            RunState::Idling => 6,
            RunState::ShuttingDown => 7,
            RunState::Stopped => 8,
            RunState::Aborted => 9,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Stopped | RunState::Aborted)
    }

    /// Whether moving from `self` to `next` keeps the run moving forward.
    pub fn can_advance_to(self, next: RunState) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            RunState::Aborted => self.rank() < RunState::Idling.rank(),
            RunState::Stopped => self == RunState::ShuttingDown,
            _ => next.rank() > self.rank(),
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid run state transition {from} -> {to}")]
pub struct StateError {
    pub from: RunState,
    pub to: RunState,
}

/// Publishes the run state to any number of observers.
#[derive(Debug)]
pub struct RunStateTracker {
    sender: watch::Sender<RunState>,
}

impl RunStateTracker {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(RunState::NotStarted);
        Self { sender }
    }

    pub fn current(&self) -> RunState {
        *self.sender.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<RunState> {
        self.sender.subscribe()
    }

    /// Moves to `next`, refusing any transition that would go backwards.
    pub fn advance(&self, next: RunState) -> Result<(), StateError> {
        let from = self.current();
        if !from.can_advance_to(next) {
            return Err(StateError { from, to: next });
        }
        debug!(%from, to = %next, "Run state");
        self.sender.send_replace(next);
        Ok(())
    }
}

impl Default for RunStateTracker {
    fn default() -> Self {
        Self::new()
    }
}
