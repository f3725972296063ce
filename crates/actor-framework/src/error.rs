//! # Framework Errors
//!
//! This module defines the common error types used throughout the actor framework.
//! Actor-specific error types wrap [`FrameworkError`] (via `From`) so that channel and
//! task failures surface through the same `Result` as the actor's own startup errors.

use std::time::Duration;

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Actor '{actor}' did not stop within {grace:?}")]
    StopTimedOut { actor: String, grace: Duration },
    #[error("Actor task failed: {0}")]
    TaskFailed(String),
}
