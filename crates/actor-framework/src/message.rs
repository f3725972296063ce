//! # Generic Messages
//!
//! This module defines the messages an [`ActorHandle`](crate::ActorHandle) sends to the
//! task that runs its actor.

use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor task.
///
/// The handle exposes a deliberately small capability set, so the mailbox only carries
/// lifecycle requests. Anything a subsystem does while running is its own business.
#[derive(Debug)]
pub enum ActorRequest {
    /// Run the actor's `on_stop` hook, acknowledge, and end the task.
    Stop { respond_to: Response<()> },
}
