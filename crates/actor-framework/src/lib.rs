//! # Actor Framework
//!
//! This crate provides the building blocks for running independent subsystems as actors
//! on Tokio: each actor owns its state inside its own task and is reachable only through
//! a capability-restricted [`ActorHandle`].
//!
//! ## Architecture Overview
//!
//! 1. **Behaviour Layer** ([`Actor`]) - startup and shutdown hooks of a subsystem
//! 2. **Runtime Layer** ([`ActorRunner`], [`spawn`]) - task, mailbox, ready handshake
//! 3. **Interface Layer** ([`ActorHandle`]) - the single `stop` capability
//!
//! ## Example
//!
//! ```rust
//! use actor_framework::{Actor, FrameworkError};
//! use async_trait::async_trait;
//! use std::time::Duration;
//!
//! #[derive(Debug, thiserror::Error)]
//! enum MixerError {
//!     #[error("volume out of range: {0}")]
//!     Volume(u8),
//!     #[error(transparent)]
//!     Framework(#[from] FrameworkError),
//! }
//!
//! struct Mixer { volume: u8 }
//!
//! #[async_trait]
//! impl Actor for Mixer {
//!     type Error = MixerError;
//!
//!     async fn on_start(&mut self) -> Result<(), MixerError> {
//!         if self.volume > 100 {
//!             return Err(MixerError::Volume(self.volume));
//!         }
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     // Returns once `on_start` has completed
//!     let handle = actor_framework::spawn(Mixer { volume: 80 }).await.unwrap();
//!     assert_eq!(handle.name(), "Mixer");
//!
//!     // The only thing a handle can do
//!     handle.stop(Duration::from_secs(5)).await.unwrap();
//!
//!     let refused = actor_framework::spawn(Mixer { volume: 120 }).await;
//!     assert!(matches!(refused, Err(MixerError::Volume(120))));
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - `spawn` blocks the caller until the actor reports ready, so a sequence of spawns
//!   is totally ordered
//! - `stop` is bounded by a grace period; an actor that never acknowledges is aborted
//!
//! ## Testing
//!
//! The [`mock`] module provides [`MockActor`](mock::MockActor), a scriptable actor that
//! records its lifecycle in a shared journal.

pub mod actor;
pub mod error;
pub mod handle;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::{spawn, Actor, ActorRunner, BoxedActor, MAILBOX_SIZE};
pub use error::FrameworkError;
pub use handle::ActorHandle;
pub use message::{ActorRequest, Response};
