//! # Actor Trait & Runner
//!
//! This module defines the [`Actor`] trait, the [`ActorRunner`] that drives an actor
//! inside its own Tokio task, and [`spawn`], which starts an actor and waits until it
//! reports ready.
//!
//! ## Startup Handshake
//!
//! `spawn` does not return until the actor's `on_start` hook has finished:
//!
//! 1. The runner is spawned on a new task together with a `oneshot` "ready" channel.
//! 2. The task calls `on_start` and reports the outcome on the ready channel.
//! 3. On success, `spawn` hands back an [`ActorHandle`]; on failure the task ends and the
//!    actor's error is returned instead.
//!
//! This gives the caller a total order over actor creation: when `spawn(a).await`
//! returns `Ok`, actor `a` is running and nothing started afterwards can overtake it.

use crate::error::FrameworkError;
use crate::handle::ActorHandle;
use crate::message::ActorRequest;
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Capacity of every actor mailbox.
pub const MAILBOX_SIZE: usize = 8;

/// Contract for anything that runs behind an [`ActorHandle`].
///
/// # Async Hooks
/// The trait is `#[async_trait]` so hooks can await I/O (binding sockets, spawning helper
/// threads). Both hooks have default implementations; an actor with nothing to prepare
/// or release can implement the trait with an empty body.
///
/// # Errors
/// Each actor picks its own error type. It must absorb [`FrameworkError`] so that
/// failures of the surrounding machinery (a panicking task, a dropped channel) reach the
/// caller through the same `Result`.
#[async_trait]
pub trait Actor: Send + 'static {
    /// The error type returned when the actor cannot start.
    type Error: std::error::Error + From<FrameworkError> + Send + Sync + 'static;

    /// Name used in logs and on the handle.
    ///
    /// Defaults to the short type name (e.g., `"HttpFrontend"` instead of
    /// `"chorus::subsystems::frontend::http::HttpFrontend"`).
    fn name(&self) -> String {
        std::any::type_name::<Self>()
            .split("::")
            .last()
            .unwrap_or("Unknown")
            .to_string()
    }

    /// Called once on the actor's own task before it is reported ready.
    async fn on_start(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called once when a stop is requested or every handle is gone.
    async fn on_stop(&mut self) {}
}

/// An actor of any concrete type behind a trait object, for registries that pick the
/// type at runtime.
///
/// Carries no lifetime parameters: a future spawning a `BoxedActor` is `Send` wherever
/// it is polled, including inside `tokio::spawn`.
pub struct BoxedActor<E>
where
    E: std::error::Error + From<FrameworkError> + Send + Sync + 'static,
{
    inner: Box<dyn Actor<Error = E>>,
}

impl<E> BoxedActor<E>
where
    E: std::error::Error + From<FrameworkError> + Send + Sync + 'static,
{
    pub fn new<A: Actor<Error = E>>(actor: A) -> Self {
        Self {
            inner: Box::new(actor),
        }
    }
}

#[async_trait]
impl<E> Actor for BoxedActor<E>
where
    E: std::error::Error + From<FrameworkError> + Send + Sync + 'static,
{
    type Error = E;

    fn name(&self) -> String {
        self.inner.name()
    }

    async fn on_start(&mut self) -> Result<(), E> {
        self.inner.on_start().await
    }

    async fn on_stop(&mut self) {
        self.inner.on_stop().await
    }
}

/// Drives a single actor: runs its hooks and serves its mailbox.
///
/// The runner owns the actor exclusively. Nothing outside the task can reach the actor's
/// state; the only way in is the mailbox behind the [`ActorHandle`].
pub struct ActorRunner<A: Actor> {
    actor: A,
    name: String,
    receiver: mpsc::Receiver<ActorRequest>,
}

impl<A: Actor> ActorRunner<A> {
    /// Creates a runner and the sender half of its mailbox.
    pub fn new(actor: A, buffer_size: usize) -> (Self, mpsc::Sender<ActorRequest>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let name = actor.name();
        let runner = Self {
            actor,
            name,
            receiver,
        };
        (runner, sender)
    }

    /// Runs the actor until it is stopped or its mailbox closes.
    ///
    /// The outcome of `on_start` is reported on `ready` before any request is served.
    pub async fn run(mut self, ready: oneshot::Sender<Result<(), A::Error>>) {
        let name = self.name.clone();

        if let Err(e) = self.actor.on_start().await {
            // Logged by the caller of `spawn` at the level it needs.
            debug!(actor = %name, error = %e, "Startup failed");
            let _ = ready.send(Err(e));
            return;
        }

        info!(actor = %name, "Actor started");
        if ready.send(Ok(())).is_err() {
            // Nobody is waiting for this actor any more.
            debug!(actor = %name, "Spawner went away before ready");
            self.actor.on_stop().await;
            return;
        }

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ActorRequest::Stop { respond_to } => {
                    debug!(actor = %name, "Stop requested");
                    self.actor.on_stop().await;
                    info!(actor = %name, "Shutdown");
                    let _ = respond_to.send(Ok(()));
                    return;
                }
            }
        }

        self.actor.on_stop().await;
        info!(actor = %name, "Shutdown (all handles dropped)");
    }
}

/// Starts `actor` on its own task and waits until it is ready.
///
/// Returns the actor's own error if `on_start` fails, or a [`FrameworkError`] converted
/// into it if the task dies before reporting (e.g., a panic inside `on_start`).
pub async fn spawn<A: Actor>(actor: A) -> Result<ActorHandle, A::Error> {
    let (runner, sender) = ActorRunner::new(actor, MAILBOX_SIZE);
    let name = runner.name.clone();
    let (ready_tx, ready_rx) = oneshot::channel();

    debug!(actor = %name, "Spawning");
    let task = tokio::spawn(runner.run(ready_tx));

    match ready_rx.await {
        Ok(Ok(())) => Ok(ActorHandle::new(name, sender, task)),
        Ok(Err(e)) => {
            let _ = task.await;
            Err(e)
        }
        Err(_) => {
            let error = match task.await {
                Err(join_error) => FrameworkError::TaskFailed(join_error.to_string()),
                Ok(()) => FrameworkError::ActorDropped,
            };
            warn!(actor = %name, error = %error, "Actor task ended before reporting ready");
            Err(A::Error::from(error))
        }
    }
}
