//! # Actor Handle
//!
//! This module defines [`ActorHandle`], the only reference the rest of the program ever
//! holds to a running actor.

use crate::error::FrameworkError;
use crate::message::ActorRequest;
use std::fmt;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// ## ActorHandle
///
/// A capability-restricted reference to a started actor. It carries the actor's name for
/// logging and supports exactly one operation: [`stop`](ActorHandle::stop).
///
/// * **Exclusive** - the handle is not `Clone`; whoever holds it owns the right to stop
///   the actor.
/// * **Opaque** - no access to the actor's state, only the mailbox.
/// * **Dropping** - dropping the last handle closes the mailbox, which also stops the
///   actor (without an acknowledgement).
pub struct ActorHandle {
    name: String,
    sender: mpsc::Sender<ActorRequest>,
    task: JoinHandle<()>,
}

impl ActorHandle {
    pub(crate) fn new(name: String, sender: mpsc::Sender<ActorRequest>, task: JoinHandle<()>) -> Self {
        Self { name, sender, task }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Asks the actor to stop and waits for it to finish.
    ///
    /// The wait (acknowledgement plus task exit) is bounded by `grace`. When the grace
    /// period elapses the task is aborted and [`FrameworkError::StopTimedOut`] is returned.
    pub async fn stop(self, grace: Duration) -> Result<(), FrameworkError> {
        let Self {
            name,
            sender,
            mut task,
        } = self;

        let (respond_to, response) = oneshot::channel();
        if sender.send(ActorRequest::Stop { respond_to }).await.is_err() {
            debug!(actor = %name, "Mailbox already closed");
            return match task.await {
                Err(e) => Err(FrameworkError::TaskFailed(e.to_string())),
                Ok(()) => Err(FrameworkError::ActorClosed),
            };
        }

        let acknowledged = async {
            let ack = response.await;
            match (&mut task).await {
                Err(e) => Err(FrameworkError::TaskFailed(e.to_string())),
                Ok(()) => ack.unwrap_or_else(|_| Err(FrameworkError::ActorDropped)),
            }
        };

        let outcome = tokio::time::timeout(grace, acknowledged).await;
        match outcome {
            Ok(result) => result,
            Err(_) => {
                warn!(actor = %name, ?grace, "Stop timed out, aborting task");
                task.abort();
                Err(FrameworkError::StopTimedOut { actor: name, grace })
            }
        }
    }
}

impl fmt::Debug for ActorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorHandle").field("name", &self.name).finish()
    }
}
