//! Event-loop host: a dedicated OS thread that the rest of the process can rely on being
//! alive before anything else starts.

use crate::error::SubsystemError;
use actor_framework::Actor;
use async_trait::async_trait;
use std::sync::mpsc as std_mpsc;
use std::thread::{self, JoinHandle};
use tokio::sync::oneshot;
use tracing::{debug, warn};

pub const THREAD_NAME: &str = "chorus-event-loop";

/// Owns the event-loop thread. The thread parks on a quit channel until stopped.
pub struct EventLoopHost {
    quit: Option<std_mpsc::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl EventLoopHost {
    pub fn new() -> Self {
        Self {
            quit: None,
            thread: None,
        }
    }
}

impl Default for EventLoopHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Actor for EventLoopHost {
    type Error = SubsystemError;

    fn name(&self) -> String {
        super::EVENT_LOOP.to_string()
    }

    async fn on_start(&mut self) -> Result<(), SubsystemError> {
        let (quit_tx, quit_rx) = std_mpsc::channel::<()>();
        let (ready_tx, ready_rx) = oneshot::channel();

        let thread = thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || {
                let _ = ready_tx.send(());
                // Blocks until a quit message arrives or the sender is dropped.
                let _ = quit_rx.recv();
                debug!("Event loop thread exiting");
            })
            .map_err(|e| SubsystemError::Failed(format!("cannot spawn event loop thread: {e}")))?;

        ready_rx
            .await
            .map_err(|_| SubsystemError::Failed("event loop thread died during startup".into()))?;

        self.quit = Some(quit_tx);
        self.thread = Some(thread);
        Ok(())
    }

    async fn on_stop(&mut self) {
        if let Some(quit) = self.quit.take() {
            let _ = quit.send(());
        }
        if let Some(thread) = self.thread.take() {
            match tokio::task::spawn_blocking(move || thread.join()).await {
                Ok(Ok(())) => {}
                Ok(Err(_)) => warn!("Event loop thread panicked"),
                Err(e) => warn!(error = %e, "Failed to join event loop thread"),
            }
        }
    }
}
