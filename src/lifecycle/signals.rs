//! # Termination Trigger
//!
//! [`ShutdownTrigger`] is the one-shot signal that ends the idle phase. It is fired by
//! the OS signal listener or programmatically, and can be awaited or polled any number
//! of times.
//!
//! ## Signals
//! **Unix:** `SIGINT`, `SIGTERM`, `SIGQUIT`.
//! **Windows:** Ctrl-C.
//!
//! Handlers are installed synchronously by [`ShutdownSignals::register`].

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Cloneable, fire-once termination signal.
#[derive(Debug, Clone)]
pub struct ShutdownTrigger {
    sender: Arc<watch::Sender<bool>>,
}

impl ShutdownTrigger {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Fires the trigger. Firing again has no further effect.
    pub fn fire(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_fired(&self) -> bool {
        *self.sender.borrow()
    }

    /// Completes once the trigger has fired (immediately if it already has).
    pub async fn fired(&self) {
        let mut receiver = self.sender.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = receiver.wait_for(|fired| *fired).await;
    }

    /// Fires the trigger when the process receives a termination signal.
    ///
    /// The handlers are registered before this returns, so a signal arriving at any point
    /// afterwards (even before the listener task first runs) fires the trigger instead of
    /// killing the process. Call this before startup begins.
    pub fn listen_for_signals(&self) -> std::io::Result<JoinHandle<()>> {
        let mut signals = ShutdownSignals::register()?;
        let trigger = self.clone();
        Ok(tokio::spawn(async move {
            signals.recv().await;
            debug!("Termination signal received");
            trigger.fire();
        }))
    }
}

impl Default for ShutdownTrigger {
    fn default() -> Self {
        Self::new()
    }
}

/// Registered termination signal handlers.
#[cfg(unix)]
pub struct ShutdownSignals {
    sigint: tokio::signal::unix::Signal,
    sigterm: tokio::signal::unix::Signal,
    sigquit: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl ShutdownSignals {
    /// Installs the handlers. Must be called inside a Tokio runtime.
    pub fn register() -> std::io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            sigint: signal(SignalKind::interrupt())?,
            sigterm: signal(SignalKind::terminate())?,
            sigquit: signal(SignalKind::quit())?,
        })
    }

    /// Waits for the next termination signal.
    pub async fn recv(&mut self) {
        tokio::select! {
            _ = self.sigint.recv() => {},
            _ = self.sigterm.recv() => {},
            _ = self.sigquit.recv() => {},
        }
    }
}

/// Registered termination signal handlers.
#[cfg(windows)]
pub struct ShutdownSignals {
    ctrl_c: tokio::signal::windows::CtrlC,
}

#[cfg(windows)]
impl ShutdownSignals {
    /// Installs the handler. Must be called inside a Tokio runtime.
    pub fn register() -> std::io::Result<Self> {
        Ok(Self {
            ctrl_c: tokio::signal::windows::ctrl_c()?,
        })
    }

    /// Waits for the next Ctrl-C.
    pub async fn recv(&mut self) {
        self.ctrl_c.recv().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_fired_completes_after_fire() {
        let trigger = ShutdownTrigger::new();
        let waiter = {
            let trigger = trigger.clone();
            tokio::spawn(async move { trigger.fired().await })
        };

        assert!(!trigger.is_fired());
        trigger.fire();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should finish")
            .unwrap();
        assert!(trigger.is_fired());
    }

    #[tokio::test]
    async fn test_fired_returns_immediately_when_already_fired() {
        let trigger = ShutdownTrigger::new();
        trigger.fire();
        trigger.fire();
        tokio::time::timeout(Duration::from_millis(100), trigger.fired())
            .await
            .expect("already fired");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_signal_raised_right_after_listening_fires_trigger() {
        let trigger = ShutdownTrigger::new();
        let listener = trigger.listen_for_signals().unwrap();

        // Raised before the listener task has had a chance to run.
        let status = std::process::Command::new("kill")
            .args(["-TERM", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());

        tokio::time::timeout(Duration::from_secs(5), trigger.fired())
            .await
            .expect("trigger should fire");
        listener.await.unwrap();
    }
}
