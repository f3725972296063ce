//! # Shutdown Supervisor
//!
//! Owns every handle started during a run and stops them all at the end, whether the
//! run ended gracefully or was aborted halfway through startup.

use actor_framework::ActorHandle;
use std::collections::HashMap;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Handles of everything started during this run, in start order.
#[derive(Debug, Default)]
pub struct StartedRegistry {
    handles: Vec<ActorHandle>,
}

impl StartedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, handle: ActorHandle) {
        self.handles.push(handle);
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Names of the registered subsystems, in start order.
    pub fn names(&self) -> Vec<String> {
        self.handles.iter().map(|h| h.name().to_string()).collect()
    }

    fn drain(&mut self) -> Vec<ActorHandle> {
        std::mem::take(&mut self.handles)
    }
}

/// A subsystem that had to be forced down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForcedStop {
    pub name: String,
    pub reason: String,
}

/// What happened to each handle during shutdown. Both lists follow start order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShutdownReport {
    pub stopped: Vec<String>,
    pub forced: Vec<ForcedStop>,
}

impl ShutdownReport {
    pub fn is_clean(&self) -> bool {
        self.forced.is_empty()
    }

    pub fn total(&self) -> usize {
        self.stopped.len() + self.forced.len()
    }
}

/// Stops every registered subsystem, concurrently and with a bounded wait.
#[derive(Debug)]
pub struct ShutdownSupervisor {
    registry: StartedRegistry,
    grace: Duration,
}

impl ShutdownSupervisor {
    /// `grace` bounds how long each subsystem may take to acknowledge its stop.
    pub fn new(grace: Duration) -> Self {
        Self {
            registry: StartedRegistry::new(),
            grace,
        }
    }

    pub fn register(&mut self, handle: ActorHandle) {
        debug!(subsystem = %handle.name(), "Registered");
        self.registry.push(handle);
    }

    pub fn registry(&self) -> &StartedRegistry {
        &self.registry
    }

    /// Sends stop to every handle and waits for all of them.
    ///
    /// A subsystem that misses the grace period is aborted and listed as forced; the
    /// call itself always completes. Every handle appears in the report exactly once.
    pub async fn shutdown(mut self) -> ShutdownReport {
        let handles = self.registry.drain();
        let grace = self.grace;
        debug!(count = handles.len(), ?grace, "Stopping subsystems");

        let names: Vec<String> = handles.iter().map(|h| h.name().to_string()).collect();
        let mut outcomes: Vec<Option<Result<(), String>>> = vec![None; handles.len()];
        let mut tasks = HashMap::new();

        let mut stops = JoinSet::new();
        for (index, handle) in handles.into_iter().enumerate() {
            let stop = stops.spawn(async move { handle.stop(grace).await });
            tasks.insert(stop.id(), index);
        }

        while let Some(joined) = stops.join_next_with_id().await {
            match joined {
                Ok((id, result)) => {
                    if let Some(&index) = tasks.get(&id) {
                        outcomes[index] = Some(result.map_err(|e| e.to_string()));
                    }
                }
                Err(e) => {
                    if let Some(&index) = tasks.get(&e.id()) {
                        warn!(subsystem = %names[index], error = %e, "Stop task failed");
                        outcomes[index] = Some(Err(format!("stop task failed: {e}")));
                    }
                }
            }
        }

        let report = build_report(names, outcomes);
        debug!(
            stopped = report.stopped.len(),
            forced = report.forced.len(),
            "Shutdown complete"
        );
        report
    }
}

/// Folds per-handle outcomes (in start order) into a report. A missing outcome counts
/// as forced.
fn build_report(names: Vec<String>, outcomes: Vec<Option<Result<(), String>>>) -> ShutdownReport {
    let mut report = ShutdownReport::default();
    for (name, outcome) in names.into_iter().zip(outcomes) {
        match outcome {
            Some(Ok(())) => report.stopped.push(name),
            Some(Err(reason)) => {
                warn!(subsystem = %name, error = %reason, "Subsystem did not stop cleanly");
                report.forced.push(ForcedStop { name, reason });
            }
            None => {
                warn!(subsystem = %name, "No stop outcome");
                report.forced.push(ForcedStop {
                    name,
                    reason: "stop outcome lost".to_string(),
                });
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubsystemError;
    use actor_framework::mock::{MockActor, MockJournal};

    async fn start(name: &str, journal: &MockJournal) -> ActorHandle {
        actor_framework::spawn(MockActor::<SubsystemError>::new(name, journal.clone()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_stops_every_registered_handle() {
        let journal = MockJournal::new();
        let mut supervisor = ShutdownSupervisor::new(Duration::from_secs(1));
        for name in ["event-loop", "audio", "mixer"] {
            supervisor.register(start(name, &journal).await);
        }
        assert_eq!(supervisor.registry().names(), vec!["event-loop", "audio", "mixer"]);

        let report = supervisor.shutdown().await;

        assert!(report.is_clean());
        assert_eq!(report.stopped, vec!["event-loop", "audio", "mixer"]);
        let mut stopped = journal.stopped();
        stopped.sort();
        assert_eq!(stopped, vec!["audio", "event-loop", "mixer"]);
    }

    #[tokio::test]
    async fn test_empty_registry_shuts_down_immediately() {
        let report = ShutdownSupervisor::new(Duration::from_secs(1)).shutdown().await;
        assert_eq!(report.total(), 0);
    }

    #[tokio::test]
    async fn test_unresponsive_subsystem_is_forced_without_blocking_others() {
        let journal = MockJournal::new();
        let mut supervisor = ShutdownSupervisor::new(Duration::from_millis(100));
        supervisor.register(start("audio", &journal).await);
        supervisor.register(
            actor_framework::spawn(
                MockActor::<SubsystemError>::new("stuck", journal.clone()).ignore_stop(),
            )
            .await
            .unwrap(),
        );
        supervisor.register(start("http", &journal).await);

        let report = supervisor.shutdown().await;

        assert_eq!(report.stopped, vec!["audio", "http"]);
        assert_eq!(report.forced.len(), 1);
        assert_eq!(report.forced[0].name, "stuck");
        assert!(!report.is_clean());
    }

    #[test]
    fn test_every_handle_is_accounted_for() {
        let names = vec!["audio".to_string(), "mixer".to_string(), "http".to_string()];
        let outcomes = vec![Some(Ok(())), None, Some(Err("timed out".to_string()))];

        let report = build_report(names, outcomes);

        assert_eq!(report.total(), 3);
        assert_eq!(report.stopped, vec!["audio"]);
        let forced: Vec<&str> = report.forced.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(forced, vec!["mixer", "http"]);
    }
}
