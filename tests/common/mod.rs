#![allow(dead_code)]

use actor_framework::mock::{MockActor, MockJournal};
use chorus::error::{StartupError, SubsystemError};
use chorus::lifecycle::{Orchestrator, RunState, RunSummary, ShutdownTrigger};
use chorus::registry::{BoxedSubsystem, SubsystemKind, SubsystemRegistry};
use chorus::settings::Settings;
use chorus::subsystems::{AUDIO, EVENT_LOOP};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::subscriber::DefaultGuard;

/// How a mock subsystem behaves when started.
#[derive(Debug, Clone, Copy)]
pub enum Behaviour {
    Ready,
    MissingDependency(&'static str),
    Fails(&'static str),
    IgnoresStop,
}

/// Registers a mock subsystem that records into `journal` under `name`.
pub fn register(
    registry: &mut SubsystemRegistry,
    journal: &MockJournal,
    kind: SubsystemKind,
    name: &'static str,
    behaviour: Behaviour,
) {
    let journal = journal.clone();
    registry.register(kind, name, move |_| {
        let actor = MockActor::<SubsystemError>::new(name, journal.clone());
        let actor = match behaviour {
            Behaviour::Ready => actor,
            Behaviour::MissingDependency(cause) => {
                actor.fail_with(SubsystemError::MissingDependency(cause.to_string()))
            }
            Behaviour::Fails(reason) => actor.fail_with(SubsystemError::Failed(reason.to_string())),
            Behaviour::IgnoresStop => actor.ignore_stop(),
        };
        Ok(BoxedSubsystem::new(actor))
    });
}

/// Registry of well-behaved mocks: the fixed subsystems, mixer "software", backends
/// "musicd" and "local", frontend "http", and frontend "mpris" without a session bus.
pub fn mock_registry(journal: &MockJournal) -> SubsystemRegistry {
    let mut registry = SubsystemRegistry::new();
    register(&mut registry, journal, SubsystemKind::EventLoop, EVENT_LOOP, Behaviour::Ready);
    register(&mut registry, journal, SubsystemKind::Audio, AUDIO, Behaviour::Ready);
    register(&mut registry, journal, SubsystemKind::Mixer, "software", Behaviour::Ready);
    register(&mut registry, journal, SubsystemKind::Backend, "musicd", Behaviour::Ready);
    register(&mut registry, journal, SubsystemKind::Backend, "local", Behaviour::Ready);
    register(&mut registry, journal, SubsystemKind::Frontend, "http", Behaviour::Ready);
    register(
        &mut registry,
        journal,
        SubsystemKind::Frontend,
        "mpris",
        Behaviour::MissingDependency("no session bus"),
    );
    registry
}

pub fn settings(backends: &[&str], frontends: &[&str]) -> Settings {
    Settings {
        backends: backends.iter().map(|b| b.to_string()).collect(),
        frontends: frontends.iter().map(|f| f.to_string()).collect(),
        shutdown_timeout_secs: 1,
        ..Settings::default()
    }
}

/// Runs the orchestrator and fires the trigger as soon as it idles (or ends early).
pub async fn run_until_idle(
    registry: SubsystemRegistry,
    settings: Settings,
) -> (Result<RunSummary, StartupError>, RunState) {
    let trigger = ShutdownTrigger::new();
    let orchestrator = Orchestrator::new(registry, settings, trigger.clone());
    let mut state = orchestrator.state();

    let run = tokio::spawn(orchestrator.run());
    let _ = state
        .wait_for(|s| *s == RunState::Idling || s.is_terminal())
        .await;
    trigger.fire();

    let result = tokio::time::timeout(Duration::from_secs(10), run)
        .await
        .expect("run should finish")
        .expect("run task panicked");
    let last = *state.borrow();
    (result, last)
}

/// In-memory log sink for asserting on emitted log lines.
#[derive(Debug, Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    /// Installs a subscriber writing INFO and above into a fresh buffer for the
    /// current thread.
    pub fn capture() -> (Self, DefaultGuard) {
        let buffer = Self::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (buffer, guard)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    pub fn count(&self, needle: &str) -> usize {
        self.contents().matches(needle).count()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
