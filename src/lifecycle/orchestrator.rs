use crate::error::{LoadError, StartupError};
use crate::lifecycle::loader::OptionalComponentLoader;
use crate::lifecycle::shutdown::{ShutdownReport, ShutdownSupervisor};
use crate::lifecycle::signals::ShutdownTrigger;
use crate::lifecycle::state::{RunState, RunStateTracker};
use crate::registry::{SubsystemDescriptor, SubsystemKind, SubsystemRegistry};
use crate::settings::Settings;
use crate::subsystems::{AUDIO, EVENT_LOOP};
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Which frontends ended up running.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontendSummary {
    /// Started frontends, in configured order.
    pub active: Vec<String>,
    /// Frontends left out because a prerequisite was missing, in configured order.
    pub disabled: Vec<String>,
}

/// Result of a run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub frontends: FrontendSummary,
    /// `true` when the trigger fired before startup completed.
    pub interrupted: bool,
    pub shutdown: ShutdownReport,
}

enum Startup {
    Complete,
    Interrupted,
}

/// The main runtime orchestrator.
///
/// `Orchestrator` is responsible for:
/// - **Startup Order**: event loop, audio engine, mixer, one backend, then frontends,
///   each fully ready before the next is attempted
/// - **Fault Policy**: required failures abort the run; frontends with a missing
///   prerequisite are skipped
/// - **Idle & Shutdown**: waiting for the [`ShutdownTrigger`] and stopping everything
///   that was started, on both the graceful and the fatal path
///
/// # Example
///
/// ```ignore
/// let trigger = ShutdownTrigger::new();
/// trigger.listen_for_signals()?;
///
/// let orchestrator = Orchestrator::new(SubsystemRegistry::builtin(), settings, trigger);
/// let summary = orchestrator.run().await?;
/// ```
pub struct Orchestrator {
    registry: SubsystemRegistry,
    settings: Settings,
    trigger: ShutdownTrigger,
    state: RunStateTracker,
}

impl Orchestrator {
    pub fn new(registry: SubsystemRegistry, settings: Settings, trigger: ShutdownTrigger) -> Self {
        Self {
            registry,
            settings,
            trigger,
            state: RunStateTracker::new(),
        }
    }

    /// Observes state transitions of this run.
    pub fn state(&self) -> watch::Receiver<RunState> {
        self.state.subscribe()
    }

    /// Runs startup, idles until the trigger fires, then shuts everything down.
    ///
    /// # Returns
    ///
    /// - `Ok(RunSummary)` after a graceful shutdown, including one triggered mid-startup
    /// - `Err(StartupError)` if the settings are invalid or a subsystem failed fatally;
    ///   whatever had started by then has already been stopped
    pub async fn run(self) -> Result<RunSummary, StartupError> {
        if let Err(e) = self.settings.validate(&self.registry) {
            error!(error = %e, "Invalid settings");
            self.state.advance(RunState::Aborted)?;
            return Err(e.into());
        }

        let mut supervisor = ShutdownSupervisor::new(self.settings.shutdown_timeout());
        let mut frontends = FrontendSummary::default();

        let startup = match self.start_all(&mut supervisor, &mut frontends).await {
            Ok(startup) => startup,
            Err(e) => {
                error!(error = %e, "Startup failed");
                let aborted = self.state.advance(RunState::Aborted);
                // Emergency teardown of whatever did start.
                supervisor.shutdown().await;
                aborted?;
                return Err(e);
            }
        };

        let interrupted = match startup {
            Startup::Complete => {
                self.state.advance(RunState::Idling)?;
                info!(
                    subsystems = supervisor.registry().len(),
                    "Startup complete, waiting for termination signal"
                );
                self.trigger.fired().await;
                false
            }
            Startup::Interrupted => true,
        };

        info!("Exiting...");
        self.state.advance(RunState::ShuttingDown)?;
        let shutdown = supervisor.shutdown().await;
        self.state.advance(RunState::Stopped)?;

        Ok(RunSummary {
            frontends,
            interrupted,
            shutdown,
        })
    }

    async fn start_all(
        &self,
        supervisor: &mut ShutdownSupervisor,
        frontends: &mut FrontendSummary,
    ) -> Result<Startup, StartupError> {
        let required = [
            (SubsystemKind::EventLoop, EVENT_LOOP, RunState::LoopRunning),
            (SubsystemKind::Audio, AUDIO, RunState::AudioReady),
            (SubsystemKind::Mixer, self.settings.mixer.as_str(), RunState::MixerReady),
            (SubsystemKind::Backend, self.settings.backends[0].as_str(), RunState::BackendReady),
        ];

        if self.settings.backends.len() > 1 {
            warn!(
                ignored = ?&self.settings.backends[1..],
                "Only the first backend is used"
            );
        }

        for (kind, name, reached) in required {
            if self.trigger.is_fired() {
                return Ok(Startup::Interrupted);
            }
            let descriptor = SubsystemDescriptor::new(kind, name);
            let handle = self
                .registry
                .start(&descriptor, &self.settings)
                .await
                .map_err(|source| StartupError::RequiredSubsystem {
                    kind,
                    descriptor: descriptor.name.clone(),
                    source,
                })?;
            supervisor.register(handle);
            self.state.advance(reached)?;
        }

        let loader = OptionalComponentLoader::new(&self.registry, &self.settings);
        for name in &self.settings.frontends {
            if self.trigger.is_fired() {
                return Ok(Startup::Interrupted);
            }
            match loader.load(name).await {
                Ok(handle) => {
                    supervisor.register(handle);
                    frontends.active.push(name.clone());
                }
                Err(LoadError::MissingOptionalDependency { descriptor, cause }) => {
                    info!("Disabled: {} ({})", descriptor, cause);
                    frontends.disabled.push(descriptor);
                }
                Err(LoadError::OtherStartupFailure { descriptor, source }) => {
                    return Err(StartupError::Frontend { descriptor, source });
                }
            }
        }
        self.state.advance(RunState::FrontendsReady)?;

        if self.trigger.is_fired() {
            return Ok(Startup::Interrupted);
        }
        Ok(Startup::Complete)
    }
}
