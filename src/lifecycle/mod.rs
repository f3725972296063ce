//! # Process Lifecycle & Orchestration
//!
//! This module brings the subsystems up in dependency order, keeps the process idle
//! while they run, and takes everything down again.
//!
//! ## The Orchestration Pattern
//!
//! Individual subsystems are simple actors. The interesting part is the order in which
//! they start and what happens when one of them cannot:
//!
//! 1. **Event loop** - always first, no descriptor needed
//! 2. **Audio engine** - fixed descriptor
//! 3. **Mixer** - from `settings.mixer`
//! 4. **Backend** - the first entry of `settings.backends`, and only that one
//! 5. **Frontends** - every entry of `settings.frontends`, in order, through the
//!    [`OptionalComponentLoader`]
//! 6. **Idle** - until the [`ShutdownTrigger`] fires
//! 7. **Shutdown** - the [`ShutdownSupervisor`] stops every started handle
//!
//! Each step waits for the previous subsystem to report ready. A failure in steps 1-4,
//! or a frontend failure other than a missing prerequisite, aborts the run; the handles
//! started so far are still stopped.
//!
//! ## Run State
//!
//! Progress is tracked as a [`RunState`] that only moves forward and can be observed
//! through [`Orchestrator::state`].
//!
//! ## Termination
//!
//! The trigger is checked between startup steps, so a signal that arrives during
//! startup stops the sequence early and leads to a normal shutdown of what is running.

pub mod loader;
pub mod orchestrator;
pub mod shutdown;
pub mod signals;
pub mod state;

pub use loader::OptionalComponentLoader;
pub use orchestrator::{FrontendSummary, Orchestrator, RunSummary};
pub use shutdown::{ForcedStop, ShutdownReport, ShutdownSupervisor, StartedRegistry};
pub use signals::{ShutdownSignals, ShutdownTrigger};
pub use state::{RunState, RunStateTracker, StateError};
