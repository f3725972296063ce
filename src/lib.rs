//! # Chorus
//!
//! Process supervisor of a music server. It starts the server's subsystems (event loop,
//! audio engine, mixer, backend, frontends) as independent actors in a fixed order,
//! tolerates frontends whose prerequisites are missing, idles until it is asked to
//! terminate, and then stops everything it started.
//!
//! ## Module Tour
//!
//! - **[`lifecycle`]**: the [`Orchestrator`](lifecycle::Orchestrator), the optional
//!   component loader, the shutdown supervisor, run state and the termination trigger.
//! - **[`registry`]**: static mapping from configured names to subsystem constructors.
//! - **[`subsystems`]**: the built-in subsystems.
//! - **[`settings`]**: the YAML settings file.
//! - **[`cli`]**: command-line flags.
//! - **[`error`]**: error types for every layer.
//!
//! The actor runtime itself lives in the `actor-framework` crate.
//!
//! ## Running
//!
//! ```bash
//! chorus            # info logs
//! chorus -v         # debug logs
//! chorus --list-settings
//! ```

pub mod cli;
pub mod error;
pub mod lifecycle;
pub mod registry;
pub mod settings;
pub mod subsystems;
