//! Frontends: optional subsystems that expose the server to clients.
//!
//! A frontend whose prerequisites are absent reports
//! [`SubsystemError::MissingDependency`](crate::error::SubsystemError::MissingDependency)
//! and is left out of the run; any other startup error is fatal.

pub mod http;
pub mod mpris;
