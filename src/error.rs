//! Error types for settings, subsystem startup and the run as a whole.

use crate::lifecycle::StateError;
use crate::registry::SubsystemKind;
use actor_framework::FrameworkError;
use std::path::PathBuf;
use thiserror::Error;

/// Invalid or unreadable settings. Always detected before any subsystem starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot determine settings directory: neither CHORUS_HOME nor HOME is set")]
    NoHomeDirectory,

    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to render settings: {0}")]
    Render(#[source] serde_yaml::Error),

    #[error("backends must list at least one backend")]
    NoBackends,

    #[error("Unknown {kind} '{descriptor}' (known: {known})")]
    UnknownDescriptor {
        kind: SubsystemKind,
        descriptor: String,
        known: String,
    },

    #[error("Invalid value for {setting}: {reason}")]
    InvalidValue {
        setting: &'static str,
        reason: String,
    },
}

/// Why a single subsystem could not start.
#[derive(Debug, Error)]
pub enum SubsystemError {
    /// A prerequisite of the subsystem is absent. Only tolerated for frontends.
    #[error("{0}")]
    MissingDependency(String),

    #[error("{0}")]
    Failed(String),

    #[error("No {kind} registered as '{descriptor}'")]
    Unknown {
        kind: SubsystemKind,
        descriptor: String,
    },

    #[error(transparent)]
    Framework(#[from] FrameworkError),
}

/// Outcome of loading one optional subsystem.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Optional dependency missing for '{descriptor}': {cause}")]
    MissingOptionalDependency { descriptor: String, cause: String },

    #[error("Failed to start '{descriptor}': {source}")]
    OtherStartupFailure {
        descriptor: String,
        #[source]
        source: SubsystemError,
    },
}

/// Any failure that ends a run before it reaches the idle phase.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Required {kind} '{descriptor}' failed to start: {source}")]
    RequiredSubsystem {
        kind: SubsystemKind,
        descriptor: String,
        #[source]
        source: SubsystemError,
    },

    #[error("Frontend '{descriptor}' failed to start: {source}")]
    Frontend {
        descriptor: String,
        #[source]
        source: SubsystemError,
    },

    #[error(transparent)]
    State(#[from] StateError),
}

impl StartupError {
    /// Process exit code for this failure: 2 for configuration errors, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            StartupError::Configuration(_) => 2,
            _ => 1,
        }
    }
}
