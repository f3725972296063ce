//! # Subsystem Registry
//!
//! Static mapping from configuration descriptors (plain names such as `"software"` or
//! `"http"`) to constructors. Resolving a descriptor is a map lookup; an unknown name is
//! a configuration problem, reported by [`Settings::validate`](crate::settings::Settings::validate)
//! before anything starts.

use crate::error::SubsystemError;
use crate::settings::Settings;
use actor_framework::{ActorHandle, BoxedActor};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// A subsystem behind a trait object, ready to be spawned.
pub type BoxedSubsystem = BoxedActor<SubsystemError>;

type Constructor = Box<dyn Fn(&Settings) -> Result<BoxedSubsystem, SubsystemError> + Send + Sync>;

/// The role a subsystem plays in the startup sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SubsystemKind {
    EventLoop,
    Audio,
    Mixer,
    Backend,
    Frontend,
}

impl SubsystemKind {
    /// Required subsystems abort the run when they fail; frontends may be left out.
    pub fn is_required(self) -> bool {
        !matches!(self, SubsystemKind::Frontend)
    }
}

impl fmt::Display for SubsystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubsystemKind::EventLoop => "event loop",
            SubsystemKind::Audio => "audio engine",
            SubsystemKind::Mixer => "mixer",
            SubsystemKind::Backend => "backend",
            SubsystemKind::Frontend => "frontend",
        };
        f.write_str(name)
    }
}

/// A name to resolve, tagged with its role.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubsystemDescriptor {
    pub kind: SubsystemKind,
    pub name: String,
}

impl SubsystemDescriptor {
    pub fn new(kind: SubsystemKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn is_required(&self) -> bool {
        self.kind.is_required()
    }
}

impl fmt::Display for SubsystemDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Resolves descriptors to constructors and starts the resulting subsystems.
#[derive(Default)]
pub struct SubsystemRegistry {
    factories: HashMap<SubsystemDescriptor, Constructor>,
}

impl SubsystemRegistry {
    /// An empty registry. Tests fill it with mock subsystems.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in subsystem.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        crate::subsystems::register_builtins(&mut registry);
        registry
    }

    /// Registers `constructor` under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, kind: SubsystemKind, name: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn(&Settings) -> Result<BoxedSubsystem, SubsystemError> + Send + Sync + 'static,
    {
        self.factories
            .insert(SubsystemDescriptor::new(kind, name), Box::new(constructor));
        self
    }

    pub fn contains(&self, descriptor: &SubsystemDescriptor) -> bool {
        self.factories.contains_key(descriptor)
    }

    /// Registered names for `kind`, sorted.
    pub fn names(&self, kind: SubsystemKind) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .factories
            .keys()
            .filter(|d| d.kind == kind)
            .map(|d| d.name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Constructs the subsystem named by `descriptor` without starting it.
    pub fn construct(
        &self,
        descriptor: &SubsystemDescriptor,
        settings: &Settings,
    ) -> Result<BoxedSubsystem, SubsystemError> {
        let constructor = self
            .factories
            .get(descriptor)
            .ok_or_else(|| SubsystemError::Unknown {
                kind: descriptor.kind,
                descriptor: descriptor.name.clone(),
            })?;
        constructor(settings)
    }

    /// Constructs the subsystem named by `descriptor` and waits until it is ready.
    pub async fn start(
        &self,
        descriptor: &SubsystemDescriptor,
        settings: &Settings,
    ) -> Result<ActorHandle, SubsystemError> {
        let subsystem = self.construct(descriptor, settings)?;
        debug!(kind = %descriptor.kind, subsystem = %descriptor, "Starting");
        actor_framework::spawn(subsystem).await
    }
}
