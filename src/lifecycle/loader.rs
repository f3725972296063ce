//! Loader for subsystems that may legitimately be unavailable.

use crate::error::{LoadError, SubsystemError};
use crate::registry::{SubsystemDescriptor, SubsystemKind, SubsystemRegistry};
use crate::settings::Settings;
use actor_framework::ActorHandle;

/// Starts optional subsystems, separating "prerequisite absent" from real failures.
pub struct OptionalComponentLoader<'a> {
    registry: &'a SubsystemRegistry,
    settings: &'a Settings,
}

impl<'a> OptionalComponentLoader<'a> {
    pub fn new(registry: &'a SubsystemRegistry, settings: &'a Settings) -> Self {
        Self { registry, settings }
    }

    /// Starts the frontend named `descriptor`.
    ///
    /// Returns [`LoadError::MissingOptionalDependency`] when the frontend reports a missing
    /// prerequisite, and [`LoadError::OtherStartupFailure`] for anything else, including
    /// an unknown descriptor.
    pub async fn load(&self, descriptor: &str) -> Result<ActorHandle, LoadError> {
        let descriptor = SubsystemDescriptor::new(SubsystemKind::Frontend, descriptor);
        self.registry
            .start(&descriptor, self.settings)
            .await
            .map_err(|error| match error {
                SubsystemError::MissingDependency(cause) => LoadError::MissingOptionalDependency {
                    descriptor: descriptor.name.clone(),
                    cause,
                },
                source => LoadError::OtherStartupFailure {
                    descriptor: descriptor.name.clone(),
                    source,
                },
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::BoxedSubsystem;
    use actor_framework::mock::{MockActor, MockJournal};
    use std::time::Duration;

    fn registry(journal: &MockJournal) -> SubsystemRegistry {
        let mut registry = SubsystemRegistry::new();
        let j = journal.clone();
        registry.register(SubsystemKind::Frontend, "http", move |_| {
            Ok(BoxedSubsystem::new(MockActor::<SubsystemError>::new("http", j.clone())))
        });
        let j = journal.clone();
        registry.register(SubsystemKind::Frontend, "mpris", move |_| {
            Ok(BoxedSubsystem::new(
                MockActor::new("mpris", j.clone())
                    .fail_with(SubsystemError::MissingDependency("no session bus".into())),
            ))
        });
        let j = journal.clone();
        registry.register(SubsystemKind::Frontend, "broken", move |_| {
            Ok(BoxedSubsystem::new(
                MockActor::new("broken", j.clone())
                    .fail_with(SubsystemError::Failed("port in use".into())),
            ))
        });
        registry
    }

    #[tokio::test]
    async fn test_load_success() {
        let journal = MockJournal::new();
        let registry = registry(&journal);
        let settings = Settings::default();
        let loader = OptionalComponentLoader::new(&registry, &settings);

        let handle = loader.load("http").await.unwrap();

        assert_eq!(handle.name(), "http");
        handle.stop(Duration::from_secs(1)).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_dependency_is_distinguished() {
        let journal = MockJournal::new();
        let registry = registry(&journal);
        let settings = Settings::default();
        let loader = OptionalComponentLoader::new(&registry, &settings);

        match loader.load("mpris").await {
            Err(LoadError::MissingOptionalDependency { descriptor, cause }) => {
                assert_eq!(descriptor, "mpris");
                assert_eq!(cause, "no session bus");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_other_failures_are_not_tolerated() {
        let journal = MockJournal::new();
        let registry = registry(&journal);
        let settings = Settings::default();
        let loader = OptionalComponentLoader::new(&registry, &settings);

        assert!(matches!(
            loader.load("broken").await,
            Err(LoadError::OtherStartupFailure {
                source: SubsystemError::Failed(_),
                ..
            })
        ));
        assert!(matches!(
            loader.load("telnet").await,
            Err(LoadError::OtherStartupFailure {
                source: SubsystemError::Unknown { .. },
                ..
            })
        ));
    }
}
