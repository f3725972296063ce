//! # Mock Actors & Testing Guide
//!
//! [`MockActor`] is a scriptable [`Actor`] for tests that care about *when* things are
//! started and stopped rather than what they do. Every mock writes to a shared
//! [`MockJournal`], so a test can assert on the global order of lifecycle events across
//! many actors.
//!
//! ## Scripting
//!
//! | Builder | Effect |
//! |---------|--------|
//! | `MockActor::new(name, journal)` | starts and stops cleanly |
//! | `.fail_with(err)` | `on_start` returns `err` |
//! | `.panic_on_start()` | `on_start` panics (task dies before reporting ready) |
//! | `.ignore_stop()` | `on_stop` never returns (exercises stop timeouts) |
//!
//! ## Example
//!
//! ```rust
//! use actor_framework::mock::{MockActor, MockEvent, MockJournal};
//! use actor_framework::FrameworkError;
//! use std::time::Duration;
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error(transparent)]
//! struct TestError(#[from] FrameworkError);
//!
//! #[tokio::main]
//! async fn main() {
//!     let journal = MockJournal::new();
//!     let actor = MockActor::<TestError>::new("audio", journal.clone());
//!
//!     let handle = actor_framework::spawn(actor).await.unwrap();
//!     handle.stop(Duration::from_secs(1)).await.unwrap();
//!
//!     assert_eq!(
//!         journal.events(),
//!         vec![
//!             MockEvent::Starting("audio".into()),
//!             MockEvent::Started("audio".into()),
//!             MockEvent::Stopped("audio".into()),
//!         ]
//!     );
//! }
//! ```

use crate::actor::Actor;
use crate::error::FrameworkError;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// A lifecycle event recorded by a [`MockActor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockEvent {
    /// `on_start` was entered.
    Starting(String),
    /// `on_start` returned `Ok`.
    Started(String),
    /// `on_start` returned an error.
    StartFailed(String),
    /// `on_stop` finished.
    Stopped(String),
}

/// Shared, ordered record of lifecycle events.
#[derive(Debug, Clone, Default)]
pub struct MockJournal {
    events: Arc<Mutex<Vec<MockEvent>>>,
}

impl MockJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: MockEvent) {
        self.events.lock().unwrap().push(event);
    }

    /// Snapshot of every event so far, in order.
    pub fn events(&self) -> Vec<MockEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Names of actors that started successfully, in start order.
    pub fn started(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                MockEvent::Started(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    /// Names of actors whose start was attempted, in attempt order.
    pub fn attempted(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                MockEvent::Starting(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    /// Names of actors that stopped, in completion order.
    pub fn stopped(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                MockEvent::Stopped(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    /// Index of the first occurrence of `event`.
    pub fn position(&self, event: &MockEvent) -> Option<usize> {
        self.events().iter().position(|e| e == event)
    }
}

/// A scriptable actor that records its lifecycle in a [`MockJournal`].
pub struct MockActor<E> {
    name: String,
    journal: MockJournal,
    failure: Option<E>,
    panic_on_start: bool,
    ignore_stop: bool,
}

impl<E> MockActor<E> {
    pub fn new(name: impl Into<String>, journal: MockJournal) -> Self {
        Self {
            name: name.into(),
            journal,
            failure: None,
            panic_on_start: false,
            ignore_stop: false,
        }
    }

    /// Makes `on_start` return `error`.
    pub fn fail_with(mut self, error: E) -> Self {
        self.failure = Some(error);
        self
    }

    /// Makes `on_start` panic.
    pub fn panic_on_start(mut self) -> Self {
        self.panic_on_start = true;
        self
    }

    /// Makes `on_stop` hang forever.
    pub fn ignore_stop(mut self) -> Self {
        self.ignore_stop = true;
        self
    }
}

#[async_trait]
impl<E> Actor for MockActor<E>
where
    E: std::error::Error + From<FrameworkError> + Send + Sync + 'static,
{
    type Error = E;

    fn name(&self) -> String {
        self.name.clone()
    }

    async fn on_start(&mut self) -> Result<(), E> {
        self.journal.record(MockEvent::Starting(self.name.clone()));
        if self.panic_on_start {
            panic!("mock actor '{}' panicked during startup", self.name);
        }
        if let Some(error) = self.failure.take() {
            self.journal.record(MockEvent::StartFailed(self.name.clone()));
            return Err(error);
        }
        self.journal.record(MockEvent::Started(self.name.clone()));
        Ok(())
    }

    async fn on_stop(&mut self) {
        if self.ignore_stop {
            std::future::pending::<()>().await;
        }
        self.journal.record(MockEvent::Stopped(self.name.clone()));
    }
}
