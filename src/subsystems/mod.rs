//! # Built-in Subsystems
//!
//! Each subsystem is an [`Actor`](actor_framework::Actor) that the orchestrator starts
//! through the [`SubsystemRegistry`]. What they do once running is deliberately small;
//! the interesting part is how they start and stop.
//!
//! | kind | descriptors |
//! |------|-------------|
//! | event loop | `event-loop` |
//! | audio engine | `audio` |
//! | mixer | `software`, `dummy` |
//! | backend | `local`, `dummy` |
//! | frontend | `http`, `mpris` |

pub mod audio;
pub mod backend;
pub mod event_loop;
pub mod frontend;
pub mod mixer;

use crate::registry::{BoxedSubsystem, SubsystemKind, SubsystemRegistry};

/// Fixed descriptor of the event-loop host.
pub const EVENT_LOOP: &str = "event-loop";
/// Fixed descriptor of the audio engine.
pub const AUDIO: &str = "audio";

/// Adds every built-in subsystem to `registry`.
pub fn register_builtins(registry: &mut SubsystemRegistry) {
    registry
        .register(SubsystemKind::EventLoop, EVENT_LOOP, |_| {
            Ok(BoxedSubsystem::new(event_loop::EventLoopHost::new()))
        })
        .register(SubsystemKind::Audio, AUDIO, |settings| {
            Ok(BoxedSubsystem::new(audio::AudioEngine::new(&settings.audio.output)))
        })
        .register(SubsystemKind::Mixer, "software", |_| {
            Ok(BoxedSubsystem::new(mixer::SoftwareMixer::new()))
        })
        .register(SubsystemKind::Mixer, "dummy", |_| {
            Ok(BoxedSubsystem::new(mixer::DummyMixer))
        })
        .register(SubsystemKind::Backend, "local", |settings| {
            Ok(BoxedSubsystem::new(backend::LocalBackend::new(settings.local.media_dir.clone())))
        })
        .register(SubsystemKind::Backend, "dummy", |_| {
            Ok(BoxedSubsystem::new(backend::DummyBackend))
        })
        .register(SubsystemKind::Frontend, "http", |settings| {
            Ok(BoxedSubsystem::new(frontend::http::HttpFrontend::new(
                settings.http.hostname.clone(),
                settings.http.port,
            )))
        })
        .register(SubsystemKind::Frontend, "mpris", |settings| {
            Ok(BoxedSubsystem::new(frontend::mpris::MprisFrontend::from_settings(&settings.mpris)))
        });
}
