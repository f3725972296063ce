//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide `tracing` subscriber.
//!
//! ## Layers
//!
//! - **Console** - compact format without module paths (`with_target(false)`), filtered
//!   at the level chosen on the command line. `RUST_LOG` takes precedence when set.
//! - **Debug log file** (optional) - every record at `DEBUG` or above, appended to the
//!   given file without ANSI colours.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: `Actor started`, `Startup failed`, `Shutdown`, stop timeouts
//! - **Orchestration**: each startup step, disabled optional subsystems, shutdown
//!
//! ```bash
//! # Default console level is info
//! chorus
//!
//! # Override per module
//! RUST_LOG=chorus::lifecycle=debug chorus
//! ```

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Initializes logging for the whole process.
///
/// `console_level` applies to stderr unless `RUST_LOG` is set. When `debug_log` is given
/// the file is created if needed and appended to. If it cannot be opened, the console
/// layer is still installed and the open error is returned. Calling this more than once
/// is harmless; only the first subscriber is installed.
pub fn setup_tracing(console_level: LevelFilter, debug_log: Option<&Path>) -> std::io::Result<()> {
    let console_filter = EnvFilter::builder()
        .with_default_directive(console_level.into())
        .from_env_lossy();
    let console = fmt::layer()
        .with_target(false) // Don't show module paths - we log the actor name instead
        .with_writer(std::io::stderr)
        .compact()
        .with_filter(console_filter);

    let opened = debug_log
        .map(|path| OpenOptions::new().create(true).append(true).open(path))
        .transpose();
    let (file, result) = match opened {
        Ok(file) => (file, Ok(())),
        Err(e) => (None, Err(e)),
    };
    let file = file.map(|file| {
        fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .with_filter(LevelFilter::DEBUG)
    });

    let _ = tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init();
    result
}
