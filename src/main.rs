//! # Chorus
//!
//! Entry point of the music server supervisor.
//!
//! 1. Parse flags and set up logging
//! 2. Make sure the settings directory and file exist, then load them
//! 3. Install the termination signal listener
//! 4. Hand over to the [`Orchestrator`], which starts every subsystem, idles until a
//!    termination signal arrives, and stops everything again
//!
//! Exit codes: `0` after a graceful shutdown, `1` when a subsystem failed fatally,
//! `2` for invalid settings.

use actor_framework::tracing::setup_tracing;
use chorus::cli::{self, DEBUG_LOG_FILE};
use chorus::error::ConfigError;
use chorus::lifecycle::{Orchestrator, ShutdownTrigger};
use chorus::registry::SubsystemRegistry;
use chorus::settings::{Settings, SettingsPaths};
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info, warn};

const CONFIG_EXIT: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse_args();

    if args.list_settings {
        return match list_settings() {
            Ok(rendered) => {
                print!("{rendered}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{e}");
                ExitCode::from(CONFIG_EXIT)
            }
        };
    }

    let debug_log = args.save_debug_log.then(|| Path::new(DEBUG_LOG_FILE));
    if let Err(e) = setup_tracing(args.verbosity(), debug_log) {
        // Console logging is installed regardless.
        warn!(path = DEBUG_LOG_FILE, error = %e, "Cannot open debug log");
    }

    info!(version = env!("CARGO_PKG_VERSION"), "Starting Chorus");

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Cannot load settings");
            return ExitCode::from(CONFIG_EXIT);
        }
    };

    // Installed before startup so a signal during startup is not lost
    let trigger = ShutdownTrigger::new();
    if let Err(e) = trigger.listen_for_signals() {
        warn!(error = %e, "Cannot listen for termination signals");
    }

    let orchestrator = Orchestrator::new(SubsystemRegistry::builtin(), settings, trigger);
    match orchestrator.run().await {
        Ok(summary) => {
            if !summary.shutdown.is_clean() {
                warn!(forced = summary.shutdown.forced.len(), "Some subsystems were forced down");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Chorus stopped");
            ExitCode::from(e.exit_code())
        }
    }
}

/// Effective settings as YAML, without creating anything on disk.
fn list_settings() -> Result<String, ConfigError> {
    let paths = SettingsPaths::resolve()?;
    Settings::load_if_exists(&paths.file)?.render()
}

fn load_settings() -> Result<Settings, ConfigError> {
    let paths = SettingsPaths::resolve()?;
    paths.ensure_exists()?;
    Settings::load(&paths.file)
}
