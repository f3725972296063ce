//! # Settings
//!
//! User settings live in `~/.chorus/settings.yaml` (or `$CHORUS_HOME/settings.yaml`).
//! Every field has a default, so an empty file is a valid configuration:
//!
//! ```yaml
//! mixer: software
//! backends: [local]
//! frontends: [mpris, http]
//! audio:
//!   output: default
//! http:
//!   hostname: 127.0.0.1
//!   port: 6680
//! shutdown_timeout_secs: 10
//! ```

use crate::error::ConfigError;
use crate::registry::{SubsystemDescriptor, SubsystemKind, SubsystemRegistry};
use crate::subsystems::{AUDIO, EVENT_LOOP};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable that overrides the settings directory.
pub const HOME_ENV: &str = "CHORUS_HOME";
/// Settings directory name under `$HOME`.
pub const SETTINGS_DIR: &str = ".chorus";
pub const SETTINGS_FILE: &str = "settings.yaml";

/// Where the settings directory and file live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPaths {
    pub dir: PathBuf,
    pub file: PathBuf,
}

impl SettingsPaths {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let file = dir.join(SETTINGS_FILE);
        Self { dir, file }
    }

    /// `$CHORUS_HOME` if set, otherwise `$HOME/.chorus`.
    pub fn resolve() -> Result<Self, ConfigError> {
        if let Some(dir) = env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::in_dir(dir));
        }
        let home = env::var_os("HOME")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::NoHomeDirectory)?;
        Ok(Self::in_dir(Path::new(&home).join(SETTINGS_DIR)))
    }

    /// Creates the settings directory and an empty settings file if they are missing.
    /// Existing files are left untouched.
    pub fn ensure_exists(&self) -> Result<(), ConfigError> {
        if !self.dir.is_dir() {
            info!(path = %self.dir.display(), "Creating settings directory");
        }
        fs::create_dir_all(&self.dir).map_err(|source| ConfigError::Io {
            path: self.dir.clone(),
            source,
        })?;

        if !self.file.exists() {
            info!(path = %self.file.display(), "Creating settings file");
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file)
            .map(|_| ())
            .map_err(|source| ConfigError::Io {
                path: self.file.clone(),
                source,
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AudioSettings {
    /// Name of the audio output device.
    pub output: String,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            output: "default".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpSettings {
    pub hostname: String,
    pub port: u16,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            hostname: "127.0.0.1".to_string(),
            port: 6680,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MprisSettings {
    /// Session bus address; falls back to `DBUS_SESSION_BUS_ADDRESS`.
    pub bus_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocalSettings {
    /// Music library root. Must exist when set.
    pub media_dir: Option<PathBuf>,
}

/// Complete process settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub mixer: String,
    /// Only the first entry is started.
    pub backends: Vec<String>,
    /// Started in order; entries with unmet prerequisites are skipped.
    pub frontends: Vec<String>,
    pub audio: AudioSettings,
    pub http: HttpSettings,
    pub mpris: MprisSettings,
    pub local: LocalSettings,
    /// Upper bound on how long each subsystem may take to stop.
    pub shutdown_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mixer: "software".to_string(),
            backends: vec!["local".to_string()],
            frontends: vec!["mpris".to_string(), "http".to_string()],
            audio: AudioSettings::default(),
            http: HttpSettings::default(),
            mpris: MprisSettings::default(),
            local: LocalSettings::default(),
            shutdown_timeout_secs: 10,
        }
    }
}

impl Settings {
    /// Parses settings from YAML. Blank input yields the defaults.
    pub fn from_yaml(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Reads and parses the settings file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_yaml(&content, path)?;
        debug!(path = %path.display(), "Settings loaded");
        Ok(settings)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults and nothing is
    /// created.
    pub fn load_if_exists(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Checks everything that can be checked without starting a subsystem.
    pub fn validate(&self, registry: &SubsystemRegistry) -> Result<(), ConfigError> {
        if self.backends.is_empty() {
            return Err(ConfigError::NoBackends);
        }
        if self.shutdown_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                setting: "shutdown_timeout_secs",
                reason: "must be at least 1".to_string(),
            });
        }

        check_known(registry, SubsystemKind::EventLoop, EVENT_LOOP)?;
        check_known(registry, SubsystemKind::Audio, AUDIO)?;
        check_known(registry, SubsystemKind::Mixer, &self.mixer)?;
        check_known(registry, SubsystemKind::Backend, &self.backends[0])?;
        for frontend in &self.frontends {
            check_known(registry, SubsystemKind::Frontend, frontend)?;
        }
        Ok(())
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }

    /// Renders the effective settings as YAML.
    pub fn render(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(ConfigError::Render)
    }
}

fn check_known(registry: &SubsystemRegistry, kind: SubsystemKind, name: &str) -> Result<(), ConfigError> {
    if registry.contains(&SubsystemDescriptor::new(kind, name)) {
        return Ok(());
    }
    Err(ConfigError::UnknownDescriptor {
        kind,
        descriptor: name.to_string(),
        known: registry.names(kind).join(", "),
    })
}
