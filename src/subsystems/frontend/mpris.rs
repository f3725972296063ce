//! MPRIS frontend. Needs a D-Bus session bus; without one it is disabled.

use crate::error::SubsystemError;
use crate::settings::MprisSettings;
use actor_framework::Actor;
use async_trait::async_trait;
use std::env;
use tracing::info;

pub const SESSION_BUS_ENV: &str = "DBUS_SESSION_BUS_ADDRESS";

pub struct MprisFrontend {
    bus_address: Option<String>,
}

impl MprisFrontend {
    pub fn new(bus_address: Option<String>) -> Self {
        Self {
            bus_address: bus_address.filter(|a| !a.trim().is_empty()),
        }
    }

    /// Uses the configured bus address, falling back to the environment.
    pub fn from_settings(settings: &MprisSettings) -> Self {
        let address = settings
            .bus_address
            .clone()
            .or_else(|| env::var(SESSION_BUS_ENV).ok());
        Self::new(address)
    }
}

#[async_trait]
impl Actor for MprisFrontend {
    type Error = SubsystemError;

    fn name(&self) -> String {
        "mpris".to_string()
    }

    async fn on_start(&mut self) -> Result<(), SubsystemError> {
        match &self.bus_address {
            Some(address) => {
                info!(bus = %address, "MPRIS frontend attached to session bus");
                Ok(())
            }
            None => Err(SubsystemError::MissingDependency("no session bus".into())),
        }
    }
}
