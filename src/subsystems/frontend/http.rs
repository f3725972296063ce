//! HTTP frontend: listens on the configured address.

use crate::error::SubsystemError;
use actor_framework::Actor;
use async_trait::async_trait;
use std::net::SocketAddr;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{debug, info};

const RESPONSE: &[u8] = b"HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n";

pub struct HttpFrontend {
    hostname: String,
    port: u16,
    local_addr: Option<SocketAddr>,
    acceptor: Option<JoinHandle<()>>,
}

impl HttpFrontend {
    pub fn new(hostname: String, port: u16) -> Self {
        Self {
            hostname,
            port,
            local_addr: None,
            acceptor: None,
        }
    }

    /// Bound address, once started.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }
}

#[async_trait]
impl Actor for HttpFrontend {
    type Error = SubsystemError;

    fn name(&self) -> String {
        "http".to_string()
    }

    async fn on_start(&mut self) -> Result<(), SubsystemError> {
        let listener = TcpListener::bind((self.hostname.as_str(), self.port))
            .await
            .map_err(|e| {
                SubsystemError::Failed(format!("cannot listen on {}:{}: {e}", self.hostname, self.port))
            })?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| SubsystemError::Failed(format!("cannot read listener address: {e}")))?;

        self.acceptor = Some(tokio::spawn(async move {
            while let Ok((mut stream, peer)) = listener.accept().await {
                debug!(%peer, "HTTP connection");
                let _ = stream.write_all(RESPONSE).await;
            }
        }));
        self.local_addr = Some(local_addr);
        info!(address = %local_addr, "HTTP frontend listening");
        Ok(())
    }

    async fn on_stop(&mut self) {
        if let Some(acceptor) = self.acceptor.take() {
            acceptor.abort();
        }
    }
}
