//! TCP input implementation.
//!
//! Remote trigger buttons connect over TCP and send line-delimited commands.

use tokio::io::BufReader;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::event::{InputEvent, pump};
use super::{InputError, InputResult, config::TcpConfig};

/// TCP input handler.
pub struct TcpInput {
    config: TcpConfig,
}

impl TcpInput {
    /// Create a new TCP input with the given config.
    pub fn new(config: TcpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Run the TCP input, accepting any number of clients.
    pub async fn run(self, tx: mpsc::Sender<InputEvent>) -> InputResult<()> {
        let addr = self.address();

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| InputError::bind(&addr, e))?;

        info!("Ready - listening on {} (line commands over TCP)", addr);

        loop {
            if tx.is_closed() {
                return Ok(());
            }
            match listener.accept().await {
                Ok((stream, peer_addr)) => {
                    info!("Accepted connection from {}", peer_addr);

                    if let Err(e) = stream.set_nodelay(true) {
                        warn!("Failed to set TCP_NODELAY for {}: {}", peer_addr, e);
                    }

                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let source = peer_addr.to_string();
                        match pump(BufReader::new(stream), &tx, &source).await {
                            Ok(()) => info!("Client {} disconnected cleanly", peer_addr),
                            Err(e) => warn!("Error while reading client {}: {}", peer_addr, e),
                        }
                    });
                }
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    // Small delay to avoid spinning on persistent errors
                    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
                }
            }
        }
    }
}
