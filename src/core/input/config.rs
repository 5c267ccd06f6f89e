//! Input source configuration types.

use serde::{Deserialize, Serialize};

/// Input source configuration options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputConfig {
    /// Trigger edges typed on standard input (the simulator).
    #[cfg(feature = "stdio")]
    Stdio,

    /// Trigger edges sent as lines over TCP.
    #[cfg(feature = "tcp")]
    Tcp(TcpConfig),
}

/// TCP input configuration.
#[cfg(feature = "tcp")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TcpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,
}

#[cfg(feature = "tcp")]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        {
            return Self::Stdio;
        }

        #[cfg(all(not(feature = "stdio"), feature = "tcp"))]
        {
            return Self::Tcp(TcpConfig::default());
        }

        #[cfg(not(any(feature = "stdio", feature = "tcp")))]
        {
            compile_error!("At least one input feature must be enabled: stdio or tcp");
        }
    }
}

#[cfg(feature = "tcp")]
impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            port: 7070,
            host: default_host(),
        }
    }
}

impl InputConfig {
    /// Load input config from environment variables.
    pub fn from_env() -> Self {
        let input = std::env::var("TOOLGUN_INPUT")
            .unwrap_or_default()
            .to_lowercase();

        match input.as_str() {
            #[cfg(feature = "tcp")]
            "tcp" => {
                let port = std::env::var("TOOLGUN_TCP_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(7070);
                let host = std::env::var("TOOLGUN_TCP_HOST").unwrap_or_else(|_| default_host());
                Self::Tcp(TcpConfig { port, host })
            }
            _ => Self::default(),
        }
    }

    /// Get a description of this input for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (simulator)".to_string(),
            #[cfg(feature = "tcp")]
            Self::Tcp(cfg) => format!("TCP on {}:{}", cfg.host, cfg.port),
        }
    }
}
