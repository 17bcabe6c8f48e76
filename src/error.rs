//! Error types
//!
//! Startup failures are fatal and stop the process before any request is served.
//! Per-request outcomes never surface here.

use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// Validation failure for the command-line route entries.
///
/// Carries every collected message, never only the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .messages.join("\n"))]
pub struct ConfigError {
    pub messages: Vec<String>,
}

impl ConfigError {
    pub const fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }
}

/// The listen socket could not be created or bound.
#[derive(Debug, Error)]
#[error("failed to listen on {addr}: {source}")]
pub struct ListenError {
    pub addr: SocketAddr,
    #[source]
    pub source: io::Error,
}

impl ListenError {
    /// Whether the failure was caused by another process holding the port
    pub fn is_addr_in_use(&self) -> bool {
        self.source.kind() == io::ErrorKind::AddrInUse
    }
}

/// Anything that stops the binary before it starts serving
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to load settings: {0}")]
    Settings(#[from] ::config::ConfigError),

    #[error("invalid listen address '{0}'")]
    Address(String),

    #[error(transparent)]
    Listen(#[from] ListenError),

    #[error("failed to open log files: {0}")]
    Logger(#[source] io::Error),

    #[error("failed to build runtime: {0}")]
    Runtime(#[source] io::Error),
}
