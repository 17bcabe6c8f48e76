// Configuration types module
// Startup configuration assembled from the command line

use super::entries::RouteTable;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 50000;
pub const DEFAULT_INDEX: &str = "index.html/index.htm";

/// Startup configuration; read-only once the server starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub index_files: Vec<String>,
    pub routes: RouteTable,
    /// Optional settings file passed with `--config`
    pub settings_file: Option<PathBuf>,
}

impl Config {
    pub fn socket_addr(&self, host: &str) -> Result<SocketAddr, String> {
        // Bare IPv6 hosts need brackets before a port can follow
        let host = if host.contains(':') && !host.starts_with('[') {
            format!("[{host}]")
        } else {
            host.to_string()
        };
        format!("{host}:{}", self.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Split a `/`-separated index option into file names, dropping empty names
pub fn split_index_files(index: &str) -> Vec<String> {
    index
        .split('/')
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
        .collect()
}
