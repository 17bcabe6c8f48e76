//! Logger module
//!
//! Provides logging utilities for the mock server including:
//! - Startup banner with the route table
//! - Access logging with multiple formats
//! - Not-found reports, errors and warnings
//! - File-based logging support

mod format;
pub mod writer;

pub use format::{AccessLogEntry, AccessLogFormat};

use crate::config::{Config, LoggingConfig};
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(logging: &LoggingConfig) -> std::io::Result<()> {
    writer::init(
        logging.access_log_file.as_deref(),
        logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info(&format!("Listening on port {} (http://{addr})", config.port));
    for entry in &config.routes {
        write_info(&format!("  {} => {}", entry.location, entry.path.display()));
    }
    write_info(&format!("  index: {}", config.index_files.join(", ")));
}

/// Report a request no entry could answer
pub fn log_not_found(path: &str) {
    write_error(&format!("File not found: {path}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &AccessLogFormat) {
    write_access(&entry.format(format));
}

pub fn log_shutdown() {
    write_info("Shutting down");
}
