//! mokk: a local mock backend.
//!
//! Maps URL path prefixes to local directories and serves their files.
//! Entries given on the command line as `LOCATION=PATH-SPEC` are validated into
//! an ordered route table; each request is offered to every entry whose
//! location covers it, in order, until one of them has the file.

pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;
