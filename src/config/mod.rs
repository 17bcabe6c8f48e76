// Configuration module entry point
// Route entries, path-spec resolution, ambient settings and shared state

pub mod entries;
pub mod pathspec;
mod settings;
mod state;
mod types;

// Re-export public types
pub use entries::{parse_entries, Entry, RouteTable};
pub use settings::{LoggingConfig, PerformanceConfig, ServerSettings, Settings};
pub use state::AppState;
pub use types::{split_index_files, Config, DEFAULT_INDEX, DEFAULT_PORT};
