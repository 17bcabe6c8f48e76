// Application state module
// Immutable state shared by every connection

use super::settings::Settings;
use super::types::Config;
use crate::logger::AccessLogFormat;
use crate::routing::Router;

/// Application state, built once before the listener starts
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub settings: Settings,
    pub router: Router,
    pub access_log_format: AccessLogFormat,
}

impl AppState {
    pub fn new(config: Config, settings: Settings) -> Self {
        let router = Router::new(config.routes.clone(), config.index_files.clone());
        let access_log_format = AccessLogFormat::parse(&settings.logging.access_log_format);
        Self {
            config,
            settings,
            router,
            access_log_format,
        }
    }

    pub const fn access_log(&self) -> bool {
        self.settings.logging.access_log
    }
}
