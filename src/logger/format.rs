//! Access log format module
//!
//! Supports multiple log formats:
//! - `combined` (Apache/Nginx combined format)
//! - `common` (Common Log Format - CLF)
//! - `json` (one `serde_json` object per line)
//! - Custom patterns with `$variables`

use chrono::{DateTime, Local};
use serde::Serialize;

/// Line layout selected by `logging.access_log_format`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessLogFormat {
    Combined,
    Common,
    Json,
    Pattern(String),
}

impl AccessLogFormat {
    pub fn parse(name: &str) -> Self {
        match name {
            "combined" => Self::Combined,
            "common" => Self::Common,
            "json" => Self::Json,
            pattern => Self::Pattern(pattern.to_string()),
        }
    }
}

/// One served request
#[derive(Debug, Clone, Serialize)]
pub struct AccessLogEntry {
    pub remote_addr: String,
    pub time: DateTime<Local>,
    pub method: String,
    pub path: String,
    /// Without the leading `?`
    pub query: Option<String>,
    pub http_version: String,
    pub status: u16,
    pub body_bytes: usize,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
    pub request_time_us: u64,
}

impl AccessLogEntry {
    /// Entry stamped with the current local time
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            query: None,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: 0,
            referer: None,
            user_agent: None,
            request_time_us: 0,
        }
    }

    pub fn format(&self, format: &AccessLogFormat) -> String {
        match format {
            AccessLogFormat::Combined => format!(
                "{} \"{}\" \"{}\"",
                self.common_line(),
                self.referer.as_deref().unwrap_or("-"),
                self.user_agent.as_deref().unwrap_or("-"),
            ),
            AccessLogFormat::Common => self.common_line(),
            AccessLogFormat::Json => serde_json::to_string(self)
                .unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}")),
            AccessLogFormat::Pattern(pattern) => self.expand(pattern),
        }
    }

    fn request_uri(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{q}", self.path),
            None => self.path.clone(),
        }
    }

    fn request_line(&self) -> String {
        format!("{} {} HTTP/{}", self.method, self.request_uri(), self.http_version)
    }

    fn time_local(&self) -> String {
        self.time.format("%d/%b/%Y:%H:%M:%S %z").to_string()
    }

    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn common_line(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {}",
            self.remote_addr,
            self.time_local(),
            self.request_line(),
            self.status,
            self.body_bytes,
        )
    }

    /// Value of a pattern variable, `None` if the name is unknown
    fn variable(&self, name: &str) -> Option<String> {
        let value = match name {
            "remote_addr" => self.remote_addr.clone(),
            "time_local" => self.time_local(),
            "time_iso8601" => self.time.to_rfc3339(),
            "request" => self.request_line(),
            "request_method" => self.method.clone(),
            "request_uri" => self.request_uri(),
            "status" => self.status.to_string(),
            "body_bytes_sent" => self.body_bytes.to_string(),
            "http_referer" => self.referer.clone().unwrap_or_else(|| "-".to_string()),
            "http_user_agent" => self.user_agent.clone().unwrap_or_else(|| "-".to_string()),
            "request_time" => {
                #[allow(clippy::cast_precision_loss)]
                let seconds = self.request_time_us as f64 / 1_000_000.0;
                format!("{seconds:.3}")
            }
            _ => return None,
        };
        Some(value)
    }

    /// Replace every `$name` in `pattern`; unknown names are kept verbatim
    fn expand(&self, pattern: &str) -> String {
        let mut out = String::with_capacity(pattern.len());
        let mut rest = pattern;
        while let Some(pos) = rest.find('$') {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos + 1..];
            let len = tail
                .bytes()
                .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
                .count();
            match self.variable(&tail[..len]) {
                Some(value) => out.push_str(&value),
                None => {
                    out.push('$');
                    out.push_str(&tail[..len]);
                }
            }
            rest = &tail[len..];
        }
        out.push_str(rest);
        out
    }
}
