use std::time::Duration;

use serde::Deserialize;

use crate::generations::apis::replicate::config::{
    API_URL, MAX_POLL_ATTEMPTS, POLL_INTERVAL_MS, REQUEST_TIMEOUT_SECS,
};

#[derive(Debug, Clone, Deserialize)]
pub struct Envy {
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub port: Option<u16>,

    pub replicate_api_url: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub max_poll_attempts: Option<u32>,
    pub request_timeout_secs: Option<u64>,

    pub rate_limit_per_second: Option<u64>,
}

fn default_app_env() -> String {
    "development".to_string()
}

impl Envy {
    pub fn replicate_api_url(&self) -> &str {
        self.replicate_api_url
            .as_deref()
            .unwrap_or(API_URL)
            .trim_end_matches('/')
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.unwrap_or(POLL_INTERVAL_MS))
    }

    /// Poll budget, never less than a single poll.
    pub fn max_poll_attempts(&self) -> u32 {
        self.max_poll_attempts.unwrap_or(MAX_POLL_ATTEMPTS).max(1)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(REQUEST_TIMEOUT_SECS))
    }

    pub fn rate_limit_per_second(&self) -> u64 {
        self.rate_limit_per_second.unwrap_or(5).max(1)
    }
}
