pub const API_URL: &str = "https://api.replicate.com/v1";

pub const POLL_INTERVAL_MS: u64 = 1000;
pub const MAX_POLL_ATTEMPTS: u32 = 30;
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
