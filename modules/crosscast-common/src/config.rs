use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables.
/// Platform credentials are not configuration: they arrive at runtime
/// through the connect exchange and live in the session store.
#[derive(Debug, Clone)]
pub struct Config {
    // Web server
    pub web_host: String,
    pub web_port: u16,

    // Instagram container polling bounds (defaults allow ~60s of processing)
    pub ig_poll_interval: Duration,
    pub ig_poll_attempts: u32,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if a value fails to parse.
    pub fn from_env() -> Self {
        Self {
            web_host: env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_port: env::var("WEB_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("WEB_PORT must be a number"),
            ig_poll_interval: Duration::from_secs(
                env::var("IG_POLL_INTERVAL_SECS")
                    .unwrap_or_else(|_| "3".to_string())
                    .parse()
                    .expect("IG_POLL_INTERVAL_SECS must be a number"),
            ),
            ig_poll_attempts: env::var("IG_POLL_ATTEMPTS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .expect("IG_POLL_ATTEMPTS must be a number"),
        }
    }
}
