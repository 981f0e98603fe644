use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

// Configuration constants for the bot

/// Path to the JSON document holding channels, groups and settings
/// Read from DATA_FILE environment variable
/// Default: channels_data.json
pub static DATA_FILE: Lazy<String> =
    Lazy::new(|| env::var("DATA_FILE").unwrap_or_else(|_| "channels_data.json".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: app.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "app.log".to_string()));

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
/// Empty when neither is set; the bot then refuses to start but the web server still runs.
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Custom Bot API server URL (local telegram-bot-api), if any
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| env::var("BOT_API_URL").ok());

/// Returns true when a bot token is configured
pub fn has_bot_token() -> bool {
    !BOT_TOKEN.trim().is_empty()
}

/// Web (health check) server configuration
pub mod web {
    use super::{env, Lazy};

    /// Default port, matches what hosting platforms probe when PORT is unset
    pub const DEFAULT_PORT: u16 = 8080;

    /// Port for the health server
    /// Read from WEB_PORT, then PORT (set by most PaaS hosts)
    pub static PORT: Lazy<u16> = Lazy::new(|| {
        env::var("WEB_PORT")
            .or_else(|_| env::var("PORT"))
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT)
    });
}

/// Retry configuration
pub mod retry {
    use super::Duration;

    /// Delay before the dispatcher is rebuilt after a crash (in seconds)
    pub const RESTART_DELAY_SECS: u64 = 10;

    /// Dispatcher restart delay duration
    pub fn restart_delay() -> Duration {
        Duration::from_secs(RESTART_DELAY_SECS)
    }

    /// Attempts at `get_me` while the Bot API is still coming up
    pub const STARTUP_MAX_RETRIES: u32 = 60;

    /// Delay between startup attempts (in seconds)
    pub const STARTUP_RETRY_DELAY_SECS: u64 = 5;

    /// Startup retry delay duration
    pub fn startup_delay() -> Duration {
        Duration::from_secs(STARTUP_RETRY_DELAY_SECS)
    }
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API HTTP requests (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_durations_match_constants() {
        assert_eq!(retry::restart_delay(), Duration::from_secs(10));
        assert_eq!(retry::startup_delay(), Duration::from_secs(5));
        assert_eq!(network::timeout().as_secs(), network::REQUEST_TIMEOUT_SECS);
    }
}
