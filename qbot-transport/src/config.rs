//! Minimal client configuration: token, API base URL, log path.
//! Loaded from the environment: BOT_TOKEN, TELEGRAM_API_URL, LOG_FILE.

use anyhow::Result;
use std::env;

const DEFAULT_API_URL: &str = "https://api.telegram.org/bot";

/// Connection settings for one bot.
pub struct ApiConfig {
    pub bot_token: String,
    pub api_url: String,
    pub log_file: Option<String>,
}

impl ApiConfig {
    /// Loads from environment variables: BOT_TOKEN required,
    /// TELEGRAM_API_URL and LOG_FILE optional.
    pub fn from_env() -> Result<Self> {
        let bot_token = env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?;
        let api_url = env::var("TELEGRAM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let log_file = env::var("LOG_FILE").ok();
        Ok(Self {
            bot_token,
            api_url,
            log_file,
        })
    }

    /// Builds a config with the given token, default API URL, no log file.
    pub fn with_token(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            api_url: DEFAULT_API_URL.to_string(),
            log_file: None,
        }
    }

    /// The bot's base URL: API url + token, without a trailing method segment.
    pub fn base_url(&self) -> String {
        format!("{}{}", self.api_url, self.bot_token)
    }
}
