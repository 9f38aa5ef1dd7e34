//! Configuration module for the level alert bot

use std::env;
use std::time::Duration;

use crate::error::{AlertError, Result};

const DEFAULT_SYMBOLS: &str = "NSE_INDEX|Nifty 50,NSE_INDEX|Nifty Bank";
const DEFAULT_QUOTES_URL: &str = "https://api.upstox.com/v2/market-quote/quotes";
const DEFAULT_TELEGRAM_URL: &str = "https://api.telegram.org";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Instrument keys to watch, in evaluation order
    pub symbols: Vec<String>,

    /// Bearer token for the quote API
    pub access_token: Option<String>,

    /// Quote endpoint (batch market quotes)
    pub quotes_url: String,

    /// Telegram bot credential and destination chat
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,

    /// Telegram API base URL
    pub telegram_api_url: String,

    /// Seconds between poll cycles
    pub poll_interval_secs: f64,

    /// Grid spacing between adjacent levels, in price points
    pub level_step: f64,

    /// Timeout applied to every outbound HTTP request
    pub http_timeout_secs: u64,

    /// Port of the liveness server
    pub http_port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            symbols: parse_symbols(
                &env::var("INSTRUMENT_KEYS").unwrap_or_else(|_| DEFAULT_SYMBOLS.to_string()),
            ),
            access_token: non_empty_var("UPSTOX_ACCESS_TOKEN"),
            quotes_url: env::var("UPSTOX_QUOTES_URL")
                .unwrap_or_else(|_| DEFAULT_QUOTES_URL.to_string()),
            telegram_bot_token: non_empty_var("TELEGRAM_BOT_TOKEN"),
            telegram_chat_id: non_empty_var("TELEGRAM_CHAT_ID"),
            telegram_api_url: env::var("TELEGRAM_API_URL")
                .unwrap_or_else(|_| DEFAULT_TELEGRAM_URL.to_string()),
            poll_interval_secs: env::var("POLL_INTERVAL_SEC")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .unwrap_or(1.0),
            level_step: env::var("LEVEL_STEP_POINTS")
                .unwrap_or_else(|_| "50".to_string())
                .parse()
                .unwrap_or(50.0),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject values the poll loop cannot run with
    pub fn validate(&self) -> Result<()> {
        if !self.level_step.is_finite() || self.level_step <= 0.0 {
            return Err(AlertError::ConfigError(format!(
                "LEVEL_STEP_POINTS must be a positive number, got {}",
                self.level_step
            )));
        }
        if Duration::try_from_secs_f64(self.poll_interval_secs).is_err() {
            return Err(AlertError::ConfigError(format!(
                "POLL_INTERVAL_SEC must be a non-negative number of seconds, got {}",
                self.poll_interval_secs
            )));
        }
        if self.http_timeout_secs == 0 {
            return Err(AlertError::ConfigError(
                "HTTP_TIMEOUT_SECS must be at least 1".to_string(),
            ));
        }
        if self.symbols.is_empty() {
            return Err(AlertError::ConfigError(
                "INSTRUMENT_KEYS contains no symbols".to_string(),
            ));
        }
        Ok(())
    }

    /// Interval between cycles; one second if the value is out of range
    pub fn poll_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.poll_interval_secs).unwrap_or(Duration::from_secs(1))
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            symbols: parse_symbols(DEFAULT_SYMBOLS),
            access_token: None,
            quotes_url: DEFAULT_QUOTES_URL.to_string(),
            telegram_bot_token: None,
            telegram_chat_id: None,
            telegram_api_url: DEFAULT_TELEGRAM_URL.to_string(),
            poll_interval_secs: 1.0,
            level_step: 50.0,
            http_timeout_secs: 5,
            http_port: 8080,
        }
    }
}

/// Split a comma-separated symbol list, dropping blanks and repeats.
pub fn parse_symbols(raw: &str) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();
    for symbol in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !symbols.iter().any(|s| s == symbol) {
            symbols.push(symbol.to_string());
        }
    }
    symbols
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symbols_keeps_order() {
        let symbols = parse_symbols(" NSE_INDEX|Nifty 50 ,,NSE_INDEX|Nifty Bank, NSE_INDEX|Nifty 50");
        assert_eq!(symbols, vec!["NSE_INDEX|Nifty 50", "NSE_INDEX|Nifty Bank"]);
    }

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.symbols.len(), 2);
        assert_eq!(config.level_step, 50.0);
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_validate_rejects_bad_step() {
        for step in [0.0, -50.0, f64::NAN, f64::INFINITY] {
            let config = Config {
                level_step: step,
                ..Config::default()
            };
            assert!(matches!(config.validate(), Err(AlertError::ConfigError(_))));
        }
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config {
            http_timeout_secs: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(AlertError::ConfigError(_))));
    }

    #[test]
    fn test_validate_rejects_negative_interval_and_empty_symbols() {
        let config = Config {
            poll_interval_secs: -1.0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        for interval in [1e30, f64::NAN, f64::INFINITY] {
            let config = Config {
                poll_interval_secs: interval,
                ..Config::default()
            };
            assert!(matches!(config.validate(), Err(AlertError::ConfigError(_))));
        }

        let config = Config {
            symbols: parse_symbols(" , "),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
