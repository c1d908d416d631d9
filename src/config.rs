mod http;
mod logging;
mod qr;
mod server;
mod store;
mod telegram;
mod url;

pub use http::HttpConfig;
pub use logging::LogFormat;
pub use qr::QrConfig;
pub use server::ServerConfig;
pub use store::{StoreBackend, StoreConfig};
pub use telegram::TelegramConfig;
pub use url::UrlConfig;

use crate::error::{AppError, AppResult};
use std::env;
use std::str::FromStr;

/// Which deployment the process is serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// JSON API with click counting and temporary redirects
    Api,
    /// Telegram webhook with permanent redirects
    Bot,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub url: UrlConfig,
    pub store: StoreConfig,
    pub telegram: TelegramConfig,
    pub qr: QrConfig,
    pub http: HttpConfig,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let server_host = var("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let server_port = parse_or(&var, "SERVER_PORT", 3000u16)?;

        let short_code_length = var("SHORT_CODE_LENGTH")
            .map(|raw| {
                raw.trim()
                    .parse::<usize>()
                    .map_err(|_| AppError::Configuration("Invalid SHORT_CODE_LENGTH".to_string()))
            })
            .transpose()?;
        let short_code_max_attempts = parse_or(&var, "SHORT_CODE_MAX_ATTEMPTS", 10u32)?;
        let base_url = var("BASE_URL").map(|raw| raw.trim().trim_end_matches('/').to_string());

        let backend = parse_or(&var, "STORE_BACKEND", StoreBackend::Memory)?;
        let redis_url = var("REDIS_URL").unwrap_or_else(|| "redis://127.0.0.1:6379".to_string());
        let redis_max_connections = parse_or(&var, "REDIS_MAX_CONNECTIONS", 10u32)?;
        let key_prefix = var("STORE_KEY_PREFIX").unwrap_or_else(|| "shortwire:".to_string());

        let telegram_api_url = var("TELEGRAM_API_URL")
            .unwrap_or_else(|| "https://api.telegram.org".to_string())
            .trim_end_matches('/')
            .to_string();

        let qr_api_url = var("QR_API_URL")
            .unwrap_or_else(|| "https://api.qrserver.com/v1/create-qr-code/".to_string());
        let http_timeout_seconds = parse_or(&var, "HTTP_TIMEOUT_SECONDS", 10u64)?;

        let log_format = parse_or(&var, "LOG_FORMAT", LogFormat::Pretty)?;

        let config = Config {
            server: ServerConfig {
                host: server_host,
                port: server_port,
            },
            url: UrlConfig {
                short_code_length,
                base_url,
                short_code_max_attempts,
            },
            store: StoreConfig {
                backend,
                redis_url,
                max_connections: redis_max_connections,
                key_prefix,
            },
            telegram: TelegramConfig {
                bot_token: var("TELEGRAM_BOT_TOKEN"),
                api_url: telegram_api_url,
                repo_url: var("GITHUB_REPO_URL"),
                welcome_photo_url: var("WELCOME_PHOTO_URL"),
                welcome_animation_url: var("WELCOME_ANIMATION_URL"),
            },
            qr: QrConfig {
                api_url: qr_api_url,
            },
            http: HttpConfig {
                timeout_seconds: http_timeout_seconds,
            },
            log_format,
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> AppResult<()> {
        self.url.validate().map_err(AppError::Configuration)?;
        self.store.validate().map_err(AppError::Configuration)?;
        self.telegram.validate().map_err(AppError::Configuration)?;
        self.qr.validate().map_err(AppError::Configuration)?;
        self.http.validate().map_err(AppError::Configuration)?;
        Ok(())
    }

    /// The bot token, required by the bot variant and the admin commands
    pub fn require_bot_token(&self) -> AppResult<&str> {
        self.telegram
            .bot_token
            .as_deref()
            .ok_or_else(|| AppError::MissingEnvVar("TELEGRAM_BOT_TOKEN".to_string()))
    }
}

fn parse_or<T, F>(var: &F, name: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid {}", name))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.url.short_code_max_attempts, 10);
        assert_eq!(config.url.code_length(Variant::Api), 6);
        assert_eq!(config.url.code_length(Variant::Bot), 7);
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.url.base_url.is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = Config::from_lookup(lookup(&[("BASE_URL", "https://sho.rt/")])).unwrap();
        assert_eq!(config.url.base_url.as_deref(), Some("https://sho.rt"));
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = Config::from_lookup(lookup(&[("TELEGRAM_BOT_TOKEN", "  ")])).unwrap();
        assert!(config.require_bot_token().is_err());
    }

    #[test]
    fn test_invalid_port() {
        let result = Config::from_lookup(lookup(&[("SERVER_PORT", "not_a_port")]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_code_length_out_of_range() {
        let result = Config::from_lookup(lookup(&[("SHORT_CODE_LENGTH", "3")]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_unknown_backend() {
        let result = Config::from_lookup(lookup(&[("STORE_BACKEND", "dynamo")]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }
}
