//! Configuration loading tests.
//!
//! These go through `Config::from_lookup` so the process environment is
//! never touched.

use shortwire::config::{Config, LogFormat, StoreBackend, StoreConfig, Variant};
use std::time::Duration;
use shortwire::error::AppError;
use std::collections::HashMap;

fn load(pairs: &[(&str, &str)]) -> Result<Config, AppError> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(move |name| vars.get(name).cloned())
}

/// Test module for configuration validation
mod config_tests {
    use super::*;

    #[test]
    fn test_full_environment() {
        let config = load(&[
            ("SERVER_HOST", "0.0.0.0"),
            ("SERVER_PORT", "8080"),
            ("BASE_URL", "https://sho.rt"),
            ("SHORT_CODE_LENGTH", "8"),
            ("SHORT_CODE_MAX_ATTEMPTS", "25"),
            ("STORE_BACKEND", "redis"),
            ("REDIS_URL", "redis://cache:6379"),
            ("STORE_KEY_PREFIX", "links:"),
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("GITHUB_REPO_URL", "https://github.com/acme/shortwire"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();

        assert_eq!(config.server.addr(), "0.0.0.0:8080");
        assert_eq!(config.url.code_length(Variant::Api), 8);
        assert_eq!(config.url.code_length(Variant::Bot), 8);
        assert_eq!(config.url.short_code_max_attempts, 25);
        assert_eq!(config.store.backend, StoreBackend::Redis);
        assert_eq!(config.store.redis_url, "redis://cache:6379");
        assert_eq!(config.store.key_prefix, "links:");
        assert_eq!(config.require_bot_token().unwrap(), "123:abc");
        assert_eq!(
            config.telegram.repo_url.as_deref(),
            Some("https://github.com/acme/shortwire")
        );
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_variant_default_code_lengths() {
        let config = load(&[]).unwrap();
        assert_eq!(config.url.code_length(Variant::Api), 6);
        assert_eq!(config.url.code_length(Variant::Bot), 7);
    }

    #[test]
    fn test_missing_bot_token() {
        let config = load(&[]).unwrap();
        assert!(matches!(
            config.require_bot_token(),
            Err(AppError::MissingEnvVar(name)) if name == "TELEGRAM_BOT_TOKEN"
        ));
    }

    #[test]
    fn test_retry_bound_must_be_positive() {
        assert!(matches!(
            load(&[("SHORT_CODE_MAX_ATTEMPTS", "0")]),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn test_base_url_must_be_web_url() {
        assert!(load(&[("BASE_URL", "ftp://sho.rt")]).is_err());
        assert!(load(&[("BASE_URL", "not a url")]).is_err());
    }

    #[test]
    fn test_telegram_api_url_trailing_slash() {
        let config = load(&[("TELEGRAM_API_URL", "http://localhost:8081/")]).unwrap();
        assert_eq!(config.telegram.api_url, "http://localhost:8081");
    }

    #[test]
    fn test_http_timeout_is_shared() {
        let config = load(&[("HTTP_TIMEOUT_SECONDS", "3")]).unwrap();
        assert_eq!(config.http.timeout(), Duration::from_secs(3));

        assert!(matches!(
            load(&[("HTTP_TIMEOUT_SECONDS", "0")]),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn test_redis_key_prefix_required() {
        let config = load(&[("STORE_BACKEND", "redis")]).unwrap();
        assert_eq!(config.store.key_prefix, "shortwire:");

        let store = StoreConfig {
            key_prefix: String::new(),
            ..config.store
        };
        assert!(store.validate().is_err());
    }
}
