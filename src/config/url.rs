use serde::Deserialize;

use super::Variant;

/// URL shortening configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UrlConfig {
    /// Length of randomly generated short codes. Unset means the variant default.
    pub short_code_length: Option<usize>,

    /// Public base URL for constructing short URLs (e.g., "https://sho.rt").
    /// Unset means it is derived from the request's Host header.
    pub base_url: Option<String>,

    /// Maximum number of attempts to generate a unique short code
    pub short_code_max_attempts: u32,
}

impl UrlConfig {
    /// Short code length in effect for the given deployment variant
    pub fn code_length(&self, variant: Variant) -> usize {
        self.short_code_length.unwrap_or(match variant {
            Variant::Api => 6,
            Variant::Bot => 7,
        })
    }

    /// Validate URL configuration values
    pub fn validate(&self) -> Result<(), String> {
        if let Some(length) = self.short_code_length {
            if !(4..=16).contains(&length) {
                return Err("SHORT_CODE_LENGTH must be between 4 and 16".to_string());
            }
        }

        if self.short_code_max_attempts < 1 || self.short_code_max_attempts > 100 {
            return Err("SHORT_CODE_MAX_ATTEMPTS must be between 1 and 100".to_string());
        }

        if let Some(base_url) = &self.base_url {
            let parsed = ::url::Url::parse(base_url)
                .map_err(|_| "BASE_URL must be an absolute URL".to_string())?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err("BASE_URL must use http or https".to_string());
            }
        }

        Ok(())
    }
}
