use serde::Deserialize;

/// QR generator endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct QrConfig {
    /// Image endpoint, queried with `size` and `data` parameters
    pub api_url: String,
}

impl QrConfig {
    /// Validate QR configuration values
    pub fn validate(&self) -> Result<(), String> {
        if ::url::Url::parse(&self.api_url).is_err() {
            return Err("QR_API_URL must be an absolute URL".to_string());
        }

        Ok(())
    }
}
