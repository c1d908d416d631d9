use serde::Deserialize;
use std::time::Duration;

/// Outbound HTTP settings shared by the Telegram and QR clients
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Timeout applied to every outbound HTTP call
    pub timeout_seconds: u64,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_seconds == 0 {
            return Err("HTTP_TIMEOUT_SECONDS must be greater than 0".to_string());
        }

        Ok(())
    }
}
