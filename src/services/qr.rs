use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::time::Duration;
use tracing::debug;

/// Renders a QR code image for arbitrary text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QrRenderer: Send + Sync {
    /// PNG bytes of a `size`x`size` QR code encoding `data`
    async fn render(&self, data: &str, size: u32) -> AppResult<Vec<u8>>;
}

/// Wrap PNG bytes as a `data:` URL
pub fn png_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

/// Client for a goqr.me-compatible image endpoint
#[derive(Clone)]
pub struct QrServerClient {
    client: reqwest::Client,
    endpoint: String,
}

impl QrServerClient {
    pub fn new(endpoint: String, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl QrRenderer for QrServerClient {
    async fn render(&self, data: &str, size: u32) -> AppResult<Vec<u8>> {
        let dimensions = format!("{size}x{size}");
        debug!(size, "Requesting QR code");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("size", dimensions.as_str()), ("data", data)])
            .send()
            .await
            .map_err(|e| AppError::UpstreamFailure(format!("QR request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamFailure(format!(
                "QR service answered {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::UpstreamFailure(format!("QR body read failed: {}", e)))?;

        Ok(bytes.to_vec())
    }
}
