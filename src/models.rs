use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A short link as kept in the descriptor record layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortLink {
    pub id: Uuid,
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    pub clicks: u64,
    pub created_at: DateTime<Utc>,
}

/// Request to create a short URL
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: Option<String>,
}

/// Response after creating a short URL
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub id: Uuid,
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
}

impl From<ShortLink> for ShortenResponse {
    fn from(link: ShortLink) -> Self {
        ShortenResponse {
            id: link.id,
            short_code: link.short_code,
            short_url: link.short_url,
            original_url: link.original_url,
        }
    }
}

/// Response for a JSON lookup of a short code
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    pub original_url: String,
    pub short_code: String,
}

/// Every stored descriptor
#[derive(Debug, Serialize)]
pub struct ListUrlsResponse {
    pub urls: Vec<ShortLink>,
}

/// Request for a QR code image
#[derive(Debug, Deserialize, Validate)]
pub struct QrRequest {
    #[validate(length(min = 1, message = "URL is required"))]
    pub url: Option<String>,

    #[validate(range(min = 10, max = 1000, message = "Size must be between 10 and 1000"))]
    #[serde(default = "default_qr_size")]
    pub size: u32,
}

fn default_qr_size() -> u32 {
    200
}

/// QR code rendered as a data URL
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrResponse {
    pub qr_code: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_link() -> ShortLink {
        ShortLink {
            id: Uuid::new_v4(),
            short_code: "abc123".to_string(),
            short_url: "https://sho.rt/abc123".to_string(),
            original_url: "https://example.com/a".to_string(),
            clicks: 3,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_short_link_uses_camel_case() {
        let value = serde_json::to_value(sample_link()).unwrap();

        assert_eq!(value["shortCode"], "abc123");
        assert_eq!(value["originalUrl"], "https://example.com/a");
        assert_eq!(value["shortUrl"], "https://sho.rt/abc123");
        assert_eq!(value["clicks"], 3);
        assert!(value["createdAt"].is_string());
    }

    #[test]
    fn test_shorten_response_from_link() {
        let link = sample_link();
        let id = link.id;
        let value = serde_json::to_value(ShortenResponse::from(link)).unwrap();

        assert_eq!(value["id"], id.to_string());
        assert_eq!(value["shortCode"], "abc123");
        assert!(value.get("clicks").is_none());
    }

    #[test]
    fn test_qr_request_default_size() {
        let request: QrRequest =
            serde_json::from_str(r#"{"url": "https://example.com"}"#).unwrap();
        assert_eq!(request.size, 200);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_qr_request_size_out_of_range() {
        let request: QrRequest =
            serde_json::from_str(r#"{"url": "https://example.com", "size": 5000}"#).unwrap();
        assert!(request.validate().is_err());
    }
}
