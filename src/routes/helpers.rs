use crate::error::{AppError, AppResult};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use url::Url;

/// Origin that short URLs are built on.
///
/// A configured base URL wins; otherwise the request's `Host` header is used
/// with the scheme from `X-Forwarded-Proto` (default `https`).
pub(crate) fn public_base_url(configured: Option<&str>, headers: &HeaderMap) -> String {
    if let Some(base) = configured {
        return base.trim_end_matches('/').to_string();
    }

    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    let host = header_str("host").unwrap_or("localhost");
    let scheme = header_str("x-forwarded-proto")
        .and_then(|proto| proto.split(',').next())
        .map(str::trim)
        .unwrap_or("https");

    format!("{}://{}", scheme, host)
}

/// Redirect with an explicit status (301 or 302).
///
/// The original URL goes into `Location` verbatim when it is a legal header
/// value, otherwise in its percent-encoded serialization.
pub(crate) fn redirect_response(status: StatusCode, location: &str) -> AppResult<Response> {
    let value = match HeaderValue::from_str(location) {
        Ok(value) => value,
        Err(_) => {
            let encoded = Url::parse(location)
                .map_err(|e| AppError::Internal(format!("Stored URL is unparsable: {}", e)))?;
            HeaderValue::from_str(encoded.as_str())
                .map_err(|e| AppError::Internal(format!("Unencodable redirect target: {}", e)))?
        }
    };

    Ok((status, [(header::LOCATION, value)]).into_response())
}
