use crate::error::{AppError, AppResult};
use crate::models::{
    ListUrlsResponse, QrRequest, QrResponse, ResolveResponse, ShortenRequest, ShortenResponse,
};
use crate::services::qr::png_data_url;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use super::helpers::{public_base_url, redirect_response};
use super::AppState;

pub const LANDING_TEXT: &str = "URL Shortener API - Use /api/shorten to create short URLs";

/// Plain-text banner on `GET /`
pub async fn landing() -> &'static str {
    LANDING_TEXT
}

/// Create a short URL
pub async fn shorten_url(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> AppResult<Json<ShortenResponse>> {
    let Json(payload) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let url = payload
        .url
        .ok_or_else(|| AppError::InvalidInput("URL is required".to_string()))?;

    let base_url = public_base_url(state.base_url.as_deref(), &headers);
    let link = state.links.shorten(&url, &base_url).await?;

    Ok(Json(ShortenResponse::from(link)))
}

/// Every stored link with its click count
pub async fn list_urls(State(state): State<Arc<AppState>>) -> AppResult<Json<ListUrlsResponse>> {
    let urls = state.links.list().await?;
    Ok(Json(ListUrlsResponse { urls }))
}

/// Render a QR code for `url` as a PNG data URL
pub async fn generate_qr(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QrRequest>, JsonRejection>,
) -> AppResult<Json<QrResponse>> {
    let Json(payload) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    payload
        .validate()
        .map_err(|e| AppError::InvalidInput(format!("Validation failed: {}", e)))?;

    let url = payload
        .url
        .ok_or_else(|| AppError::InvalidInput("URL is required".to_string()))?;

    let png = state.qr.render(&url, payload.size).await?;

    Ok(Json(QrResponse {
        qr_code: png_data_url(&png),
        url,
    }))
}

/// Resolve a short code without redirecting. Counts as a visit.
pub async fn resolve_url(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> AppResult<Json<ResolveResponse>> {
    let original_url = state.links.resolve(&code).await?;

    Ok(Json(ResolveResponse {
        original_url,
        short_code: code,
    }))
}

/// Redirect to the original URL (302)
pub async fn redirect_url(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Response {
    if code.contains('.') {
        return not_found().await;
    }

    let result = match state.links.resolve(&code).await {
        Ok(original_url) => redirect_response(StatusCode::FOUND, &original_url),
        Err(e) => Err(e),
    };

    result.unwrap_or_else(AppError::into_text_response)
}

/// JSON 404 for anything under `/api/` that has no handler
pub async fn api_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "API endpoint not found",
            "code": "NOT_FOUND",
        })),
    )
        .into_response()
}

/// Plain-text 404
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

/// Fallback for unmatched paths: JSON under `/api/`, text elsewhere
pub async fn fallback(uri: axum::http::Uri) -> Response {
    if uri.path() == "/api" || uri.path().starts_with("/api/") {
        api_not_found().await
    } else {
        not_found().await
    }
}
