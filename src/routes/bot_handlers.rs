use crate::error::AppError;
use crate::telegram::Update;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use std::sync::Arc;
use tracing::warn;

use super::helpers::{public_base_url, redirect_response};
use super::BotState;

const LANDING_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>URL Shortener Bot</title>
</head>
<body>
<p>This is a Telegram URL Shortener Bot. The GitHub repository link is not configured.</p>
</body>
</html>
"#;

/// `GET /`: the repository page when configured, a static page otherwise
pub async fn landing(State(state): State<Arc<BotState>>) -> Response {
    match state.repo_url.as_deref() {
        Some(repo_url) => redirect_response(StatusCode::FOUND, repo_url)
            .unwrap_or_else(AppError::into_text_response),
        None => Html(LANDING_HTML).into_response(),
    }
}

/// Telegram webhook delivery.
///
/// Always answers 200 so Telegram does not redeliver; failures reach the user
/// through a chat reply, or nowhere. That includes bodies over the size limit.
pub async fn webhook(
    State(state): State<Arc<BotState>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> impl IntoResponse {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, "Ignoring unreadable webhook payload");
            return (StatusCode::OK, "OK");
        }
    };

    match serde_json::from_slice::<Update>(&body) {
        Ok(update) => {
            let base_url = public_base_url(state.base_url.as_deref(), &headers);
            state.bot.handle_update(update, &base_url).await;
        }
        Err(e) => warn!(error = %e, "Ignoring undecodable webhook payload"),
    }

    (StatusCode::OK, "OK")
}

/// `GET /{code}`: permanent redirect (301)
pub async fn redirect(State(state): State<Arc<BotState>>, Path(code): Path<String>) -> Response {
    match state.links.resolve(&code).await {
        Ok(original_url) => redirect_response(StatusCode::MOVED_PERMANENTLY, &original_url)
            .unwrap_or_else(AppError::into_text_response),
        Err(AppError::NotFound(_)) => (StatusCode::NOT_FOUND, "URL not found.").into_response(),
        Err(e) => e.into_text_response(),
    }
}

pub async fn method_not_allowed() -> Response {
    AppError::MethodNotAllowed.into_text_response()
}
