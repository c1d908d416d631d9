use axum::{
    extract::Request,
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::{header, HeaderValue};
use uuid::Uuid;

/// Request ID wrapper for use in request extensions
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

/// Request ID middleware - adds a unique ID to each request
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    // Try to get existing request ID from header, or generate new one
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|h| h.to_str().ok())
        .map(|s| RequestId(s.to_string()))
        .unwrap_or_default();

    req.extensions_mut().insert(request_id.clone());

    tracing::info!(
        request_id = %request_id.as_str(),
        method = %req.method(),
        path = %req.uri().path(),
        "Incoming request"
    );

    let mut response = next.run(req).await;

    tracing::debug!(
        request_id = %request_id.as_str(),
        status = response.status().as_u16(),
        "Request completed"
    );

    if let Ok(header_value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert("x-request-id", header_value);
    }

    response
}

/// Permissive CORS: answers every preflight with 200 and stamps the same
/// headers on every other response.
pub async fn cors_middleware(req: Request, next: Next) -> Response {
    let mut response = if req.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(req).await
    };

    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, middleware, routing::post, Router};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/api/shorten", post(|| async { "created" }))
            .layer(middleware::from_fn(cors_middleware))
            .layer(middleware::from_fn(request_id_middleware))
    }

    #[test]
    fn test_request_id_new() {
        let id = RequestId::new();
        assert_eq!(id.as_str().len(), 36); // UUID v4 length
    }

    #[tokio::test]
    async fn test_preflight_short_circuits() {
        let response = app()
            .oneshot(
                http::Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/shorten")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, PUT, DELETE, OPTIONS"
        );
    }

    #[tokio::test]
    async fn test_request_id_echoed() {
        let response = app()
            .oneshot(
                http::Request::builder()
                    .method(Method::POST)
                    .uri("/api/shorten")
                    .header("x-request-id", "req-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()["x-request-id"], "req-123");
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type, Authorization"
        );
    }
}
