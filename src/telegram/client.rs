use super::types::{ApiResponse, OutboundMessage};
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Outbound sink for chat messages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one message; succeeds once the platform has accepted it.
    async fn notify(&self, message: &OutboundMessage) -> AppResult<()>;
}

/// Bot API client over HTTPS
#[derive(Clone)]
pub struct TelegramClient {
    client: reqwest::Client,
    base_url: String,
}

impl TelegramClient {
    /// `api_url` is the Bot API origin, e.g. `https://api.telegram.org`
    pub fn new(api_url: &str, bot_token: &str, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: format!("{}/bot{}", api_url.trim_end_matches('/'), bot_token),
        })
    }

    /// Register `url` as the webhook receiving updates
    pub async fn set_webhook(&self, url: &str) -> AppResult<()> {
        self.call("setWebhook", &json!({ "url": url })).await
    }

    /// Stop webhook delivery
    pub async fn delete_webhook(&self) -> AppResult<()> {
        self.call("deleteWebhook", &json!({})).await
    }

    async fn call<T: Serialize + ?Sized + Sync>(&self, method: &str, body: &T) -> AppResult<()> {
        debug!(method, "Calling Telegram Bot API");

        let response = self
            .client
            .post(format!("{}/{}", self.base_url, method))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                // The URL embeds the token; keep it out of logs
                AppError::UpstreamFailure(format!("{} request failed: {}", method, e.without_url()))
            })?;

        let status = response.status();
        let envelope: ApiResponse = response.json().await.map_err(|e| {
            AppError::UpstreamFailure(format!(
                "{} answered {} with unreadable body: {}",
                method,
                status,
                e.without_url()
            ))
        })?;

        if !status.is_success() || !envelope.ok {
            return Err(AppError::UpstreamFailure(format!(
                "{} rejected ({}): {}",
                method,
                status,
                envelope.description.unwrap_or_default()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramClient {
    async fn notify(&self, message: &OutboundMessage) -> AppResult<()> {
        self.call(message.method(), message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::Value;
    use std::sync::{Arc, Mutex};

    type Calls = Arc<Mutex<Vec<(String, Value)>>>;

    /// Local stand-in for the Bot API answering every call the same way
    async fn bot_api(status: StatusCode, reply: &'static str) -> (String, Calls) {
        let calls: Calls = Arc::default();
        let app = Router::new()
            .route(
                "/{bot}/{method}",
                post(
                    move |State(calls): State<Calls>,
                          Path((bot, method)): Path<(String, String)>,
                          Json(body): Json<Value>| async move {
                        calls.lock().unwrap().push((format!("{bot}/{method}"), body));
                        (status, reply)
                    },
                ),
            )
            .with_state(calls.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), calls)
    }

    fn client(api_url: &str) -> TelegramClient {
        TelegramClient::new(api_url, "123:abc", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_base_url_embeds_token() {
        let client =
            TelegramClient::new("https://api.telegram.org/", "123:abc", Duration::from_secs(5))
                .unwrap();
        assert_eq!(client.base_url, "https://api.telegram.org/bot123:abc");
    }

    #[tokio::test]
    async fn test_notify_posts_to_method() {
        let (api_url, calls) = bot_api(StatusCode::OK, r#"{"ok":true,"result":{}}"#).await;

        client(&api_url)
            .notify(&OutboundMessage::text(42, "hello"))
            .await
            .unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "bot123:abc/sendMessage");
        assert_eq!(calls[0].1, json!({"chat_id": 42, "text": "hello"}));
    }

    #[tokio::test]
    async fn test_set_webhook_sends_url() {
        let (api_url, calls) = bot_api(StatusCode::OK, r#"{"ok":true,"result":true}"#).await;

        client(&api_url)
            .set_webhook("https://sho.rt/hook")
            .await
            .unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls[0].0, "bot123:abc/setWebhook");
        assert_eq!(calls[0].1["url"], "https://sho.rt/hook");
    }

    #[tokio::test]
    async fn test_rejected_envelope() {
        let (api_url, _) = bot_api(
            StatusCode::BAD_REQUEST,
            r#"{"ok":false,"description":"Bad Request: chat not found"}"#,
        )
        .await;

        let result = client(&api_url).notify(&OutboundMessage::text(42, "hi")).await;
        match result {
            Err(AppError::UpstreamFailure(message)) => {
                assert!(message.contains("chat not found"), "{message}")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_ok_false_with_success_status() {
        let (api_url, _) = bot_api(StatusCode::OK, r#"{"ok":false}"#).await;

        let result = client(&api_url).delete_webhook().await;
        assert!(matches!(result, Err(AppError::UpstreamFailure(_))));
    }

    #[tokio::test]
    async fn test_unreadable_body() {
        let (api_url, _) = bot_api(StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").await;

        let result = client(&api_url).notify(&OutboundMessage::text(42, "hi")).await;
        match result {
            Err(AppError::UpstreamFailure(message)) => {
                assert!(message.contains("unreadable"), "{message}");
                assert!(!message.contains("123:abc"), "{message}");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
