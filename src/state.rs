use crate::services::{LinkService, QrRenderer};
use crate::telegram::BotService;
use std::sync::Arc;

/// State shared by the JSON API handlers.
///
/// Wrapped in `Arc` and handed to every handler via Axum's State extraction.
#[derive(Clone)]
pub struct AppState {
    /// Shortener and resolver over the configured store
    pub links: LinkService,

    /// QR image source for `POST /api/qr`
    pub qr: Arc<dyn QrRenderer>,

    /// Public base URL for short links; derived from the Host header when unset
    pub base_url: Option<String>,
}

/// State shared by the Telegram bot handlers.
#[derive(Clone)]
pub struct BotState {
    /// Shortener and resolver over the configured store
    pub links: LinkService,

    /// Webhook update handler
    pub bot: BotService,

    /// Public base URL for short links; derived from the Host header when unset
    pub base_url: Option<String>,

    /// Where `GET /` redirects to, if configured
    pub repo_url: Option<String>,
}
