use super::client::Notifier;
use super::types::{IncomingMessage, InlineButton, MessageContent, OutboundMessage, Update};
use crate::services::{parse_web_url, LinkService};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub const WELCOME_TEXT: &str = "Welcome! I'm a URL shortener bot. Send me any long URL, and I'll shrink it for you!";
pub const INVALID_URL_REPLY: &str =
    "That doesn't look like a valid URL. Please send a URL that starts with http:// or https://";
pub const FAILURE_REPLY: &str = "Sorry, an unexpected error occurred. Please try again later.";

/// What `/start` answers with
#[derive(Debug, Clone, Default)]
pub struct WelcomeMessage {
    pub repo_url: Option<String>,
    pub photo_url: Option<String>,
    pub animation_url: Option<String>,
}

impl WelcomeMessage {
    /// Animation wins over photo; with neither the welcome is plain text.
    pub fn build(&self, chat_id: i64) -> OutboundMessage {
        let caption = Some(WELCOME_TEXT.to_string());
        let content = match (&self.animation_url, &self.photo_url) {
            (Some(animation), _) => MessageContent::Animation {
                animation: animation.clone(),
                caption,
            },
            (None, Some(photo)) => MessageContent::Photo {
                photo: photo.clone(),
                caption,
            },
            (None, None) => MessageContent::Text {
                text: WELCOME_TEXT.to_string(),
            },
        };

        let buttons = self
            .repo_url
            .iter()
            .map(|url| InlineButton {
                text: "⭐ View on GitHub".to_string(),
                url: url.clone(),
            })
            .collect();

        OutboundMessage {
            chat_id,
            content,
            reply_markup: None,
        }
        .with_buttons(buttons)
    }
}

/// Turns webhook updates into shortened links and chat replies.
#[derive(Clone)]
pub struct BotService {
    links: LinkService,
    notifier: Arc<dyn Notifier>,
    welcome: WelcomeMessage,
}

impl BotService {
    pub fn new(links: LinkService, notifier: Arc<dyn Notifier>, welcome: WelcomeMessage) -> Self {
        Self {
            links,
            notifier,
            welcome,
        }
    }

    /// Handle one update. Never fails: problems are reported to the chat or
    /// logged, because the webhook must be acknowledged regardless.
    pub async fn handle_update(&self, update: Update, base_url: &str) {
        let update_id = update.update_id;

        match IncomingMessage::from(update) {
            IncomingMessage::Start { chat_id } => {
                info!(update_id, chat_id, "Sending welcome message");
                self.send(self.welcome.build(chat_id)).await;
            }
            IncomingMessage::Text { chat_id, text } => {
                if parse_web_url(&text).is_err() {
                    debug!(update_id, chat_id, "Rejected non-URL text");
                    self.send(OutboundMessage::text(chat_id, INVALID_URL_REPLY)).await;
                    return;
                }

                let reply = match self.links.shorten(&text, base_url).await {
                    Ok(link) => {
                        info!(update_id, chat_id, short_code = %link.short_code, "Shortened URL for chat");
                        format!("Success! Here is your short URL:\n{}", link.short_url)
                    }
                    Err(e) => {
                        error!(update_id, chat_id, error = %e, "Failed to shorten URL for chat");
                        FAILURE_REPLY.to_string()
                    }
                };
                self.send(OutboundMessage::text(chat_id, reply)).await;
            }
            IncomingMessage::Unrecognized => {
                debug!(update_id, "Ignoring update without text");
            }
        }
    }

    async fn send(&self, message: OutboundMessage) {
        if let Err(e) = self.notifier.notify(&message).await {
            warn!(chat_id = message.chat_id, method = message.method(), error = %e, "Failed to deliver chat message");
        }
    }
}
