//! Telegram Bot API channel.
//!
//! Inbound updates arrive by webhook; replies go out through `sendMessage`,
//! `sendPhoto` and `sendAnimation`.
//! Docs: <https://core.telegram.org/bots/api>

pub mod bot;
pub mod client;
pub mod types;

pub use bot::{BotService, WelcomeMessage};
pub use client::{Notifier, TelegramClient};
pub use types::{IncomingMessage, InlineButton, MessageContent, OutboundMessage, Update};
