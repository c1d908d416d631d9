use serde::{Deserialize, Serialize};

/// Inbound webhook payload. Only the fields the bot reads are modeled.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// What the bot was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomingMessage {
    /// `/start`, possibly addressed as `/start@botname`
    Start { chat_id: i64 },
    /// Any other text; a candidate URL
    Text { chat_id: i64, text: String },
    /// No message, or a message without text (stickers, photos, joins...)
    Unrecognized,
}

impl From<Update> for IncomingMessage {
    fn from(update: Update) -> Self {
        let Some(message) = update.message else {
            return IncomingMessage::Unrecognized;
        };
        let Some(text) = message.text else {
            return IncomingMessage::Unrecognized;
        };
        let chat_id = message.chat.id;

        if is_start_command(&text) {
            IncomingMessage::Start { chat_id }
        } else {
            IncomingMessage::Text { chat_id, text }
        }
    }
}

fn is_start_command(text: &str) -> bool {
    match text.strip_prefix("/start") {
        Some("") => true,
        Some(rest) => rest.strip_prefix('@').is_some_and(|bot| {
            !bot.is_empty() && !bot.contains(char::is_whitespace)
        }),
        None => false,
    }
}

/// One button of an inline keyboard that opens a link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineButton {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineButton>>,
}

/// Body of an outbound message; each variant maps to one Bot API method
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text {
        text: String,
    },
    Photo {
        photo: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    Animation {
        animation: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
}

/// A message addressed to one chat, serialized as the Bot API request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub chat_id: i64,
    #[serde(flatten)]
    pub content: MessageContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl OutboundMessage {
    pub fn text(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            content: MessageContent::Text { text: text.into() },
            reply_markup: None,
        }
    }

    /// Attach a single row of link buttons. An empty row attaches nothing.
    pub fn with_buttons(mut self, buttons: Vec<InlineButton>) -> Self {
        self.reply_markup = if buttons.is_empty() {
            None
        } else {
            Some(InlineKeyboardMarkup {
                inline_keyboard: vec![buttons],
            })
        };
        self
    }

    /// Bot API method that delivers this message
    pub fn method(&self) -> &'static str {
        match self.content {
            MessageContent::Text { .. } => "sendMessage",
            MessageContent::Photo { .. } => "sendPhoto",
            MessageContent::Animation { .. } => "sendAnimation",
        }
    }
}

/// Envelope of every Bot API response
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn update(value: serde_json::Value) -> IncomingMessage {
        serde_json::from_value::<Update>(value).unwrap().into()
    }

    #[test]
    fn test_start_command() {
        let incoming = update(json!({
            "update_id": 1,
            "message": {"message_id": 7, "chat": {"id": 42, "type": "private"}, "text": "/start"}
        }));
        assert_eq!(incoming, IncomingMessage::Start { chat_id: 42 });
    }

    #[test]
    fn test_start_addressed_to_bot() {
        assert!(is_start_command("/start@shortwire_bot"));
        assert!(!is_start_command("/start@"));
        assert!(!is_start_command("/starting"));
        assert!(!is_start_command("/start now"));
        assert!(!is_start_command("start"));
    }

    #[test]
    fn test_text_message() {
        let incoming = update(json!({
            "update_id": 2,
            "message": {"message_id": 8, "chat": {"id": -100}, "text": "https://example.com"}
        }));
        assert_eq!(
            incoming,
            IncomingMessage::Text {
                chat_id: -100,
                text: "https://example.com".to_string()
            }
        );
    }

    #[test]
    fn test_non_text_message() {
        let incoming = update(json!({
            "update_id": 3,
            "message": {"message_id": 9, "chat": {"id": 42}, "sticker": {"file_id": "x"}}
        }));
        assert_eq!(incoming, IncomingMessage::Unrecognized);
    }

    #[test]
    fn test_only_chat_and_text_are_required() {
        let incoming = update(json!({"message": {"chat": {"id": 5}, "text": "/start"}}));
        assert_eq!(incoming, IncomingMessage::Start { chat_id: 5 });
    }

    #[test]
    fn test_update_without_message() {
        let incoming = update(json!({"update_id": 4, "edited_message": {}}));
        assert_eq!(incoming, IncomingMessage::Unrecognized);
    }

    #[test]
    fn test_outbound_text_body() {
        let message = OutboundMessage::text(42, "hello");
        assert_eq!(message.method(), "sendMessage");
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({"chat_id": 42, "text": "hello"})
        );
    }

    #[test]
    fn test_outbound_animation_with_keyboard() {
        let message = OutboundMessage {
            chat_id: 42,
            content: MessageContent::Animation {
                animation: "https://cdn.example/welcome.gif".to_string(),
                caption: Some("Welcome!".to_string()),
            },
            reply_markup: None,
        }
        .with_buttons(vec![InlineButton {
            text: "View on GitHub".to_string(),
            url: "https://github.com/example/shortwire".to_string(),
        }]);

        assert_eq!(message.method(), "sendAnimation");
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "chat_id": 42,
                "animation": "https://cdn.example/welcome.gif",
                "caption": "Welcome!",
                "reply_markup": {
                    "inline_keyboard": [[
                        {"text": "View on GitHub", "url": "https://github.com/example/shortwire"}
                    ]]
                }
            })
        );
    }

    #[test]
    fn test_photo_without_caption() {
        let message = OutboundMessage {
            chat_id: 1,
            content: MessageContent::Photo {
                photo: "https://cdn.example/p.png".to_string(),
                caption: None,
            },
            reply_markup: None,
        }
        .with_buttons(Vec::new());

        assert_eq!(message.method(), "sendPhoto");
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({"chat_id": 1, "photo": "https://cdn.example/p.png"})
        );
    }
}
