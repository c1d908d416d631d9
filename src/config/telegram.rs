use serde::Deserialize;

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather; required by the bot variant
    pub bot_token: Option<String>,

    /// Bot API base URL
    pub api_url: String,

    /// Repository link shown on the landing route and in the welcome message
    pub repo_url: Option<String>,

    /// Photo sent with the welcome message
    pub welcome_photo_url: Option<String>,

    /// Animation sent with the welcome message; preferred over the photo
    pub welcome_animation_url: Option<String>,
}

impl TelegramConfig {
    /// Validate Telegram configuration values
    pub fn validate(&self) -> Result<(), String> {
        if let Some(token) = &self.bot_token {
            if token.trim().is_empty() || token.contains('/') {
                return Err("TELEGRAM_BOT_TOKEN is malformed".to_string());
            }
        }

        if ::url::Url::parse(&self.api_url).is_err() {
            return Err("TELEGRAM_API_URL must be an absolute URL".to_string());
        }

        Ok(())
    }
}
