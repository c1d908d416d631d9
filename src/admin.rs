//! Administrative command handlers.
//!
//! Webhook registration against the Telegram Bot API and store statistics.

use crate::config::{Config, Variant};
use crate::error::AppResult;
use crate::services::{LinkService, LinkSettings, RecordLayout};
use crate::store;
use crate::telegram::TelegramClient;
use clap::Subcommand;
use tracing::info;

/// Administrative commands available via CLI.
#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// Point the bot's webhook at this deployment
    SetWebhook {
        /// Public URL Telegram should POST updates to
        #[arg(long)]
        url: String,
    },

    /// Remove the bot's webhook
    DeleteWebhook,

    /// Show statistics for the configured store
    Stats,
}

/// Run an administrative command with the given configuration.
pub async fn run(config: Config, admin_command: AdminCommands) -> AppResult<()> {
    match admin_command {
        AdminCommands::SetWebhook { url } => set_webhook(config, &url).await,
        AdminCommands::DeleteWebhook => delete_webhook(config).await,
        AdminCommands::Stats => stats(config).await,
    }
}

fn telegram_client(config: &Config) -> AppResult<TelegramClient> {
    TelegramClient::new(
        &config.telegram.api_url,
        config.require_bot_token()?,
        config.http.timeout(),
    )
}

async fn set_webhook(config: Config, url: &str) -> AppResult<()> {
    crate::services::parse_web_url(url)?;

    info!("Registering webhook...");
    telegram_client(&config)?.set_webhook(url).await?;

    info!("Webhook set to {}", url);
    Ok(())
}

async fn delete_webhook(config: Config) -> AppResult<()> {
    info!("Removing webhook...");
    telegram_client(&config)?.delete_webhook().await?;

    info!("Webhook removed");
    Ok(())
}

/// Display statistics.
async fn stats(config: Config) -> AppResult<()> {
    info!("Fetching statistics...");

    let store = store::connect(&config.store).await?;
    let links = LinkService::new(
        store,
        LinkSettings {
            code_length: config.url.code_length(Variant::Api),
            max_attempts: config.url.short_code_max_attempts,
            layout: RecordLayout::Descriptor,
        },
    );

    let stats = links.stats().await?;

    println!("\n=== shortwire Statistics ===");
    println!("Total links:     {}", stats.total_links);
    println!("Tracked links:   {}", stats.tracked_links);
    println!("Total clicks:    {}", stats.total_clicks);
    println!();

    Ok(())
}
