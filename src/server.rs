//! Server startup and shutdown.
//!
//! `run_server` wires the store, the link service and the variant-specific
//! collaborators into a router, then serves it until a shutdown signal.

use crate::config::{Config, Variant};
use crate::error::{AppError, AppResult};
use crate::routes;
use crate::services::{LinkService, LinkSettings, QrServerClient, RecordLayout};
use crate::state::{AppState, BotState};
use crate::store;
use crate::telegram::{BotService, TelegramClient, WelcomeMessage};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// Run one deployment variant with the given configuration.
///
/// # Errors
///
/// - store connection or configuration failures
/// - `AppError::MissingEnvVar` when the bot variant has no token
/// - bind or runtime errors from the listener
pub async fn run_server(config: Config, variant: Variant) -> AppResult<()> {
    info!(?variant, "Starting shortwire server...");

    let store = store::connect(&config.store).await?;
    match store.ping().await {
        Ok(()) => info!(backend = ?config.store.backend, "Store connection verified"),
        Err(e) => warn!("Store ping failed: {}. Continuing anyway.", e),
    }

    let layout = match variant {
        Variant::Api => RecordLayout::Descriptor,
        Variant::Bot => RecordLayout::BareUrl,
    };
    let links = LinkService::new(
        store,
        LinkSettings {
            code_length: config.url.code_length(variant),
            max_attempts: config.url.short_code_max_attempts,
            layout,
        },
    );

    let app = match variant {
        Variant::Api => build_api(&config, links)?,
        Variant::Bot => build_bot(&config, links)?,
    };

    let addr = config.server.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to bind to address {}: {}", addr, e)))?;

    info!("Server listening on {}", addr);
    match config.url.base_url.as_deref() {
        Some(base_url) => info!("Base URL: {}", base_url),
        None => info!("Base URL: derived from request Host header"),
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(create_shutdown_signal())
        .await
        .map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}

fn build_api(config: &Config, links: LinkService) -> AppResult<Router> {
    let qr = QrServerClient::new(
        config.qr.api_url.clone(),
        config.http.timeout(),
    )?;

    let state = Arc::new(AppState {
        links,
        qr: Arc::new(qr),
        base_url: config.url.base_url.clone(),
    });

    Ok(routes::create_api_router(state))
}

fn build_bot(config: &Config, links: LinkService) -> AppResult<Router> {
    let telegram = TelegramClient::new(
        &config.telegram.api_url,
        config.require_bot_token()?,
        config.http.timeout(),
    )?;

    let welcome = WelcomeMessage {
        repo_url: config.telegram.repo_url.clone(),
        photo_url: config.telegram.welcome_photo_url.clone(),
        animation_url: config.telegram.welcome_animation_url.clone(),
    };

    let state = Arc::new(BotState {
        bot: BotService::new(links.clone(), Arc::new(telegram), welcome),
        links,
        base_url: config.url.base_url.clone(),
        repo_url: config.telegram.repo_url.clone(),
    });

    Ok(routes::create_bot_router(state))
}

/// Resolves on Ctrl+C, or on SIGTERM on Unix.
///
/// A signal that cannot be installed is logged and never fires.
async fn create_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    #[cfg(not(unix))]
    ctrl_c.await;

    info!("Shutdown signal received");
}
