use clap::{Parser, Subcommand};
use shortwire::admin::{self, AdminCommands};
use shortwire::config::{Config, LogFormat, Variant};
use shortwire::error::AppResult;
use shortwire::server;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// shortwire - URL shortener with an HTTP API and a Telegram bot front end
#[derive(Parser, Debug)]
#[command(name = "shortwire")]
#[command(version)]
#[command(about = "URL shortener with an HTTP API and a Telegram bot front end", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the JSON API (302 redirects, click counting)
    Api {
        /// Host to bind to (overrides SERVER_HOST env var)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides SERVER_PORT env var)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Serve the Telegram webhook (301 redirects)
    Bot {
        /// Host to bind to (overrides SERVER_HOST env var)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides SERVER_PORT env var)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Administrative commands
    Admin {
        #[command(subcommand)]
        admin_command: AdminCommands,
    },
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    init_tracing(config.log_format);

    match cli.command {
        Commands::Api { host, port } => {
            override_bind(&mut config, host, port);
            server::run_server(config, Variant::Api).await
        }
        Commands::Bot { host, port } => {
            override_bind(&mut config, host, port);
            server::run_server(config, Variant::Bot).await
        }
        Commands::Admin { admin_command } => admin::run(config, admin_command).await,
    }
}

fn override_bind(config: &mut Config, host: Option<String>, port: Option<u16>) {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
}
