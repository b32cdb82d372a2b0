use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use liora_client::api::LioraClient;
use liora_client::cli::{execute_command, Cli};
use liora_client::config::Config;
use liora_client::identity::UserId;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.api.base_url,
        "Liora client starting"
    );

    // Load or create the persistent user identity
    let user_id = match UserId::load_or_create(&config.identity.path) {
        Ok(id) => id,
        Err(e) => {
            error!(error = %e, "Failed to load user identity");
            return Err(e.into());
        }
    };

    // Initialize the backend client
    let client = match LioraClient::new(&config.api, user_id, config.request.clone()) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Failed to initialize backend client");
            return Err(e.into());
        }
    };

    let result = execute_command(cli.command, &client).await;

    if !result.message.is_empty() {
        println!("{}", result.message);
    }
    std::process::exit(result.exit_code);
}

/// Initialize tracing/logging
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        liora_client::config::LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        liora_client::config::LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
