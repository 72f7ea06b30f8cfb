//! Main entry point for the translation gateway CLI

#![forbid(unsafe_code)]

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use translation_gateway::cli::commands::{self, Commands};
use translation_gateway::GatewayConfig;

/// AI translation assistant - Chinese-to-English translation with keyword extraction
#[derive(Parser, Debug)]
#[command(name = "translation-gateway", version, about, long_about = None)]
struct Args {
    /// API key for DeepSeek (optional, defaults to DEEPSEEK_API_KEY env var)
    #[arg(long)]
    api_key: Option<String>,

    /// JSON configuration file (DEEPSEEK_API_KEY still applies when it has no api_key)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::from_filename("api.env").ok();
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let debug = args.verbose || matches!(args.command, Some(Commands::Serve { debug: true, .. }));
    let log_level = if debug { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("translation_gateway={},tower_http={}", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = GatewayConfig::load(args.config.as_deref())?;

    if let Some(api_key) = args.api_key {
        config = config.with_api_key(api_key);
    }

    // Execute command
    match args.command {
        Some(Commands::Serve { host, port, debug }) => {
            commands::handle_serve(config, host, port, debug).await?;
        }
        Some(Commands::Translate { text, file, json }) => {
            commands::handle_translate(config, text, file, json).await?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
