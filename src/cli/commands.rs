//! CLI command definitions and handlers

use clap::Subcommand;
use std::path::PathBuf;

use crate::core::client::TranslationGateway;
use crate::core::config::GatewayConfig;

/// Commands for the translation gateway
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP API server
    Serve {
        /// Bind address (default: 0.0.0.0)
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Listen port (default: 8000)
        #[arg(short, long, default_value_t = 8000)]
        port: u16,

        /// Enable debug mode
        #[arg(long)]
        debug: bool,
    },

    /// Translate a single text and print the result
    Translate {
        /// Chinese text to translate
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        text: Option<String>,

        /// Read the text from a file instead
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle server command
pub async fn handle_serve(
    config: GatewayConfig,
    host: String,
    port: u16,
    debug: bool,
) -> anyhow::Result<()> {
    use crate::server::api::run_server;
    use tracing::{debug, info};

    if debug {
        debug!("Debug mode enabled");
    }

    let gateway = TranslationGateway::new(config)?;

    info!("Starting HTTP server on {}:{}", host, port);
    println!("🚀 Server starting on http://{}:{}", host, port);
    println!("📄 OpenAPI document: http://{}:{}/openapi.json", host, port);

    run_server(gateway, host, port).await?;

    Ok(())
}

/// Handle one-shot translate command
pub async fn handle_translate(
    config: GatewayConfig,
    text: Option<String>,
    file: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::{Duration, Instant};
    use tracing::info;

    let text = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => {
            info!("Reading text from {}", path.display());
            tokio::fs::read_to_string(&path).await?
        }
        (None, None) => anyhow::bail!("Either TEXT or --file is required"),
    };

    let gateway = TranslationGateway::new(config)?;
    let start_time = Instant::now();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message("Translating...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = gateway.translate(&text).await;
    spinner.finish_and_clear();

    let result = result?;
    info!("Completed in {:?}", start_time.elapsed());

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.translation);
        if !result.keywords.is_empty() {
            println!("\n🔑 Keywords: {}", result.keywords.join(", "));
        }
    }

    Ok(())
}
