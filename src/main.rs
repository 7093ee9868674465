//! PDF Form Server - Entry point
//!
//! Serves uploaded PDFs and their AcroForm text-field values over HTTP.

use clap::Parser;
use pdf_form_server::{run_server_with_config, Args, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from(Args::parse());

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdf_form_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting PDF Form Server");

    run_server_with_config(config).await
}
