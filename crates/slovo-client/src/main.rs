use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use slovo_client::ClientState;
use slovo_config::Config;
use slovo_config::logging::LoggingConfig;
use slovo_translator::TranslationClient;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Client facade for the translation server
#[derive(Parser, Debug)]
#[command(name = "slovo-client", version)]
struct Args {
    /// JSON config file
    #[arg(long, env = "SLOVO_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, e.g. 127.0.0.1:8080
    #[arg(long)]
    bind: Option<String>,

    /// Base URL of the translation server
    #[arg(long)]
    server_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.client.bind_addr = bind;
    }
    if let Some(server_url) = args.server_url {
        config.client.server_url = server_url;
    }

    init_tracing(&config.logging);

    let client = TranslationClient::new(&config.client)?;
    tracing::info!("Forwarding translations to {}", client.base_url());

    let state = Arc::new(ClientState {
        client,
        demo_words: config.client.demo_words.clone(),
    });

    let listener = TcpListener::bind(&config.client.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.client.bind_addr))?;
    tracing::info!("Client facade listening on {}", listener.local_addr()?);

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Shutdown requested");
                shutdown.cancel();
            }
            Err(e) => tracing::error!("failed to listen for ctrl+c: {e}"),
        }
    });

    slovo_client::serve(listener, state, cancel).await?;
    tracing::info!("Client facade stopped");

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
