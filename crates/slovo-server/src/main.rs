use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use slovo_config::Config;
use slovo_config::logging::LoggingConfig;
use slovo_core::ReloadPolicy;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Dictionary translation server
#[derive(Parser, Debug)]
#[command(name = "slovo-server", version)]
struct Args {
    /// JSON config file
    #[arg(long, env = "SLOVO_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, e.g. 127.0.0.1:8081
    #[arg(long)]
    bind: Option<String>,

    /// Dictionary file, `source=target` per line
    #[arg(long)]
    dictionary: Option<String>,

    /// never, on_change or every_request
    #[arg(long)]
    reload: Option<ReloadPolicy>,

    /// Wrap translations as `translated: <value> :end`
    #[arg(long)]
    legacy_format: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.server.bind_addr = bind;
    }
    if let Some(dictionary) = args.dictionary {
        config.server.dictionary_path = Some(dictionary);
    }
    if let Some(reload) = args.reload {
        config.server.reload = reload;
    }
    if args.legacy_format {
        config.server.legacy_format = true;
    }

    init_tracing(&config.logging);

    let server_config = config.server.clone();
    let service =
        tokio::task::spawn_blocking(move || slovo_server::build_service(&server_config)).await?;

    let listener = TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!("Translation server listening on {}", listener.local_addr()?);

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

    slovo_server::serve(listener, service, cancel).await?;
    tracing::info!("Translation server stopped");

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
