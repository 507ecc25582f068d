use std::sync::Arc;
use std::time::Duration;

use slovo_config::server::ServerConfig;
use slovo_core::{DictionarySource, DictionaryStore, ServiceOptions, TranslationService};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

pub mod handlers;
pub mod routes;

pub use routes::create_routes;

/// Open the dictionary store and wrap it in a service.
///
/// Blocking: reads the dictionary source.
pub fn build_service(config: &ServerConfig) -> TranslationService {
    let source = DictionarySource::from_path(config.dictionary_path.as_deref());
    tracing::info!("Dictionary source: {:?} (reload: {:?})", source, config.reload);

    let store = DictionaryStore::open(source, config.reload);
    let options = ServiceOptions {
        legacy_format: config.legacy_format,
        term_timeout: (config.term_timeout_ms > 0)
            .then(|| Duration::from_millis(config.term_timeout_ms)),
    };

    TranslationService::new(Arc::new(store), options)
}

/// Serve the translation API until `shutdown` is cancelled
pub async fn serve(
    listener: TcpListener,
    service: TranslationService,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    axum::serve(listener, create_routes(service))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
}
