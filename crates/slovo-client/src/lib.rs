use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use slovo_core::query::batch_words;
use slovo_translator::TranslationClient;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

/// Shared by the client-facing handlers
pub struct ClientState {
    pub client: TranslationClient,
    pub demo_words: Vec<String>,
}

pub fn create_routes(state: Arc<ClientState>) -> Router {
    Router::new()
        .route("/api/client/translate/batch", get(translate_batch))
        .route("/api/client/translate/{word}", get(translate))
        .route("/api/client/health", get(health))
        .route("/api/client/test", get(demo))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the client API until `shutdown` is cancelled
pub async fn serve(
    listener: TcpListener,
    state: Arc<ClientState>,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    axum::serve(listener, create_routes(state))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
}

async fn translate(State(state): State<Arc<ClientState>>, Path(word): Path<String>) -> String {
    tracing::info!("API: Received request to translate word: {}", word);
    state.client.translate_word(&word).await
}

async fn translate_batch(
    State(state): State<Arc<ClientState>>,
    RawQuery(query): RawQuery,
) -> Response {
    let words = batch_words(query.as_deref());
    if words.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            "Error: missing required query parameter 'words'",
        )
            .into_response();
    }

    tracing::info!("API: Batch translation request for words: {:?}", words);
    state.client.translate_words(&words).await.join("\n").into_response()
}

async fn health(State(state): State<Arc<ClientState>>) -> String {
    tracing::info!("API: Health check requested");
    state.client.check_health().await
}

async fn demo(State(state): State<Arc<ClientState>>) -> String {
    tracing::info!("API: Test endpoint called");
    state.client.translate_words(&state.demo_words).await.join("\n")
}
