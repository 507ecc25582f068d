use axum::Router;
use axum::routing::get;
use slovo_core::TranslationService;
use tower_http::trace::TraceLayer;

use crate::handlers::{health, translate, translate_batch};

pub fn create_routes(service: TranslationService) -> Router {
    Router::new()
        .route("/api/translate/health", get(health))
        .route("/api/translate/batch", get(translate_batch))
        .route("/api/translate/{term}", get(translate))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
