use axum::Json;
use axum::extract::{Path, Query, RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use slovo_core::query::batch_words;
use slovo_core::{Lookup, TranslationService};

pub const HEALTH_OK: &str = "Server is running";

#[derive(Debug, Default, Deserialize)]
pub struct TranslateParams {
    /// `json` returns the tagged lookup instead of plain text
    pub format: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranslationBody<'a> {
    pub term: &'a str,
    pub result: &'a Lookup,
}

/// `GET /api/translate/{term}`
pub async fn translate(
    State(service): State<TranslationService>,
    Path(term): Path<String>,
    Query(params): Query<TranslateParams>,
) -> Response {
    tracing::info!("Received translation request for word: {}", term);

    let lookup = service.translate_one(&term).await;
    let status = if lookup.is_error() {
        tracing::error!("Error translating word: {}: {}", term, lookup);
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };

    if params.format.as_deref() == Some("json") {
        let body = TranslationBody {
            term: &term,
            result: &lookup,
        };
        return (status, Json(body)).into_response();
    }

    (status, lookup.to_string()).into_response()
}

/// `GET /api/translate/batch?words=a&words=b`, newline-delimited results
pub async fn translate_batch(
    State(service): State<TranslationService>,
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

    tracing::info!("Received batch translation request for {} words", words.len());
    service.translate_batch(&words).await.join("\n").into_response()
}

/// `GET /api/translate/health`
pub async fn health() -> &'static str {
    HEALTH_OK
}
