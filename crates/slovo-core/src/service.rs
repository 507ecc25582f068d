use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinSet;

use crate::lookup::{Lookup, collate};
use crate::normalize::{Normalizer, TextNormalizer};
use crate::resolve::resolve;
use crate::store::DictionaryStore;

#[derive(Debug, Clone, Default)]
pub struct ServiceOptions {
    /// Wrap found translations as `translated: <value> :end`
    pub legacy_format: bool,
    /// Upper bound for a single lookup
    pub term_timeout: Option<Duration>,
}

/// Normalize, resolve and render translations against a [`DictionaryStore`].
#[derive(Clone)]
pub struct TranslationService {
    store: Arc<DictionaryStore>,
    options: ServiceOptions,
}

impl TranslationService {
    pub fn new(store: Arc<DictionaryStore>, options: ServiceOptions) -> Self {
        Self { store, options }
    }

    /// Translate one term. Never fails; internal errors become [`Lookup::SystemError`].
    pub async fn translate_one(&self, term: &str) -> Lookup {
        tracing::info!("START translation for: {}", term);
        let started = Instant::now();

        let store = Arc::clone(&self.store);
        let legacy_format = self.options.legacy_format;
        let owned = term.to_string();

        let task = tokio::task::spawn_blocking(move || {
            lookup_blocking(&store, &owned, legacy_format)
        });

        let joined = match self.options.term_timeout {
            Some(limit) => match tokio::time::timeout(limit, task).await {
                Ok(joined) => joined,
                Err(_) => {
                    tracing::warn!("Translation of '{}' timed out after {:?}", term, limit);
                    return Lookup::SystemError(format!("translation timed out after {limit:?}"));
                }
            },
            None => task.await,
        };

        let lookup = joined.unwrap_or_else(|e| {
            tracing::error!("Translation task for '{}' failed: {}", term, e);
            Lookup::SystemError(e.to_string())
        });

        tracing::info!(
            "END translation for {}: {} (took {} ms)",
            term,
            lookup,
            started.elapsed().as_millis()
        );

        lookup
    }

    /// Translate every term independently, then case-fold, de-duplicate and sort.
    ///
    /// Input order is not preserved. A failed term contributes its error string.
    pub async fn translate_batch(&self, terms: &[String]) -> Vec<String> {
        tracing::info!("Starting batch translation of {} words", terms.len());

        let mut tasks = JoinSet::new();
        for term in terms {
            let service = self.clone();
            let term = term.clone();
            tasks.spawn(async move { service.translate_one(&term).await.to_string() });
        }

        let mut rendered = Vec::with_capacity(terms.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(text) => rendered.push(text),
                Err(e) => {
                    tracing::error!("Batch task failed: {}", e);
                    rendered.push(Lookup::SystemError(e.to_string()).to_string());
                }
            }
        }

        let results = collate(rendered);
        tracing::debug!("Batch produced {} distinct results", results.len());
        results
    }
}

fn lookup_blocking(store: &DictionaryStore, term: &str, legacy_format: bool) -> Lookup {
    let normalizer = TextNormalizer;
    let normalized = normalizer.normalize(term);
    tracing::debug!("Normalized: '{}'", normalized);

    let dictionary = store.snapshot();

    match resolve(&normalized, &dictionary) {
        Some(hit) => {
            tracing::debug!("'{}' matched '{}' ({:?})", normalized, hit.key, hit.kind);
            let value = if legacy_format {
                format!("translated: {} :end", normalizer.normalize(hit.translation))
            } else {
                hit.translation.to_string()
            };
            Lookup::Found(value)
        }
        None => Lookup::NotFound,
    }
}
