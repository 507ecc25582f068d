use std::time::Duration;

use reqwest::StatusCode;
use slovo_config::client::ClientConfig;
use slovo_core::lookup::collate;
use tokio::task::JoinSet;
use url::Url;


/// Prefix of the fallback returned when a word could not be translated
pub const TRANSLATE_FAILED: &str = "ERROR: Failed to translate - ";

/// Prefix of the fallback returned when the health check fails
pub const SERVER_UNAVAILABLE: &str = "Server is unavailable: ";

/// Retry bounds for outbound calls. Delays double after every attempt.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn delay(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// HTTP client for the translation server.
///
/// The `translate_*` and `check_health` methods never fail: errors are turned
/// into descriptive strings. The `try_*` variants expose the error.
#[derive(Clone)]
pub struct TranslationClient {
    client: reqwest::Client,
    base_url: Url,
    retry: RetryPolicy,
    health_timeout: Duration,
}

impl TranslationClient {
    pub fn new(config: &ClientConfig) -> Result<Self, TranslateError> {
        let base_url = Url::parse(&config.server_url)?;
        if base_url.cannot_be_a_base() {
            return Err(TranslateError::InvalidBaseUrl(config.server_url.clone()));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(concat!("slovo-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            retry: RetryPolicy {
                max_retries: config.max_retries,
                base_delay: Duration::from_millis(config.retry_base_delay_ms),
            },
            health_timeout: Duration::from_millis(config.health_timeout_ms),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Translate one word, mapping any failure to a fallback string
    pub async fn translate_word(&self, term: &str) -> String {
        tracing::info!("Sending translation request for: {}", term);

        match self.try_translate_word(term).await {
            Ok(translation) => {
                tracing::info!("Translation received: {} -> {}", term, translation);
                translation
            }
            Err(e) => {
                tracing::error!("Failed to translate '{}': {}", term, e);
                format!("{TRANSLATE_FAILED}{e}")
            }
        }
    }

    pub async fn try_translate_word(&self, term: &str) -> Result<String, TranslateError> {
        let url = self.endpoint(&["api", "translate", term]);
        let response = self.get_with_retry(url).await?;
        Ok(response.text().await?)
    }

    /// Translate words concurrently, then case-fold, de-duplicate and sort
    pub async fn translate_words(&self, terms: &[String]) -> Vec<String> {
        tracing::info!("Starting batch translation of {} words", terms.len());

        let mut tasks = JoinSet::new();
        for term in terms {
            let client = self.clone();
            let term = term.clone();
            tasks.spawn(async move { client.translate_word(&term).await });
        }

        let mut translations = Vec::with_capacity(terms.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(text) => translations.push(text),
                Err(e) => {
                    tracing::error!("Batch task failed: {}", e);
                    translations.push(format!("{TRANSLATE_FAILED}{e}"));
                }
            }
        }

        tracing::info!(
            "Batch translation completed. Processing {} results",
            translations.len()
        );
        collate(translations)
    }

    /// Server health string, or a description of why it could not be reached
    pub async fn check_health(&self) -> String {
        tracing::info!("Checking server health...");

        self.try_check_health()
            .await
            .unwrap_or_else(|e| format!("{SERVER_UNAVAILABLE}{e}"))
    }

    /// Single attempt bounded by the health timeout, no retries
    pub async fn try_check_health(&self) -> Result<String, TranslateError> {
        let url = self.endpoint(&["api", "translate", "health"]);

        tokio::time::timeout(self.health_timeout, self.get_once(url))
            .await
            .map_err(|_| TranslateError::Timeout(self.health_timeout))?
    }

    async fn get_once(&self, url: Url) -> Result<String, TranslateError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::from_response(status, response).await);
        }
        Ok(response.text().await?)
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_with_retry(&self, url: Url) -> Result<reqwest::Response, TranslateError> {
        let mut attempt = 0;

        loop {
            tracing::info!("Request: GET {}", url);

            let error = match self.client.get(url.clone()).send().await {
                Ok(response) => {
                    let status = response.status();
                    tracing::info!("Response status: {}", status);
                    if status.is_success() {
                        return Ok(response);
                    }
                    TranslateError::from_response(status, response).await
                }
                Err(e) => TranslateError::Network(e),
            };

            if !error.is_transient() || attempt >= self.retry.max_retries {
                return Err(error);
            }

            let delay = self.retry.delay(attempt);
            attempt += 1;
            tracing::warn!(
                "Retrying request due to error: {} (retry {}/{} in {}ms)",
                error,
                attempt,
                self.retry.max_retries,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Server URL cannot be used as a base: {0}")]
    InvalidBaseUrl(String),

    #[error("No response within {0:?}")]
    Timeout(Duration),
}

impl TranslateError {
    async fn from_response(status: StatusCode, response: reqwest::Response) -> Self {
        let body = response.text().await.unwrap_or_default();
        Self::Status {
            status,
            body: body.trim().to_string(),
        }
    }

    /// Worth another attempt: connect failures, timeouts, 408, 429 and 5xx
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(e) => e.is_connect() || e.is_timeout(),
            Self::Status { status, .. } => {
                *status == StatusCode::REQUEST_TIMEOUT
                    || *status == StatusCode::TOO_MANY_REQUESTS
                    || status.is_server_error()
            }
            Self::Timeout(_) => true,
            Self::InvalidUrl(_) | Self::InvalidBaseUrl(_) => false,
        }
    }
}
