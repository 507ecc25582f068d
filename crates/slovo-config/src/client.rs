use std::env;

use serde::{Deserialize, Serialize};

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_server_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_connect_timeout_ms() -> u64 {
    3000
}

fn default_request_timeout_ms() -> u64 {
    5000
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    1000
}

fn default_health_timeout_ms() -> u64 {
    3000
}

fn default_demo_words() -> Vec<String> {
    ["привет", "мир", "дом", "кот", "собака"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ClientConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Base URL of the translation server
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Per-attempt response timeout
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Retries after the first attempt, transient failures only
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// First backoff delay, doubled on every retry
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_health_timeout_ms")]
    pub health_timeout_ms: u64,
    /// Words translated by the test endpoint
    #[serde(default = "default_demo_words")]
    pub demo_words: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            server_url: default_server_url(),
            connect_timeout_ms: default_connect_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            health_timeout_ms: default_health_timeout_ms(),
            demo_words: default_demo_words(),
        }
    }
}

impl ClientConfig {
    pub(crate) fn apply_env(&mut self) {
        if let Ok(bind_addr) = env::var("SLOVO_CLIENT_BIND") {
            self.bind_addr = bind_addr;
        }

        if let Ok(server_url) = env::var("SLOVO_SERVER_URL") {
            self.server_url = server_url;
        }

        if let Some(retries) = env::var("SLOVO_MAX_RETRIES").ok().and_then(|v| v.parse().ok()) {
            self.max_retries = retries;
        }
    }
}
