use std::env;

use serde::{Deserialize, Serialize};
use slovo_core::ReloadPolicy;

fn default_bind_addr() -> String {
    "127.0.0.1:8081".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Dictionary file; the embedded word list is used when unset.
    ///
    /// Keys are compared after stripping diacritics, so `й`/`и` and `ё`/`е`
    /// are the same key and the later line wins.
    #[serde(default)]
    pub dictionary_path: Option<String>,
    #[serde(default)]
    pub reload: ReloadPolicy,
    /// Wrap found translations as `translated: <value> :end`
    #[serde(default)]
    pub legacy_format: bool,
    /// Per-term lookup bound, 0 disables it
    #[serde(default)]
    pub term_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            dictionary_path: None,
            reload: ReloadPolicy::default(),
            legacy_format: false,
            term_timeout_ms: 0,
        }
    }
}

impl ServerConfig {
    pub(crate) fn apply_env(&mut self) {
        if let Ok(bind_addr) = env::var("SLOVO_SERVER_BIND") {
            self.bind_addr = bind_addr;
        }

        if let Ok(path) = env::var("SLOVO_DICTIONARY_PATH") {
            self.dictionary_path = Some(path);
        }

        if let Some(reload) = env::var("SLOVO_RELOAD").ok().and_then(|v| v.parse().ok()) {
            self.reload = reload;
        }

        if let Some(legacy) = env::var("SLOVO_LEGACY_FORMAT").ok().and_then(|v| v.parse().ok()) {
            self.legacy_format = legacy;
        }

        if let Some(ms) = env::var("SLOVO_TERM_TIMEOUT_MS").ok().and_then(|v| v.parse().ok()) {
            self.term_timeout_ms = ms;
        }
    }
}
