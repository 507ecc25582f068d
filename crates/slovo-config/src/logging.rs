use std::env;

use serde::{Deserialize, Serialize};

fn default_filter() -> String {
    "info".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Used when `RUST_LOG` is not set
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

impl LoggingConfig {
    pub(crate) fn apply_env(&mut self) {
        if let Ok(filter) = env::var("SLOVO_LOG_FILTER") {
            self.filter = filter;
        }

        if let Some(json) = env::var("SLOVO_LOG_JSON").ok().and_then(|v| v.parse().ok()) {
            self.json = json;
        }
    }
}
