use std::path::Path;

use serde::{Deserialize, Serialize};

use self::client::ClientConfig;
use self::logging::LoggingConfig;
use self::server::ServerConfig;

pub mod client;
pub mod logging;
pub mod server;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub client: ClientConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Defaults overridden by `SLOVO_*` environment variables
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Read a JSON config file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config = Self::from_json(&data)?;
        config.apply_env();
        Ok(config)
    }

    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(data)?)
    }

    /// `from_file` when a path is given, `new` otherwise
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::new()),
        }
    }

    fn apply_env(&mut self) {
        self.server.apply_env();
        self.client.apply_env();
        self.logging.apply_env();
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use slovo_core::ReloadPolicy;

    use super::*;

    #[test]
    fn defaults_match_reference_deployment() {
        let config = Config::default();

        assert_eq!(config.server.bind_addr, "127.0.0.1:8081");
        assert_eq!(config.server.reload, ReloadPolicy::OnChange);
        assert!(!config.server.legacy_format);
        assert_eq!(config.client.server_url, "http://localhost:8081");
        assert_eq!(config.client.connect_timeout_ms, 3000);
        assert_eq!(config.client.request_timeout_ms, 5000);
        assert_eq!(config.client.max_retries, 3);
        assert_eq!(config.client.health_timeout_ms, 3000);
        assert_eq!(config.client.demo_words.len(), 5);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = Config::from_json(
            r#"{ "server": { "dictionary_path": "dict.txt", "reload": "every_request" } }"#,
        )
        .unwrap();

        assert_eq!(config.server.dictionary_path.as_deref(), Some("dict.txt"));
        assert_eq!(config.server.reload, ReloadPolicy::EveryRequest);
        assert_eq!(config.server.bind_addr, "127.0.0.1:8081");
        assert_eq!(config.client.max_retries, 3);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn example_config_parses() {
        let config = Config::from_json(include_str!("../../../config.example.json")).unwrap();
        assert_eq!(config.server.dictionary_path, None);
        assert_eq!(config.client.retry_base_delay_ms, 1000);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = Config::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn reads_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "client": {{ "demo_words": ["кот"] }} }}"#).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.client.demo_words, vec!["кот"]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Config::from_file(Path::new("/nonexistent/slovo.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
