//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the optional
//! TOML service config file. Every field has a default so an empty file
//! (or no file) is a valid configuration.

use std::path::PathBuf;

use serde::Deserialize;

use crate::routing::{FallThrough, SourceFormat};

/// Root configuration for the redirector.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Redirect sources, in load order. Later sources take precedence.
    pub sources: Vec<SourceConfig>,

    /// Redirect behavior.
    pub redirect: RedirectConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            sources: vec![
                SourceConfig::new(DEFAULT_YAML_SOURCE, Some(SourceFormat::Yaml)),
                SourceConfig::new(DEFAULT_JSON_SOURCE, Some(SourceFormat::Json)),
            ],
            redirect: RedirectConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

pub const DEFAULT_YAML_SOURCE: &str = "paths.yaml";
pub const DEFAULT_JSON_SOURCE: &str = "paths.json";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}

/// One redirect source file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SourceConfig {
    /// File to read.
    pub path: PathBuf,

    /// Explicit format; inferred from the extension when absent.
    #[serde(default)]
    pub format: Option<SourceFormat>,
}

impl SourceConfig {
    pub fn new(path: impl Into<PathBuf>, format: Option<SourceFormat>) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Explicit format, falling back to the file extension.
    pub fn resolved_format(&self) -> Option<SourceFormat> {
        self.format.or_else(|| SourceFormat::from_path(&self.path))
    }
}

/// Redirect behavior.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RedirectConfig {
    /// What to do after a redirect has been written.
    pub fall_through: FallThrough,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` overrides it.
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.sources[0].path, PathBuf::from("paths.yaml"));
        assert_eq!(config.sources[1].resolved_format(), Some(SourceFormat::Json));
        assert_eq!(config.redirect.fall_through, FallThrough::Stop);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn test_full_document() {
        let text = r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [[sources]]
            path = "rules/extra.yml"

            [[sources]]
            path = "rules/override"
            format = "json"

            [redirect]
            fall_through = "continue"

            [observability]
            log_level = "debug"
            log_format = "json"
        "#;
        let config: ServiceConfig = toml::from_str(text).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.sources[0].resolved_format(), Some(SourceFormat::Yaml));
        assert_eq!(config.sources[1].resolved_format(), Some(SourceFormat::Json));
        assert_eq!(config.redirect.fall_through, FallThrough::Continue);
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_extension_without_format() {
        let source = SourceConfig::new("rules.txt", None);
        assert_eq!(source.resolved_format(), None);
    }
}
