//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::schema::{DEFAULT_JSON_SOURCE, DEFAULT_YAML_SOURCE};
use crate::config::{LogFormat, ServiceConfig, SourceConfig};
use crate::routing::{FallThrough, SourceFormat};

#[derive(Debug, Parser)]
#[command(name = "redirector")]
#[command(
    version,
    about = "Redirect request paths to URLs listed in YAML, JSON or TOML files",
    long_about = None
)]
pub struct Cli {
    /// YAML redirect source [default: paths.yaml]
    #[arg(long, alias = "YAML", value_name = "PATH")]
    pub yaml: Option<PathBuf>,

    /// JSON redirect source [default: paths.json]
    #[arg(long, alias = "JSON", value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// TOML redirect source, loaded last
    #[arg(long, value_name = "PATH")]
    pub toml: Option<PathBuf>,

    /// Service config file (TOML)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Listen address [default: 0.0.0.0:8080]
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// After a redirect, also run the next handler in the chain
    #[arg(long)]
    pub fall_through: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Whether any redirect source was named on the command line.
    pub fn names_sources(&self) -> bool {
        self.yaml.is_some() || self.json.is_some() || self.toml.is_some()
    }

    /// Apply command-line overrides on top of `config`.
    pub fn apply(&self, mut config: ServiceConfig) -> ServiceConfig {
        if self.names_sources() {
            let yaml = self.yaml.clone().unwrap_or_else(|| DEFAULT_YAML_SOURCE.into());
            let json = self.json.clone().unwrap_or_else(|| DEFAULT_JSON_SOURCE.into());

            config.sources = vec![
                SourceConfig::new(yaml, Some(SourceFormat::Yaml)),
                SourceConfig::new(json, Some(SourceFormat::Json)),
            ];
            if let Some(toml) = &self.toml {
                config.sources.push(SourceConfig::new(toml.clone(), Some(SourceFormat::Toml)));
            }
        }

        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if self.fall_through {
            config.redirect.fall_through = FallThrough::Continue;
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.observability.log_format = format;
        }

        config
    }
}
