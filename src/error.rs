//! Error taxonomy for the redirector.
//!
//! # Recovery
//! - [`DecodeError`] and [`SourceError`] are recovered at startup: the
//!   offending source is skipped and a diagnostic is logged.
//! - [`ConfigError`] and [`ServerError`] are fatal: the process exits.
//! - Nothing here is ever surfaced to an HTTP client.

use std::path::PathBuf;

/// A source's content did not match the `[{path, url}, ...]` schema.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to turn one configured source into a redirect table.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("cannot open {}: {source}", .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot determine format of {}", .path.display())]
    UnknownFormat { path: PathBuf },

    #[error("cannot decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
}

/// Failure to load the service configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Failure to run the HTTP server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("unable to bind {address}: {source}")]
    Listen {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}
