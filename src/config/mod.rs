//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → optional service config file (loader.rs, TOML)
//!     → CLI overrides (cli.rs)
//!     → ServiceConfig (immutable)
//!
//! Per redirect source, after decoding:
//!     → validation.rs (lint records, log warnings)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults to allow minimal configs
//! - Record linting warns but never rejects

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::load_config;
pub use schema::{
    ListenerConfig, LogFormat, ObservabilityConfig, RedirectConfig, ServiceConfig, SourceConfig,
};
