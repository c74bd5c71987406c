//! Startup orchestration.
//!
//! # Responsibilities
//! - Open, decode and lint each redirect source in order
//! - Layer every loaded table onto the handler chain
//! - Report which sources were loaded and which were skipped
//!
//! # Design Decisions
//! - Source failures are never fatal: the source is skipped and logged
//! - Each file is read to completion and closed before the next is opened
//! - Runs synchronously, before the listener accepts traffic

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use crate::config::validation::lint_records;
use crate::config::{ServiceConfig, SourceConfig};
use crate::error::SourceError;
use crate::routing::{
    DecoderRegistry, DefaultHandler, FallThrough, Handler, HandlerChain, RedirectTable,
};

/// Result of loading one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceStatus {
    Loaded { entries: usize },
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOutcome {
    pub path: PathBuf,
    pub status: SourceStatus,
}

/// Per-source outcomes, in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupReport {
    pub outcomes: Vec<SourceOutcome>,
}

impl StartupReport {
    pub fn loaded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, SourceStatus::Loaded { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.loaded()
    }
}

/// Read one source into a redirect table.
pub fn load_source(
    source: &SourceConfig,
    registry: &DecoderRegistry,
) -> Result<RedirectTable, SourceError> {
    let path = &source.path;
    let decoder = source
        .resolved_format()
        .and_then(|format| registry.get(format))
        .ok_or_else(|| SourceError::UnknownFormat { path: path.clone() })?;

    let file = File::open(path).map_err(|e| SourceError::Unavailable {
        path: path.clone(),
        source: e,
    })?;
    let records = decoder
        .decode(&mut BufReader::new(file))
        .map_err(|e| SourceError::Decode {
            path: path.clone(),
            source: e,
        })?;

    for issue in lint_records(&records) {
        tracing::warn!(source = %path.display(), %issue, "Suspicious redirect record");
    }

    Ok(RedirectTable::build(records))
}

/// Build the chain described by `config` with the built-in decoders.
pub fn build_service_chain(config: &ServiceConfig) -> (Box<dyn Handler>, StartupReport) {
    build_chain(
        &config.sources,
        &DecoderRegistry::default(),
        config.redirect.fall_through,
    )
}

/// Build the handler chain from `sources`; the last source is consulted first.
pub fn build_chain(
    sources: &[SourceConfig],
    registry: &DecoderRegistry,
    fall_through: FallThrough,
) -> (Box<dyn Handler>, StartupReport) {
    let mut chain = HandlerChain::new(Box::new(DefaultHandler), fall_through);
    let mut report = StartupReport::default();

    for source in sources {
        let status = match load_source(source, registry) {
            Ok(table) => {
                let entries = table.len();
                tracing::info!(source = %source.path.display(), entries, "Redirect source loaded");
                chain = chain.extend(table, source.path.display().to_string());
                SourceStatus::Loaded { entries }
            }
            Err(e) => {
                tracing::warn!(
                    source = %source.path.display(),
                    error = %e,
                    "Skipping redirect source"
                );
                SourceStatus::Skipped { reason: e.to_string() }
            }
        };
        report.outcomes.push(SourceOutcome {
            path: source.path.clone(),
            status,
        });
    }

    tracing::info!(
        loaded = report.loaded(),
        skipped = report.skipped(),
        links = chain.links(),
        "Handler chain built"
    );

    (chain.into_handler(), report)
}
