//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! startup (sources loaded/skipped, bind address)
//! per request (TraceLayer span, request id, redirect outcome)
//!     → logging.rs (tracing subscriber: pretty or JSON to stdout)
//! ```

pub mod logging;

pub use logging::init_logging;
