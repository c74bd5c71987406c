//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → load each source → build handler chain → bind listener
//!
//! Shutdown (shutdown.rs):
//!     SIGINT/SIGTERM → wait_for_signal resolves → server stops accepting → exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config, then chain, then listener (traffic only when ready)
//! - Source failures are diagnostics; only a bind failure is fatal

pub mod shutdown;
pub mod startup;

pub use shutdown::wait_for_signal;
pub use startup::{
    build_chain, build_service_chain, load_source, SourceOutcome, SourceStatus, StartupReport,
};
