//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (per source):
//!     byte stream
//!     → decoder.rs (format adapter → Vec<RedirectRecord>)
//!     → table.rs (fold into RedirectTable, last record wins)
//!     → chain.rs (wrap current handler)
//!
//! Per request:
//!     path → newest table → … → oldest table → DefaultHandler
//! ```
//!
//! # Design Decisions
//! - Tables and chain are built at startup, immutable at runtime
//! - Exact path matching only
//! - Sources are layered, never merged

pub mod chain;
pub mod decoder;
pub mod record;
pub mod table;

pub use chain::{extend, DefaultHandler, FallThrough, Handler, HandlerChain, RedirectHandler};
pub use decoder::{
    DecoderRegistry, JsonDecoder, RecordDecoder, SourceFormat, TomlDecoder, YamlDecoder,
};
pub use record::RedirectRecord;
pub use table::RedirectTable;
