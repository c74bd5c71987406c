//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace span)
//!     → routing::chain (handler chain writes into the sink)
//!     → response.rs (ResponseSink → axum Response)
//!     → Send to client
//! ```

pub mod response;
pub mod server;

pub use response::ResponseSink;
pub use server::{bind, AppState, HttpServer, X_REQUEST_ID};
