//! Handler chain: redirect tables layered over a default handler.
//!
//! ```text
//! request → [newest table] → … → [oldest table] → DefaultHandler
//!              hit: 302 Found + Location
//!              miss: delegate to fallback
//! ```
//!
//! Each link owns its fallback, so the chain is a singly linked list that
//! ends at the default handler. It is built once at startup and shared
//! read-only between request tasks.

use std::borrow::Cow;
use std::fmt;

use axum::http::request::Parts;
use axum::http::{HeaderValue, StatusCode};
use percent_encoding::percent_decode_str;
use serde::Deserialize;

use crate::http::response::ResponseSink;
use crate::routing::table::RedirectTable;

/// A request handler in the chain.
pub trait Handler: Send + Sync + fmt::Debug {
    /// Write the response for `request` into `sink`.
    fn serve(&self, request: &Parts, sink: &mut ResponseSink);
}

/// What a redirect link does after writing the redirect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallThrough {
    /// Return right after the redirect.
    #[default]
    Stop,
    /// Also run the fallback on the same sink. Its status and header writes
    /// are ignored; its body is appended after the redirect body.
    Continue,
}

/// The request path with percent-escapes decoded.
///
/// Paths that do not decode to UTF-8 are used as received.
pub fn request_path(request: &Parts) -> Cow<'_, str> {
    let raw = request.uri.path();
    percent_decode_str(raw)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(raw))
}

/// Terminal handler: greets the caller with the request path.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultHandler;

impl Handler for DefaultHandler {
    fn serve(&self, request: &Parts, sink: &mut ResponseSink) {
        let path = request_path(request);
        let name = path.strip_prefix('/').unwrap_or(&*path);
        sink.write_text(&format!("Hello, {name}!"));
    }
}

/// A chain link that checks one table before delegating.
pub struct RedirectHandler {
    table: RedirectTable,
    fallback: Box<dyn Handler>,
    fall_through: FallThrough,
    label: String,
}

impl RedirectHandler {
    pub fn new(
        fallback: Box<dyn Handler>,
        table: RedirectTable,
        fall_through: FallThrough,
        label: impl Into<String>,
    ) -> Self {
        Self {
            table,
            fallback,
            fall_through,
            label: label.into(),
        }
    }
}

impl fmt::Debug for RedirectHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedirectHandler")
            .field("label", &self.label)
            .field("entries", &self.table.len())
            .field("fall_through", &self.fall_through)
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl Handler for RedirectHandler {
    fn serve(&self, request: &Parts, sink: &mut ResponseSink) {
        let path = request_path(request);

        let Some(target) = self.table.lookup(&path) else {
            return self.fallback.serve(request, sink);
        };

        match HeaderValue::from_str(target) {
            Ok(location) => {
                tracing::debug!(
                    source = %self.label,
                    path = %path,
                    location = %target,
                    "Redirecting"
                );
                sink.redirect(&request.method, location, StatusCode::FOUND);
                if self.fall_through == FallThrough::Stop {
                    return;
                }
            }
            Err(e) => {
                tracing::warn!(
                    source = %self.label,
                    path = %path,
                    error = %e,
                    "Redirect target is not a valid header value; passing to fallback"
                );
            }
        }

        self.fallback.serve(request, sink);
    }
}

/// Wrap `fallback` so requests for paths in `table` are redirected first.
pub fn extend(
    fallback: Box<dyn Handler>,
    table: RedirectTable,
    fall_through: FallThrough,
) -> Box<dyn Handler> {
    Box::new(RedirectHandler::new(fallback, table, fall_through, "unnamed"))
}

/// Incremental builder; the most recently added table is consulted first.
#[derive(Debug)]
pub struct HandlerChain {
    head: Box<dyn Handler>,
    fall_through: FallThrough,
    links: usize,
}

impl HandlerChain {
    /// Start a chain that ends at `base`.
    pub fn new(base: Box<dyn Handler>, fall_through: FallThrough) -> Self {
        Self {
            head: base,
            fall_through,
            links: 0,
        }
    }

    /// Layer `table` on top of the current chain.
    pub fn extend(self, table: RedirectTable, label: impl Into<String>) -> Self {
        let head = Box::new(RedirectHandler::new(
            self.head,
            table,
            self.fall_through,
            label,
        ));
        Self {
            head,
            fall_through: self.fall_through,
            links: self.links + 1,
        }
    }

    /// Number of redirect links above the base handler.
    pub fn links(&self) -> usize {
        self.links
    }

    pub fn into_handler(self) -> Box<dyn Handler> {
        self.head
    }
}

impl Default for HandlerChain {
    fn default() -> Self {
        Self::new(Box::new(DefaultHandler), FallThrough::default())
    }
}
