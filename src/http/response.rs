//! Response sink shared by every handler in the chain.
//!
//! # Responsibilities
//! - Collect status, headers and body written by handlers
//! - Enforce "first status wins": once committed, status and header
//!   writes are ignored and body writes are appended
//! - Convert the result into an axum response
//!
//! # Design Decisions
//! - Fully buffered; responses here are a few hundred bytes at most
//! - Writing body bytes without a status commits `200 OK`

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use axum::response::Response;

const TEXT_HTML: &str = "text/html; charset=utf-8";
const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Write target handed down the handler chain.
#[derive(Debug, Default)]
pub struct ResponseSink {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ResponseSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a status has been committed.
    pub fn is_committed(&self) -> bool {
        self.status.is_some()
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Set a header. Ignored once the status is committed.
    pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) -> bool {
        if self.is_committed() {
            tracing::trace!(header = %name, "Header write after commit ignored");
            return false;
        }
        self.headers.insert(name, value);
        true
    }

    /// Commit `status`. Only the first call has any effect.
    pub fn write_status(&mut self, status: StatusCode) -> bool {
        if let Some(committed) = self.status {
            tracing::trace!(%committed, ignored = %status, "Superfluous status write ignored");
            return false;
        }
        self.status = Some(status);
        true
    }

    /// Append body bytes, committing `200 OK` if nothing was committed yet.
    pub fn write(&mut self, bytes: &[u8]) {
        if !self.is_committed() {
            self.write_status(StatusCode::OK);
        }
        self.body.extend_from_slice(bytes);
    }

    /// Write a plain text body, defaulting the content type.
    pub fn write_text(&mut self, text: &str) {
        if !self.headers.contains_key(header::CONTENT_TYPE) {
            self.set_header(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN));
        }
        self.write(text.as_bytes());
    }

    /// Write a redirect to `location` with the given status.
    ///
    /// GET and HEAD get an HTML content type; GET also gets a short
    /// HTML body linking to the target.
    pub fn redirect(&mut self, method: &Method, location: HeaderValue, status: StatusCode) {
        let is_get = method == Method::GET;
        let link = html_escape(&String::from_utf8_lossy(location.as_bytes()));

        self.set_header(header::LOCATION, location);
        if (is_get || method == Method::HEAD) && !self.headers.contains_key(header::CONTENT_TYPE) {
            self.set_header(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_HTML));
        }
        self.write_status(status);

        if is_get {
            let reason = status.canonical_reason().unwrap_or("Redirect");
            self.write(format!("<a href=\"{link}\">{reason}</a>.\n\n").as_bytes());
        }
    }

    /// Finish the response. Uncommitted sinks become an empty `200 OK`.
    pub fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(Bytes::from(self.body)));
        *response.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *response.headers_mut() = self.headers;
        response
    }
}

fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
