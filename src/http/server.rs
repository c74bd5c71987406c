//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum Router with a single catch-all route
//! - Wire up middleware (request ID, tracing)
//! - Bind the listener and serve until shutdown
//! - Run every request through the handler chain

use std::future::Future;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::error::ServerError;
use crate::http::response::ResponseSink;
use crate::routing::Handler;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Application state injected into the request handler.
#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<dyn Handler>,
}

/// HTTP server for the redirector.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server that answers every path through `chain`.
    pub fn new(chain: Box<dyn Handler>) -> Self {
        let state = AppState {
            chain: Arc::from(chain),
        };
        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(redirect_handler))
            .route("/{*path}", any(redirect_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown` completes.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Bind the listening socket.
pub async fn bind(address: &str) -> Result<TcpListener, ServerError> {
    TcpListener::bind(address)
        .await
        .map_err(|source| ServerError::Listen {
            address: address.to_string(),
            source,
        })
}

/// Catch-all handler: run the request through the chain.
async fn redirect_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let (parts, _body) = request.into_parts();
    let request_id = parts
        .headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let mut sink = ResponseSink::new();
    state.chain.serve(&parts, &mut sink);

    tracing::debug!(
        request_id = %request_id,
        method = %parts.method,
        path = %parts.uri.path(),
        status = sink.status().map(|s| s.as_u16()).unwrap_or(200),
        "Request served"
    );

    sink.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{
        DefaultHandler, FallThrough, HandlerChain, RedirectRecord, RedirectTable,
    };
    use axum::http::{header, StatusCode};
    use tokio::sync::oneshot;
    use tower::ServiceExt;

    fn server() -> HttpServer {
        let table = RedirectTable::build(vec![RedirectRecord::new(
            "/go",
            "https://example.com/go",
        )]);
        let chain = HandlerChain::new(Box::new(DefaultHandler), FallThrough::Stop)
            .extend(table, "test");
        HttpServer::new(chain.into_handler())
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_redirect_route() {
        let response = server()
            .router()
            .oneshot(Request::builder().uri("/go").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://example.com/go"
        );
        assert!(response.headers().contains_key(X_REQUEST_ID));
    }

    #[tokio::test]
    async fn test_root_and_nested_paths_fall_back() {
        let cases = [
            ("/", "Hello, !"),
            ("/a/b", "Hello, a/b!"),
            ("/c", "Hello, c!"),
            ("/caf%C3%A9", "Hello, café!"),
        ];
        for (uri, expected) in cases {
            let response = server()
                .router()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert_eq!(body_text(response).await, expected);
        }
    }

    #[tokio::test]
    async fn test_any_method() {
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/go")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(body_text(response).await, "");
    }

    #[tokio::test]
    async fn test_incoming_request_id_propagated() {
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .uri("/c")
                    .header(X_REQUEST_ID, "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[X_REQUEST_ID], "abc-123");
    }

    #[tokio::test]
    async fn test_bind_failure_is_listen_error() {
        let err = bind("not-an-address").await.unwrap_err();
        assert!(matches!(err, ServerError::Listen { .. }));
    }

    #[tokio::test]
    async fn test_run_returns_after_shutdown() {
        let listener = bind("127.0.0.1:0").await.unwrap();
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(server().run(listener, async move {
            let _ = rx.await;
        }));

        tx.send(()).unwrap();
        let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .expect("server did not stop")
            .unwrap();
        assert!(result.is_ok());
    }
}
