//! Shared utilities for integration tests.

use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

use redirector::config::{ServiceConfig, SourceConfig};
use redirector::http::{bind, HttpServer};
use redirector::lifecycle::{build_chain, build_service_chain, StartupReport};
use redirector::routing::{DecoderRegistry, FallThrough, Handler};
use tokio::sync::oneshot;

/// A running redirector bound to an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub report: StartupReport,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Write `content` to `name` inside `dir`.
pub fn write_source(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Build the chain from `sources` and serve it on 127.0.0.1 with a random port.
#[allow(dead_code)]
pub async fn start_server(sources: &[SourceConfig], fall_through: FallThrough) -> TestServer {
    let (chain, report) = build_chain(sources, &DecoderRegistry::default(), fall_through);
    serve(chain, report).await
}

/// Serve the chain `main` would build for `config`, on a random port.
#[allow(dead_code)]
pub async fn start_service(config: &ServiceConfig) -> TestServer {
    let (chain, report) = build_service_chain(config);
    serve(chain, report).await
}

async fn serve(chain: Box<dyn Handler>, report: StartupReport) -> TestServer {
    let listener = bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let shutdown = async move {
            let _ = rx.await;
        };
        let _ = HttpServer::new(chain).run(listener, shutdown).await;
    });

    TestServer {
        addr,
        report,
        shutdown: Some(tx),
    }
}

/// HTTP client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
