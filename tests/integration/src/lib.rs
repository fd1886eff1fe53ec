//! Integration tests for devserver.
//!
//! Each test starts a server on an ephemeral port with its own handler list
//! and a scratch asset directory, then talks to it over real HTTP.
//!
//! ```text
//! cargo test -p devserver-integration
//! ```

use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Once};

use devserver_core::HandlerConfig;
use devserver_http::{AppHandler, FnApp, ResponseBody, wrap};
use hyper::body::Incoming;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// A server running in the background for the duration of a test.
#[derive(Debug)]
pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<std::io::Result<()>>>,
}

impl TestServer {
    /// Absolute URL for `path` on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Stop accepting connections and wait for the server to drain.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle
                .await
                .expect("server task")
                .expect("server shut down cleanly");
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Start a server wrapping `app` with `handlers`.
pub async fn spawn_server(
    app: Arc<dyn AppHandler<Incoming>>,
    handlers: &[HandlerConfig],
    hosted: bool,
) -> TestServer {
    init_tracing();

    let gate = wrap(app, handlers, hosted).expect("valid handler config");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let (tx, rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(devserver_http::serve(listener, gate, async {
        rx.await.ok();
    }));

    TestServer {
        addr,
        shutdown: Some(tx),
        handle: Some(handle),
    }
}

/// An application answering `app:<METHOD> <URI>` for every request.
#[must_use]
pub fn echo_app() -> Arc<dyn AppHandler<Incoming>> {
    Arc::new(FnApp::new(|req: http::Request<Incoming>| {
        let body = format!("app:{} {}", req.method(), req.uri());
        http::Response::builder()
            .header(http::header::CONTENT_TYPE, "text/plain")
            .body(ResponseBody::from_string(body))
            .expect("echo response")
    }))
}

/// Create a scratch asset tree.
///
/// ```text
/// <root>/public/foo.txt        "foo!"
/// <root>/public/css/site.css   "body{}"
/// <root>/public/index.html     "<h1>hi</h1>"
/// <root>/secret.txt            "secret"
/// ```
#[must_use]
pub fn asset_tree() -> tempfile::TempDir {
    let root = tempfile::tempdir().expect("tempdir");
    let public = root.path().join("public");
    std::fs::create_dir_all(public.join("css")).expect("mkdir");
    std::fs::write(public.join("foo.txt"), "foo!").expect("write");
    std::fs::write(public.join("css").join("site.css"), "body{}").expect("write");
    std::fs::write(public.join("index.html"), "<h1>hi</h1>").expect("write");
    std::fs::write(root.path().join("secret.txt"), "secret").expect("write");
    root
}

/// `path` as a string suitable for a handler config.
#[must_use]
pub fn path_str(path: &Path) -> String {
    path.display().to_string()
}

mod test_gate;
mod test_routing;
mod test_static_dir;
