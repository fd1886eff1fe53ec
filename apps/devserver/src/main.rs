//! devserver - local stand-in for App Engine static file routing.
//!
//! Reads the `handlers` section of `app.yaml` and serves `static_dir` and
//! `static_files` routes straight from disk. `script` routes go to the
//! wrapped application, which for the standalone binary answers 404.
//!
//! # Usage
//!
//! ```text
//! devserver [app.yaml]
//! ```
//!
//! The config file is looked up in the working directory and then in each
//! parent directory.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `DEVSERVER_LISTEN` | `127.0.0.1:8080` | Bind address |
//! | `DEVSERVER_CONFIG` | `app.yaml` | Config filename (the first CLI argument overrides it) |
//! | `GAE_ENV` | *(unset)* | `standard` disables static routing |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use devserver_core::{DevServerConfig, HandlerConfig, read_handler_config};
use devserver_http::{AppHandler, NotFoundApp, wrap};
use hyper::body::Incoming;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Server version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Apply command-line arguments (program name excluded) on top of `config`.
fn apply_args(
    mut config: DevServerConfig,
    args: impl IntoIterator<Item = String>,
) -> DevServerConfig {
    if let Some(config_file) = args.into_iter().next() {
        config.config_file = config_file;
    }
    config
}

/// Read the handler list, unless running hosted where none is needed.
fn load_handlers(config: &DevServerConfig, cwd: &Path) -> Result<Vec<HandlerConfig>> {
    if config.hosted {
        info!("hosted environment detected, static routing disabled");
        return Ok(Vec::new());
    }

    let handlers = read_handler_config(&config.config_file, cwd)
        .with_context(|| format!("failed to load handlers from {}", config.config_file))?;
    info!(
        config_file = %config.config_file,
        handlers = handlers.len(),
        "loaded handler config",
    );
    Ok(handlers)
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = apply_args(DevServerConfig::from_env(), std::env::args().skip(1));
    init_tracing(&config.log_level)?;

    let cwd = std::env::current_dir().context("failed to read working directory")?;
    let handlers = load_handlers(&config, &cwd)?;

    let app: Arc<dyn AppHandler<Incoming>> = Arc::new(NotFoundApp);
    let gate = wrap(app, &handlers, config.hosted).context("invalid handler config")?;

    let addr: SocketAddr = config
        .listen
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.listen))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(
        %addr,
        hosted = config.hosted,
        version = VERSION,
        "starting devserver",
    );

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };

    devserver_http::serve(listener, gate, shutdown)
        .await
        .context("server error")
}
