use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use argh::FromArgs;
use dotenv::dotenv;
use miette::{Diagnostic, IntoDiagnostic, Result};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::api::{self, AppState};
use crate::store::{MemoryStore, RemoteStore};

static JSON_OUTPUT: AtomicBool = AtomicBool::new(false);

pub const STORE_URL_ENV: &str = "STORE_URL";

pub struct App {
    args: Args,
}

#[derive(Error, Diagnostic, Debug)]
pub enum AppError {
    #[error("store URL {url} is not valid")]
    #[diagnostic(
        code(billed::error::configuration),
        help("pass the base URL of a server exposing /api/v1/bills, e.g. http://127.0.0.1:8080")
    )]
    InvalidStoreUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl App {
    pub fn new() -> Self {
        Self::with_args(argh::from_env())
    }

    pub fn with_args(args: Args) -> Self {
        Self { args }
    }

    pub fn json_output() -> bool {
        JSON_OUTPUT.load(Ordering::Relaxed)
    }

    pub async fn run(&self) -> Result<()> {
        dotenv().ok();

        miette::set_panic_hook();

        if std::env::var_os("RUST_BACKTRACE").is_none() {
            std::env::set_var("RUST_BACKTRACE", "1")
        }

        if std::env::var_os("RUST_LOG").is_none() {
            std::env::set_var("RUST_LOG", "billed_server=debug,billed_core=debug")
        }

        if self.args.json {
            JSON_OUTPUT.store(true, Ordering::Relaxed);
            tracing_subscriber::fmt::fmt()
                .json()
                .with_env_filter(EnvFilter::from_default_env())
                .try_init()
                .ok();
        } else {
            JSON_OUTPUT.store(false, Ordering::Relaxed);
            tracing_subscriber::fmt::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .try_init()
                .ok();
        }

        let state = self.state()?;
        let router = api::build(state);

        tracing::debug!(
            ip = self.args.listen_address.ip().to_string().as_str(),
            port = self.args.listen_address.port(),
            url = format!(
                "http://{}:{}",
                self.args.listen_address.ip(),
                self.args.listen_address.port()
            ),
            "server started"
        );

        let server = axum::Server::bind(&self.args.listen_address)
            .serve(router.into_make_service_with_connect_info::<SocketAddr>());

        let graceful = server.with_graceful_shutdown(shutdown_signal());
        graceful.await.into_diagnostic()?;

        tracing::debug!("server terminated");

        Ok(())
    }

    fn state(&self) -> Result<AppState, AppError> {
        let store_url = self
            .args
            .store_url
            .clone()
            .or_else(|| std::env::var(STORE_URL_ENV).ok())
            .filter(|url| !url.trim().is_empty());

        if let Some(url) = store_url {
            let base_url = Url::parse(&url).map_err(|source| AppError::InvalidStoreUrl {
                url: url.clone(),
                source,
            })?;
            tracing::debug!(url = base_url.as_str(), "using remote store");
            return Ok(AppState::new(Arc::new(RemoteStore::new(base_url))));
        }

        let store = if self.args.no_fixtures {
            tracing::debug!("using empty in-memory store");
            MemoryStore::new()
        } else {
            tracing::debug!("using in-memory store with fixture bills");
            MemoryStore::with_fixtures()
        };
        Ok(AppState::in_memory(store))
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("ctrl-c received"),
        Err(e) => tracing::error!("failed to listen for ctrl-c: {}", e),
    }
}

#[derive(FromArgs)]
/// The Billed expense report server.
pub struct Args {
    /// server address:port to listen on (default: 0.0.0.0:8080, PORT environment variable can override default port 8080)
    #[argh(
        option,
        default = "SocketAddr::from(([0, 0, 0, 0], default_listen_port()))"
    )]
    pub listen_address: SocketAddr,
    /// base URL of a server exposing the bills API to use as store, instead of keeping bills in memory (or STORE_URL environment variable)
    #[argh(option)]
    pub store_url: Option<String>,
    /// start the in-memory store without the fixture bills
    #[argh(switch)]
    pub no_fixtures: bool,
    /// use JSON for log messages
    #[argh(switch)]
    pub json: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            listen_address: SocketAddr::from(([127, 0, 0, 1], default_listen_port())),
            store_url: None,
            no_fixtures: false,
            json: false,
        }
    }
}

const DEFAULT_LISTEN_PORT: u16 = 8080;

fn default_listen_port() -> u16 {
    match std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
        Some(port) => {
            tracing::debug!("using port from PORT environment variable");
            port
        }
        None => DEFAULT_LISTEN_PORT,
    }
}
