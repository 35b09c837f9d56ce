mod config;
mod error;
mod store;
mod v1;

use std::{net::SocketAddr, sync::Arc};

use axum::{routing::get, Router};
use axum_server::tls_rustls::RustlsConfig;
use clap::Parser;
use eyre::WrapErr;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    config::{Config, Database},
    store::{FileStore, MemoryStore, TodoStore},
};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::parse();

    match config.database() {
        Database::Memory => {
            warn!("using the in-memory store, todos are lost on exit");
            serve(MemoryStore::default(), &config).await
        }
        Database::File(path) => {
            let store = FileStore::open(&path)
                .wrap_err_with(|| format!("failed to open data file {}", path.display()))?;

            info!(path = %store.path().display(), "using file store");
            serve(store, &config).await
        }
    }
}

async fn serve<S: TodoStore>(store: S, config: &Config) -> eyre::Result<()> {
    let state = Arc::new(AppState::new(store));
    let app = app(state, config.cors()?);

    let addr = SocketAddr::from(([0; 4], config.port));

    match config.tls() {
        Some((cert, key)) => {
            let tls = RustlsConfig::from_pem_file(cert, key).await?;

            info!(%addr, environment = ?config.environment, "listening with tls");
            axum_server::bind_rustls(addr, tls)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            info!(%addr, environment = ?config.environment, "listening");
            axum_server::bind(addr)
                .serve(app.into_make_service())
                .await?;
        }
    }

    Ok(())
}

pub fn app<S: TodoStore>(state: Arc<AppState<S>>, cors: CorsLayer) -> Router {
    Router::new()
        .nest("/api", v1::router::<S>())
        .route("/health", get(v1::health))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

#[derive(Debug)]
pub struct AppState<S> {
    pub store: S,
}

impl<S: TodoStore> AppState<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}
