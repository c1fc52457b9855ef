mod config;
mod devices;
mod errors;
mod resolver;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::resolver::ConfigResolver;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TV page server v{}", env!("CARGO_PKG_VERSION"));

    // Config root is fixed for the lifetime of the process
    let resolver = ConfigResolver::new(config.config_dir.as_deref())
        .context("Could not determine the working directory for the config root")?;
    if !resolver.root().is_dir() {
        tracing::warn!(
            "Config root {} is not a directory; device lookups will fail",
            resolver.root().display()
        );
    }
    info!(
        "Config root: {} (devices: '{}', patches: '{}')",
        resolver.root().display(),
        config.device_config_type,
        config.patch_config_type
    );

    let state = AppState {
        resolver: Arc::new(resolver),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
