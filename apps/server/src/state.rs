use std::sync::Arc;

use crate::config::Config;
use crate::resolver::ConfigResolver;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read-only after startup; lookups are safe to run concurrently.
    pub resolver: Arc<ConfigResolver>,
    pub config: Config,
}
