use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the strict side of the resolver.
/// Page strategy lookups never produce these; they fall back to defaults.
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("Device configuration not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot merge {found} into a configuration: expected an object")]
    TypeMismatch { found: &'static str },

    #[error("Configuration nesting exceeds {limit} levels")]
    DepthExceeded { limit: usize },

    #[error("Invalid path segment: {0:?}")]
    InvalidSegment(String),
}

impl ResolverError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolverError::NotFound { .. })
    }
}
