//! Shared application state.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::ServerConfig;
use crate::services::media::{MediaError, MediaRelay};

struct AppStateInner {
    config: ServerConfig,
    pool: SqlitePool,
    media: MediaRelay,
}

/// Application state shared across all request handlers.
///
/// Cheap to clone; all fields live behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

impl AppState {
    /// Create application state from configuration and a database pool.
    ///
    /// # Errors
    ///
    /// Returns `MediaError` if the media relay fails to construct.
    pub fn new(config: ServerConfig, pool: SqlitePool) -> Result<Self, MediaError> {
        let media = MediaRelay::from_config(config.media())?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                media,
            }),
        })
    }

    /// Returns the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Returns the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Returns the media relay.
    #[must_use]
    pub fn media(&self) -> &MediaRelay {
        &self.inner.media
    }
}
