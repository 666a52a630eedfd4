//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::marketplace::MarketplaceClient;
use crate::services::FeedService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool and upstream clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    marketplace: MarketplaceClient,
    feed: FeedService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `pool` - `PostgreSQL` connection pool (session storage)
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        let marketplace = MarketplaceClient::new(&config.marketplace);
        let feed = FeedService::new(config.feed_sources.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                marketplace,
                feed,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the marketplace API client.
    #[must_use]
    pub fn marketplace(&self) -> &MarketplaceClient {
        &self.inner.marketplace
    }

    /// Get a reference to the feed aggregation service.
    #[must_use]
    pub fn feed(&self) -> &FeedService {
        &self.inner.feed
    }
}
