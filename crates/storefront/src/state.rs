//! Application state shared across handlers.

use std::sync::Arc;

use moka::future::Cache;
use sqlx::PgPool;

use dem_claire_core::Product;

use crate::config::StorefrontConfig;
use crate::services::{SimulatedGateway, SyncMonitor};

/// Cache key for product listings: the raw category filter plus paging.
pub type CatalogCacheKey = (String, i64, i64);

/// Cached listing page.
pub type CatalogPage = Arc<Vec<Product>>;

/// Maximum number of listing pages kept in memory.
const CATALOG_CACHE_CAPACITY: u64 = 256;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    gateway: SimulatedGateway,
    sync: SyncMonitor,
    catalog_cache: Cache<CatalogCacheKey, CatalogPage>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Starts the ambient sync monitor task; must be called from within
    /// a tokio runtime.
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        let gateway = SimulatedGateway::new(config.gateway);
        let sync = SyncMonitor::start();
        let catalog_cache = Cache::builder()
            .max_capacity(CATALOG_CACHE_CAPACITY)
            .time_to_live(config.catalog_cache_ttl)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                gateway,
                sync,
                catalog_cache,
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

    /// Get a reference to the simulated payment gateway.
    #[must_use]
    pub fn gateway(&self) -> &SimulatedGateway {
        &self.inner.gateway
    }

    /// Get a reference to the ambient sync monitor.
    #[must_use]
    pub fn sync(&self) -> &SyncMonitor {
        &self.inner.sync
    }

    /// Get a reference to the product listing cache.
    #[must_use]
    pub fn catalog_cache(&self) -> &Cache<CatalogCacheKey, CatalogPage> {
        &self.inner.catalog_cache
    }

    /// Drop all cached product listings.
    ///
    /// Called after any catalog write so readers never see stale pages
    /// for longer than one in-flight request.
    pub fn invalidate_catalog(&self) {
        self.inner.catalog_cache.invalidate_all();
    }
}
