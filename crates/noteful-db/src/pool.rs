//! Database connection pool management.
//!
//! The pool is a process-wide resource: created once at startup, shared by
//! cloning, and closed explicitly at shutdown.

use std::time::{Duration, Instant};

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info, warn};

use noteful_core::logging::{COMPONENT, DURATION_MS, OPERATION, POOL_IDLE, POOL_SIZE, SUBSYSTEM};
use noteful_core::{Error, Result};

/// Default maximum number of connections in the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default connection acquire timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default idle timeout in seconds.
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

/// Pool configuration options.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of connections in the pool.
    pub max_connections: u32,
    /// Minimum number of connections to maintain.
    pub min_connections: u32,
    /// Acquire timeout. This is the only timeout applied to store calls.
    pub connect_timeout: Duration,
    /// Idle connection timeout duration.
    pub idle_timeout: Duration,
    /// Maximum connection lifetime.
    pub max_lifetime: Option<Duration>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: 1,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
            max_lifetime: Some(Duration::from_secs(1800)), // 30 minutes
        }
    }
}

impl PoolConfig {
    /// Create a new pool configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of connections.
    pub fn max_connections(mut self, n: u32) -> Self {
        self.max_connections = n;
        self
    }

    /// Set the minimum number of connections.
    pub fn min_connections(mut self, n: u32) -> Self {
        self.min_connections = n;
        self
    }

    /// Set the acquire timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the idle connection timeout.
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Set the maximum connection lifetime.
    pub fn max_lifetime(mut self, lifetime: Option<Duration>) -> Self {
        self.max_lifetime = lifetime;
        self
    }

    fn options(&self) -> PgPoolOptions {
        let mut options = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.connect_timeout)
            .idle_timeout(self.idle_timeout);

        if let Some(max_lifetime) = self.max_lifetime {
            options = options.max_lifetime(max_lifetime);
        }
        options
    }
}

/// Create a new PostgreSQL connection pool with default configuration.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    create_pool_with_config(database_url, PoolConfig::default()).await
}

/// Create a new PostgreSQL connection pool with custom configuration.
pub async fn create_pool_with_config(database_url: &str, config: PoolConfig) -> Result<PgPool> {
    let start = Instant::now();

    info!(
        { SUBSYSTEM } = "database",
        { COMPONENT } = "pool",
        { OPERATION } = "create",
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        connect_timeout_secs = config.connect_timeout.as_secs(),
        idle_timeout_secs = config.idle_timeout.as_secs(),
        "Creating database connection pool"
    );

    let pool = config
        .options()
        .connect(database_url)
        .await
        .map_err(Error::Database)?;

    info!(
        { SUBSYSTEM } = "database",
        { COMPONENT } = "pool",
        { OPERATION } = "established",
        { POOL_SIZE } = pool.size(),
        { POOL_IDLE } = pool.num_idle(),
        { DURATION_MS } = start.elapsed().as_millis() as u64,
        "Database connection pool established"
    );
    Ok(pool)
}

/// Create a pool that does not open a connection until first use.
///
/// Fails only if the URL cannot be parsed.
pub fn create_lazy_pool(database_url: &str, config: PoolConfig) -> Result<PgPool> {
    config
        .min_connections(0)
        .options()
        .connect_lazy(database_url)
        .map_err(Error::Database)
}

/// Log current pool health metrics.
///
/// Emits a debug-level event with pool size and idle count, and warns if no
/// connection is idle (potential exhaustion).
pub fn log_pool_metrics(pool: &PgPool) {
    let size = pool.size();
    let idle = pool.num_idle() as u32;

    debug!(
        { SUBSYSTEM } = "database",
        { POOL_SIZE } = size,
        { POOL_IDLE } = idle,
        "Pool health check"
    );

    if idle == 0 && size > 0 {
        warn!(
            { SUBSYSTEM } = "database",
            { POOL_SIZE } = size,
            "Connection pool has no idle connections"
        );
    }
}

/// Close the pool, waiting for checked-out connections to be returned.
pub async fn close_pool(pool: &PgPool) {
    log_pool_metrics(pool);
    pool.close().await;
    info!(
        { SUBSYSTEM } = "database",
        { COMPONENT } = "pool",
        { OPERATION } = "close",
        "Database connection pool closed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_max_connections() {
        assert_eq!(DEFAULT_MAX_CONNECTIONS, 10);
        assert_eq!(PoolConfig::default().max_connections, 10);
    }

    #[test]
    fn test_pool_config_builder() {
        let config = PoolConfig::new()
            .max_connections(20)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(60))
            .max_lifetime(None);

        assert_eq!(config.max_connections, 20);
        assert_eq!(config.min_connections, 5);
        assert_eq!(config.connect_timeout, Duration::from_secs(60));
        assert!(config.max_lifetime.is_none());
    }

    #[tokio::test]
    async fn test_lazy_pool_opens_no_connections() {
        let pool = create_lazy_pool("postgres://nobody@localhost:1/none", PoolConfig::new())
            .expect("URL should parse");
        assert_eq!(pool.size(), 0);
        close_pool(&pool).await;
        assert!(pool.is_closed());
    }

    #[tokio::test]
    async fn test_lazy_pool_rejects_bad_url() {
        let result = create_lazy_pool("not a url", PoolConfig::new());
        assert!(matches!(result, Err(Error::Database(_))));
    }
}
