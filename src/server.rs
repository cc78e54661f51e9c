//! HTTP server initialization and runtime setup.
//!
//! Handles database connection, migrations, cache setup and the Axum server lifecycle.

use crate::application::services::PostService;
use crate::config::Config;
use crate::infrastructure::cache::CacheHandle;
use crate::infrastructure::persistence::PgPostRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Number of connection attempts before startup gives up on PostgreSQL.
const DB_CONNECT_ATTEMPTS: usize = 5;

/// Opens the PostgreSQL pool with explicit timeouts, retrying with backoff.
///
/// Every connection carries a server-side `statement_timeout` so a hung query
/// cannot stall a request indefinitely.
///
/// # Errors
///
/// Returns an error if the URL is invalid or every attempt fails.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    let connect_options = PgConnectOptions::from_str(&config.database_url)
        .context("Invalid DATABASE_URL")?
        .options([(
            "statement_timeout",
            format!("{}ms", config.db_statement_timeout_ms),
        )]);

    let pool_options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime));

    let strategy = ExponentialBackoff::from_millis(100)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(DB_CONNECT_ATTEMPTS - 1);

    let pool = Retry::spawn(strategy, || {
        let pool_options = pool_options.clone();
        let connect_options = connect_options.clone();
        async move {
            pool_options
                .connect_with(connect_options)
                .await
                .inspect_err(|e| tracing::warn!(error = %e, "Database connection attempt failed"))
        }
    })
    .await
    .context("Failed to connect to database")?;

    Ok(pool)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (with retry)
/// - Schema migrations
/// - Redis cache handle (disabled when absent or unreachable)
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_database(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let cache = Arc::new(
        CacheHandle::connect(config.redis_url.as_deref(), config.cache_options()).await,
    );

    let repository = Arc::new(PgPostRepository::new(Arc::new(pool)));
    let post_service = PostService::new(repository, cache, config.image_base_url.clone())
        .with_cache_ttl(config.cache_ttl_seconds);

    let state = AppState::new(Arc::new(post_service));
    let app = app_router(state, &config.cors_allow_origin);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
