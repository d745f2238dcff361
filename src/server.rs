//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, worker spawning, and Axum server lifecycle.

use crate::application::services::{AuthService, LinkService, StatsService};
use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::infrastructure::persistence::{
    PgClickRepository, PgLinkRepository, PgUserRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// How long shutdown waits for the click worker to drain its queue.
const WORKER_DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - Background click worker on a bounded queue
/// - Axum HTTP server with graceful shutdown
///
/// On SIGINT/SIGTERM the server stops accepting requests, the click channel
/// closes, and the worker drains any queued events before the process exits.
///
/// # Errors
///
/// Returns an error if the database connection, migrations, or the listener
/// bind fail.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    let storage_deadline = Duration::from_secs(config.storage_timeout_secs);

    let pool = Arc::new(pool);
    let link_repository = Arc::new(PgLinkRepository::new(pool.clone(), storage_deadline));
    let click_repository = Arc::new(PgClickRepository::new(pool.clone(), storage_deadline));
    let user_repository = Arc::new(PgUserRepository::new(pool.clone(), storage_deadline));

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);

    let worker = tokio::spawn(run_click_worker(click_rx, click_repository.clone()));
    tracing::info!("Click worker started");

    let state = AppState::new(
        Arc::new(AuthService::new(user_repository, &config.jwt_secret)),
        Arc::new(LinkService::new(link_repository.clone())),
        Arc::new(StatsService::new(link_repository, click_repository)),
        click_tx,
        config.base_url.clone(),
    );

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // The router (and with it every click_tx clone) is gone; wait for the
    // worker to finish draining the queue.
    tracing::info!("Waiting for click worker to drain");
    if tokio::time::timeout(WORKER_DRAIN_TIMEOUT, worker).await.is_err() {
        tracing::warn!(
            "Click worker did not drain within {}s, exiting anyway",
            WORKER_DRAIN_TIMEOUT.as_secs()
        );
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
