//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migration, worker spawning, and the Axum
//! server lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::mpsc;

use crate::application::services::{AnalyticsService, AuthService, LinkService, ResolverService};
use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::infrastructure::persistence::{PgClickRepository, PgLinkRepository, PgUserRepository};
use crate::routes::app_router;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Schema migrations
/// - Background click worker
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, migration, bind, or server
/// runtime fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Migrations applied");

    let pool = Arc::new(pool);
    let link_repository = Arc::new(PgLinkRepository::new(pool.clone()));
    let click_repository = Arc::new(PgClickRepository::new(pool.clone()));
    let user_repository = Arc::new(PgUserRepository::new(pool.clone()));

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    tokio::spawn(run_click_worker(click_rx, click_repository.clone()));
    tracing::info!("Click worker started");

    let link_service = Arc::new(LinkService::new(
        link_repository.clone(),
        config.code_length,
        config.code_max_attempts,
    ));
    let resolver_service = Arc::new(ResolverService::new(link_repository.clone()));
    let analytics_service = Arc::new(AnalyticsService::new(
        link_repository.clone(),
        click_repository,
    ));
    let auth_service = Arc::new(AuthService::new(user_repository, config.jwt_secret.clone()));

    let state = AppState::new(
        link_service,
        resolver_service,
        analytics_service,
        auth_service,
        link_repository,
        click_tx,
        config.behind_proxy,
    );

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
