//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, service wiring, the counter worker
//! and the Axum server lifecycle.

use crate::application::services::{
    AnalyticsService, AuthService, BillingService, LinkService, ProfileService, WebhookSettings,
};
use crate::config::Config;
use crate::domain::counter_worker::run_counter_worker;
use crate::domain::repositories::{
    AnalyticsRepository, BillingRepository, LinkRepository, PageRepository, ProfileRepository,
};
use crate::infrastructure::payments::{PaymentGateway, StripeGateway, StripeSettings};
use crate::infrastructure::persistence::{
    PgAnalyticsRepository, PgBillingRepository, PgLinkRepository, PgPageRepository,
    PgProfileRepository,
};
use crate::routes::app_router;
use crate::state::{AppState, WebSettings};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Upper bound on waiting for queued view/click increments at shutdown.
const COUNTER_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Opens the PostgreSQL pool with the configured limits.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - Repositories, payment gateway and services
/// - Background counter worker
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if the database connection, a migration, the payment
/// client or the listener bind fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    let pool = Arc::new(pool);
    let profiles: Arc<dyn ProfileRepository> = Arc::new(PgProfileRepository::new(pool.clone()));
    let pages: Arc<dyn PageRepository> = Arc::new(PgPageRepository::new(pool.clone()));
    let links: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(pool.clone()));
    let analytics: Arc<dyn AnalyticsRepository> =
        Arc::new(PgAnalyticsRepository::new(pool.clone()));
    let customers: Arc<dyn BillingRepository> = Arc::new(PgBillingRepository::new(pool.clone()));

    let gateway: Arc<dyn PaymentGateway> = Arc::new(
        StripeGateway::new(StripeSettings {
            api_base: config.stripe.api_base.clone(),
            secret_key: config.stripe.secret_key.clone(),
            price_id: config.stripe.price_id.clone(),
            site_url: config.site_url.clone(),
            timeout: config.stripe.timeout(),
        })
        .context("Failed to build payment client")?,
    );

    let (counter_sender, counter_receiver) = mpsc::channel(config.counter_queue_capacity);
    let counter_worker = tokio::spawn(run_counter_worker(
        counter_receiver,
        analytics.clone(),
        config.counter_worker_concurrency,
    ));
    tracing::info!(
        concurrency = config.counter_worker_concurrency,
        "Counter worker started"
    );

    let state = AppState {
        auth_service: Arc::new(AuthService::new(
            &config.auth.jwt_secret,
            config.auth.jwt_audience.as_deref(),
        )),
        profile_service: Arc::new(ProfileService::new(
            profiles.clone(),
            pages,
            links.clone(),
        )),
        link_service: Arc::new(LinkService::new(links)),
        analytics_service: Arc::new(AnalyticsService::new(analytics)),
        billing_service: Arc::new(BillingService::new(
            profiles,
            customers,
            gateway,
            WebhookSettings {
                secret: config.stripe.webhook_secret.clone(),
                tolerance_secs: config.stripe.webhook_tolerance_secs,
            },
        )),
        counter_sender,
        web: Arc::new(WebSettings {
            login_url: config.auth.login_url.clone(),
            session_cookie: config.auth.session_cookie.clone(),
            site_url: config.site_url.clone(),
        }),
    };

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped, draining counter queue");
    match tokio::time::timeout(COUNTER_DRAIN_TIMEOUT, counter_worker).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!(error = %e, "Counter worker panicked"),
        Err(_) => tracing::warn!("Counter queue not drained before timeout"),
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for SIGTERM"),
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
