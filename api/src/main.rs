//! Tracker API Server
//!
//! Tracks the pull requests registered users open on GitHub during a set of
//! months and serves a leaderboard, an admin dashboard, and per-month lookups.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use sea_orm::Database;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod integration_tests;

use adapters::{
    GitHubClientImpl, PostgresMonthRepository, PostgresPullRequestRepository,
    PostgresUserRepository,
};
use app::{AggregationService, IngestionQueue, IngestionService, MonthRegistry, UserService};
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<PostgresUserRepository>>,
    pub aggregation_service: Arc<
        AggregationService<
            PostgresUserRepository,
            PostgresMonthRepository,
            PostgresPullRequestRepository,
        >,
    >,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tracker_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting tracker API...");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(tracked_months = %config.tracked_months, "Configuration loaded");

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Create adapters
    let user_repo = Arc::new(PostgresUserRepository::new(db.clone()));
    let month_repo = Arc::new(PostgresMonthRepository::new(db.clone()));
    let pr_repo = Arc::new(PostgresPullRequestRepository::new(db.clone()));

    if config.github_token.is_none() {
        tracing::warn!("GITHUB_TOKEN not set, using unauthenticated search rate limits");
    }
    let github = Arc::new(
        GitHubClientImpl::new(
            config.github_api_url.clone(),
            config.github_token.clone(),
            config.github_timeout,
        )
        .context("Failed to build GitHub client")?,
    );

    // Create application services
    let month_registry = Arc::new(MonthRegistry::new(month_repo.clone()));

    let ingestion_service = Arc::new(IngestionService::new(
        github.clone(),
        month_registry.clone(),
        pr_repo.clone(),
    ));

    // The worker stops once the queue's last sender (held by the user service) is dropped.
    // Jobs still queued at shutdown are lost; see `IngestionQueue::enqueue`.
    let (ingestion_queue, _ingestion_worker) = IngestionQueue::start(
        ingestion_service,
        config.tracked_months.clone(),
        config.ingestion_queue_capacity,
    );

    let user_service = Arc::new(UserService::new(user_repo.clone(), ingestion_queue));

    let aggregation_service = Arc::new(AggregationService::new(
        user_repo.clone(),
        month_registry.clone(),
        pr_repo.clone(),
        config.tracked_months.clone(),
    ));

    // Create app state
    let state = AppState {
        user_service,
        aggregation_service,
    };

    // Rate limiting config: 2 req/sec sustained, burst of 5
    // Uses PeerIpKeyExtractor to get client IP from socket connection
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .context("Failed to build governor config")?,
    );

    // Registration triggers GitHub calls, so it is rate limited
    let rate_limited_routes = Router::new()
        .route("/users", post(handlers::create_user))
        .layer(GovernorLayer {
            config: governor_config,
        });

    // Build router
    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/greet", get(handlers::greet))
        .route("/leaderboard", get(handlers::leaderboard))
        .route("/admin-dashboard", get(handlers::admin_dashboard))
        .route("/track-prs", post(handlers::track_prs))
        .merge(rate_limited_routes)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
