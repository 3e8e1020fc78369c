//! Vetterati scoring service entry point.

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use vetterati_scoring::adapters::http::{scoring_router, ScoringAppState};
use vetterati_scoring::adapters::{
    HttpSubScoreProvider, PostgresCandidateReader, PostgresCriteriaRepository,
    PostgresScoreRepository, MIGRATOR,
};
use vetterati_scoring::config::{AppConfig, ConfigError, ValidationError};
use vetterati_scoring::domain::foundation::DomainError;
use vetterati_scoring::telemetry;

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Sub-score client error: {0}")]
    SubScores(#[from] DomainError),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    telemetry::init_tracing(&config.server.log_level, config.server.log_format);
    config.validate()?;

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        MIGRATOR.run(&pool).await?;
        info!("Database migrations applied");
    }

    let sub_scores = HttpSubScoreProvider::new(config.sub_scores.provider_config())?;

    let state = ScoringAppState::new(
        Arc::new(PostgresCriteriaRepository::new(pool.clone())),
        Arc::new(PostgresCandidateReader::new(pool.clone())),
        Arc::new(sub_scores),
        Arc::new(PostgresScoreRepository::new(pool)),
    )
    .with_max_in_flight(config.scoring.max_in_flight);

    let app = scoring_router().with_state(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(config.server.request_timeout())),
    );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "vetterati-scoring listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("vetterati-scoring stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "Failed to listen for shutdown signal");
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        error!(error = %err, "vetterati-scoring failed");
        eprintln!("vetterati-scoring failed: {err}");
        std::process::exit(1);
    }
}
