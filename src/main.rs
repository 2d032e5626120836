use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use scamwatch_api::config::Config;
use scamwatch_api::risk::engine::RiskEngine;
use scamwatch_api::seed::dummy_reports::seed_reports;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    // Initialize structured logging (set RUST_LOG=info for output)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    tracing::info!("ScamWatch API starting");

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path)?;
    tracing::info!("Configuration loaded from {}", config_path);

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .map_err(|e| eyre::eyre!("Failed to connect to database: {}", e))?;

    tracing::info!("Connected to PostgreSQL");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| eyre::eyre!("Failed to run migrations: {}", e))?;

    tracing::info!("Database migrations complete");

    // Seed sample reports if configured
    if let Some(ref path) = config.seed.reports_path {
        match seed_reports(&pool, path).await {
            Ok(count) => tracing::info!(count, "Sample reports seeded"),
            Err(e) => tracing::warn!(error = %e, "Failed to seed sample reports, continuing without"),
        }
    }

    // The risk engine is built once here and injected into the API state.
    let engine = RiskEngine::new(config.risk.clone());

    scamwatch_api::api::serve(pool, engine, &config.api.host, config.api.port).await?;

    tracing::info!("ScamWatch API stopped gracefully");
    Ok(())
}
