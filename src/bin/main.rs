use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};

use phd_portal::bootstrap::initialize_admin_user;
use phd_portal::config::Config;
use phd_portal::redis_service::{JwtBlacklist, init_redis_connection};
use phd_portal::state::AppState;
use phd_portal::statistics::StatisticsRules;
use phd_portal::{app, utils::tracing::init_standard_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = Config::parse();

    init_standard_tracing(env!("CARGO_CRATE_NAME"), &config.log_level);

    tracing::info!("Starting application...");

    tokio::fs::create_dir_all(config.upload_dir.join("certificates"))
        .await
        .with_context(|| format!("Failed to create upload dir {}", config.upload_dir.display()))?;

    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(20)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .context("Failed to connect to database")?;

    Migrator::up(&db, None)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database schema is up to date");

    let blacklist = match &config.redis_url {
        Some(url) => match init_redis_connection(url).await {
            Ok(conn) => {
                tracing::info!("Redis connection initialized successfully");
                JwtBlacklist::redis(conn)
            }
            Err(e) => {
                tracing::error!("Failed to initialize Redis connection: {:#}", e);
                tracing::warn!("Continuing with in-process token blacklist");
                JwtBlacklist::local()
            }
        },
        None => {
            tracing::info!("REDIS_URL not set, using in-process token blacklist");
            JwtBlacklist::local()
        }
    };

    let statistics_rules = match &config.statistics_rules_path {
        Some(path) => StatisticsRules::load(path)?,
        None => StatisticsRules::default(),
    };

    tracing::info!("Checking admin user...");
    if let Err(e) = initialize_admin_user(&db, &config).await {
        tracing::error!("Failed to initialize admin user: {:#}", e);
        tracing::warn!("Continuing without admin user initialization...");
    }

    let http_address = format!("0.0.0.0:{}", config.port);
    let state = AppState::new(db, config, blacklist, statistics_rules);
    let app = app::create_app(state);

    tracing::info!("HTTP server listening on {}", &http_address);

    let listener = tokio::net::TcpListener::bind(&http_address)
        .await
        .with_context(|| format!("Failed to bind {}", http_address))?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("HTTP server failed")?;

    Ok(())
}
