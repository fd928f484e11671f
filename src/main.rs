//! Atlas server: a personal reading tracker.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt};

use atlas_api::{AppState, Stores};
use atlas_auth::PasswordHasher;
use atlas_core::config::{AppConfig, StoreProvider};
use atlas_database::{DatabasePool, MemoryStore};
use atlas_service::bootstrap_admin;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        eprintln!("Ignoring unreadable .env file: {e}");
    }

    let env = std::env::var("ATLAS_ENV").unwrap_or_else(|_| "development".to_string());
    let config = AppConfig::load(&env).context("failed to load configuration")?;

    init_logging(&config);
    tracing::info!(env = %env, "Starting Atlas v{}", env!("CARGO_PKG_VERSION"));

    run(config).await
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> anyhow::Result<()> {
    if config.auth.uses_dev_secret() {
        tracing::warn!("SECRET_KEY is not set; using the development secret");
    }

    // ── Step 1: Store ────────────────────────────────────────────
    let (stores, pool) = match config.database.provider {
        StoreProvider::Postgres => {
            let pool = DatabasePool::connect(&config.database)
                .await
                .context("database connection failed")?;
            if config.database.run_migrations {
                pool.migrate().await.context("migrations failed")?;
            }
            (Stores::postgres(&pool), Some(pool))
        }
        StoreProvider::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on exit");
            (Stores::memory(Arc::new(MemoryStore::new())), None)
        }
    };

    // ── Step 2: Admin bootstrap ──────────────────────────────────
    let hasher = PasswordHasher::new(&config.auth).context("invalid password hashing settings")?;
    bootstrap_admin(&config.admin, stores.users.as_ref(), &hasher).await;

    // ── Step 3: Serve ────────────────────────────────────────────
    let state = AppState::new(config, stores).context("failed to build application state")?;
    let served = atlas_api::run_server(state).await;

    if let Some(pool) = pool {
        pool.close().await;
    }

    served.context("server error")
}
