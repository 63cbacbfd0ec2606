use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use logbook_api::auth::{generate_jwt, Claims};
use logbook_api::config;
use logbook_api::database::{DatabaseManager, MemoryLogStore, PgLogStore};
use logbook_api::AppState;

#[derive(Parser)]
#[command(name = "logbook-api")]
#[command(about = "Logbook API server")]
#[command(version)]
struct Args {
    #[arg(long, help = "Keep logs in process memory instead of PostgreSQL")]
    memory: bool,

    #[arg(long, help = "Apply database migrations before serving")]
    migrate: bool,

    #[arg(
        long = "seed-user",
        requires = "memory",
        help = "Register a user in the memory store and log a bearer token for it (repeatable)"
    )]
    seed_users: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = config::config();
    tracing::info!("Starting Logbook API in {:?} mode", config.environment);

    let (state, pool) = if args.memory {
        let store = MemoryLogStore::new();
        for username in &args.seed_users {
            let user = store.add_user(username).await?;
            let token = generate_jwt(&Claims::new(user.id, &user.username))?;
            tracing::info!("Seeded user {} ({}) token: {}", user.username, user.id, token);
        }
        tracing::warn!("Using in-memory store; data is lost on exit");
        (AppState::new(Arc::new(store)), None)
    } else {
        let pool = DatabaseManager::connect().await.context("failed to connect to database")?;
        if args.migrate {
            DatabaseManager::migrate(&pool).await?;
        }
        let store = PgLogStore::new(pool.clone());
        (AppState::new(Arc::new(store)), Some(pool))
    };

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Logbook API listening on http://{}", bind_addr);
    logbook_api::serve(listener, state).await?;

    if let Some(pool) = pool {
        DatabaseManager::close(pool).await;
    }
    tracing::info!("Server shut down gracefully");
    Ok(())
}
