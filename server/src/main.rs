//! Blog API server.
//!
//! Run from repo root: `cargo run -p blog-server`. Without `DATABASE_URL` the in-memory store is used.

use blog_api::{build_router, ensure_tables, AppConfig, AppState, MemoryStore, PgStore, Store};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("blog_api=info,blog_server=info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(url)
                .await?;
            ensure_tables(&pool).await?;
            tracing::info!(max_connections = config.max_connections, "connected to postgres");
            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using the in-memory store; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let app = build_router(AppState::new(store), config.body_limit);
    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("blog api listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
