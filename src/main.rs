use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use slotbook::config::AppConfig;
use slotbook::db;
use slotbook::state::AppState;
use slotbook::store::{BookingStore, SqliteRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = Arc::new(Mutex::new(db::init_db(&config.database_url)?));
    let store = BookingStore::open(Box::new(SqliteRepository::new(conn.clone())))?;

    let (events_tx, _) = broadcast::channel(256);

    let state = Arc::new(AppState {
        db: conn,
        store: Mutex::new(store),
        config: config.clone(),
        events_tx,
    });

    let app = slotbook::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
