mod config;
mod db;
mod forms;
mod media;
mod pagination;
mod routes;

use std::path::Path;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::services::ServeDir;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;
use crate::media::MediaStore;
use crate::routes::AppState;

const CONFIG_PATH: &str = "newsfeed.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newsfeed=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration, falling back to defaults when no file exists
    let config = if Path::new(CONFIG_PATH).exists() {
        Config::load(CONFIG_PATH)?
    } else {
        info!("No {} found, using defaults", CONFIG_PATH);
        Config::default()
    };

    // Initialize database
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:newsfeed.db?mode=rwc".to_string());
    let db = Database::new(&database_url).await?;
    db.initialize().await?;
    info!("Database initialized");

    let db = Arc::new(db);

    // Create app state
    let state = Arc::new(AppState {
        db: db.clone(),
        media: MediaStore::new(&config.media_dir),
        default_per_page: config.per_page,
        max_per_page: config.max_per_page,
    });

    // Build router
    let app = Router::new()
        .route("/", get(routes::news_list))
        .route(
            "/news/add/",
            get(routes::add_news_form).post(routes::add_news_submit),
        )
        .route("/health", get(routes::health))
        .nest_service("/media", ServeDir::new(&config.media_dir))
        .with_state(state);

    // Start server
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    info!("Server starting on http://localhost:3000");

    axum::serve(listener, app).await?;

    Ok(())
}
