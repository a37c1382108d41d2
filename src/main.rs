//! LMS Server - Library Management System
//!
//! Borrow analytics and dashboard REST API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lms_server::{
    api,
    config::{AppConfig, StoreBackend},
    repository::{LibraryStore, MemoryStore, MongoStore},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("lms_server={},tower_http=debug", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting LMS Server v{}", env!("CARGO_PKG_VERSION"));

    // Create the document store once; every request shares it
    let store: Arc<dyn LibraryStore> = match config.database.backend {
        StoreBackend::Mongodb => {
            let store = MongoStore::connect(&config.database)
                .await
                .context("Failed to connect to MongoDB")?;
            tracing::info!("Connected to MongoDB database '{}'", config.database.name);
            Arc::new(store)
        }
        StoreBackend::Memory => {
            let path = config
                .database
                .fixture_path
                .clone()
                .context("database.fixture_path is required for the memory backend")?;
            let store = MemoryStore::load(&path).await?;
            tracing::info!("Loaded in-memory store from {}", path.display());
            Arc::new(store)
        }
    };

    // Save server address before moving config
    let addr = SocketAddr::new(
        config
            .server
            .host
            .parse()
            .context("Invalid host address")?,
        config.server.port,
    );

    // Build router
    let app = api::router(AppState::new(config, store));

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
