//! Office Locations Backend
//!
//! Serves the office routes from an in-memory store. Everything resets on restart.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use office_locations::config::Config;
use office_locations::store::{MemoryStore, RecordStore};
use office_locations::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Office Locations Backend");
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.strict_delete {
        tracing::info!("Strict deletes enabled: unknown ids answer 404");
    }

    // Initialize store
    let store: Arc<dyn RecordStore> = if config.seed {
        Arc::new(MemoryStore::seeded())
    } else {
        Arc::new(MemoryStore::new())
    };
    tracing::info!("Store ready with {} offices", store.list().len());

    // Create application state
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
