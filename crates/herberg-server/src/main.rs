use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use herberg_core::Directory;
use herberg_db::FileStore;
use herberg_server::{create_router, seed_countries, AppState, Config};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Optional: HERBERG_LISTEN_ADDR, HERBERG_DATA_PATH");
            std::process::exit(1);
        }
    };

    tracing::info!("Starting Herberg server");
    tracing::info!("Listen address: {}", config.listen_addr);
    tracing::info!("Data file: {}", config.data_path.display());

    // Load the store. A corrupt data file is fatal: starting with a silently
    // empty store would discard data on the next write.
    let store = match FileStore::open(&config.data_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Storage error: {}", e);
            std::process::exit(1);
        }
    };

    let directory = Directory::new(store, seed_countries());
    let state = AppState::new(directory);

    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server running at http://{}", config.listen_addr);

    axum::serve(listener, app).await.expect("Server error");
}
