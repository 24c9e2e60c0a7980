use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lab_content::{create_api_router, Config, ContentStore};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().expect("Invalid configuration");
    let store = ContentStore::open(&config)
        .await
        .expect("Failed to open content store");

    let app = create_api_router(Arc::new(store));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind");
    info!(addr = %config.bind_addr, "Listening");
    axum::serve(listener, app).await.expect("Server error");
}
