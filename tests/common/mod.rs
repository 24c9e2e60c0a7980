#![allow(dead_code)]

use lab_content::{create_api_router, store::SqlBackend, ContentStore};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// File-backed store in a fresh directory. Keep the `TempDir` alive for the
/// length of the test.
pub fn file_store() -> (ContentStore, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    (ContentStore::file(dir.path()), dir)
}

pub async fn sql_store() -> ContentStore {
    let sql = SqlBackend::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory database");
    sql.setup_schema().await.expect("Failed to create tables");
    ContentStore::sql(sql)
}

/// Serves the API on a free local port and returns its `/api` base url.
pub async fn spawn_app(store: ContentStore) -> String {
    let app = create_api_router(Arc::new(store));
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });
    format!("http://{addr}/api")
}
