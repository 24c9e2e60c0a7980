pub mod admin;
pub mod public;

use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use admin::admin_api_router;
use public::public_api_router;

use crate::middleware::logging::logging_middleware;
use crate::store::ContentStore;

pub fn create_api_router(store: Arc<ContentStore>) -> Router {
    Router::new()
        .nest("/api", public_api_router(store.clone()))
        .nest("/api/admin", admin_api_router(store))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
