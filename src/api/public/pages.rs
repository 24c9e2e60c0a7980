use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::api::public::LocaleQuery;
use crate::entities::content_block::ContentBlockView;
use crate::middleware::logging::to_response;
use crate::store::ContentStore;

pub fn pages_router(store: Arc<ContentStore>) -> Router {
    Router::new()
        .route("/pages/:page/blocks", get(get_page_blocks))
        .layer(Extension(store))
}

/// Blocks of one page in display order. A page with no blocks is an empty list.
async fn get_page_blocks(
    Path(page): Path<String>,
    Query(lang): Query<LocaleQuery>,
    Extension(store): Extension<Arc<ContentStore>>,
) -> Response {
    let locale = lang.locale();
    let blocks = store.content_blocks_for_page(&page).await;

    let response: Vec<ContentBlockView> = blocks.iter().map(|b| b.view(locale)).collect();
    to_response((StatusCode::OK, Json(response)), Ok(()))
}
