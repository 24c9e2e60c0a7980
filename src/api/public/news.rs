use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::api::public::LocaleQuery;
use crate::entities::{news::NewsView, NewsCategory, NewsItem};
use crate::middleware::logging::{to_response, ApiError};
use crate::store::ContentStore;

const DEFAULT_HOMEPAGE_LIMIT: usize = 3;

pub fn news_router(store: Arc<ContentStore>) -> Router {
    Router::new()
        .route("/news", get(get_news))
        .route("/news/featured", get(get_featured_news))
        .route("/news/promotions", get(get_promotions))
        .route("/news/:slug", get(get_news_item))
        .layer(Extension(store))
}

async fn get_news(
    Query(params): Query<NewsQuery>,
    Query(lang): Query<LocaleQuery>,
    Extension(store): Extension<Arc<ContentStore>>,
) -> Response {
    let locale = lang.locale();
    let mut items: Vec<NewsItem> = store
        .list::<NewsItem>()
        .await
        .into_iter()
        .filter(|n| params.category.map_or(true, |c| n.category == c))
        .collect();
    items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    if let Some(limit) = params.limit {
        items.truncate(limit);
    }

    let response: Vec<NewsView> = items.iter().map(|n| n.view(locale)).collect();
    to_response((StatusCode::OK, Json(response)), Ok(()))
}

async fn get_featured_news(
    Query(params): Query<NewsQuery>,
    Query(lang): Query<LocaleQuery>,
    Extension(store): Extension<Arc<ContentStore>>,
) -> Response {
    let locale = lang.locale();
    let items = store
        .featured_news(params.limit.unwrap_or(DEFAULT_HOMEPAGE_LIMIT))
        .await;

    let response: Vec<NewsView> = items.iter().map(|n| n.view(locale)).collect();
    to_response((StatusCode::OK, Json(response)), Ok(()))
}

async fn get_promotions(
    Query(params): Query<NewsQuery>,
    Query(lang): Query<LocaleQuery>,
    Extension(store): Extension<Arc<ContentStore>>,
) -> Response {
    let locale = lang.locale();
    let items = store
        .promotions(params.limit.unwrap_or(DEFAULT_HOMEPAGE_LIMIT))
        .await;

    let response: Vec<NewsView> = items.iter().map(|n| n.view(locale)).collect();
    to_response((StatusCode::OK, Json(response)), Ok(()))
}

async fn get_news_item(
    Path(slug): Path<String>,
    Query(lang): Query<LocaleQuery>,
    Extension(store): Extension<Arc<ContentStore>>,
) -> Response {
    match store.news_by_slug(&slug).await {
        Some(item) => to_response((StatusCode::OK, Json(item.view(lang.locale()))), Ok(())),
        None => to_response(
            (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": format!("No news with {} slug was found.", slug)
                })),
            ),
            Err(ApiError::NotFound(format!("news/{slug}"))),
        ),
    }
}

#[derive(Deserialize)]
struct NewsQuery {
    category: Option<NewsCategory>,
    limit: Option<usize>,
}
