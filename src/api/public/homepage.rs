use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::api::public::LocaleQuery;
use crate::entities::{
    homepage_category::HomepageCategoryView, homepage_service::HomepageServiceView,
    review::ReviewView, HomepageCategory, HomepageService, Review,
};
use crate::middleware::logging::{to_response, ApiError};
use crate::store::ContentStore;

pub fn homepage_router(store: Arc<ContentStore>) -> Router {
    Router::new()
        .route("/reviews", get(get_reviews))
        .route("/homepage-categories", get(get_homepage_categories))
        .route(
            "/homepage-categories/featured",
            get(get_featured_homepage_category),
        )
        .route("/homepage-services", get(get_homepage_services))
        .layer(Extension(store))
}

async fn get_reviews(
    Query(params): Query<ReviewsQuery>,
    Query(lang): Query<LocaleQuery>,
    Extension(store): Extension<Arc<ContentStore>>,
) -> Response {
    let locale = lang.locale();
    let reviews = if params.homepage {
        store.homepage_reviews().await
    } else {
        store.list::<Review>().await
    };

    let response: Vec<ReviewView> = reviews.iter().map(|r| r.view(locale)).collect();
    to_response((StatusCode::OK, Json(response)), Ok(()))
}

async fn get_homepage_categories(
    Query(lang): Query<LocaleQuery>,
    Extension(store): Extension<Arc<ContentStore>>,
) -> Response {
    let locale = lang.locale();
    let categories = store.list::<HomepageCategory>().await;

    let response: Vec<HomepageCategoryView> = categories.iter().map(|c| c.view(locale)).collect();
    to_response((StatusCode::OK, Json(response)), Ok(()))
}

async fn get_featured_homepage_category(
    Query(lang): Query<LocaleQuery>,
    Extension(store): Extension<Arc<ContentStore>>,
) -> Response {
    match store.featured_homepage_category().await {
        Some(category) => to_response((StatusCode::OK, Json(category.view(lang.locale()))), Ok(())),
        None => to_response(
            (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "No featured homepage category."
                })),
            ),
            Err(ApiError::NotFound("homepage-categories/featured".to_string())),
        ),
    }
}

async fn get_homepage_services(
    Query(lang): Query<LocaleQuery>,
    Extension(store): Extension<Arc<ContentStore>>,
) -> Response {
    let locale = lang.locale();
    let services = store.list::<HomepageService>().await;

    let response: Vec<HomepageServiceView> = services.iter().map(|s| s.view(locale)).collect();
    to_response((StatusCode::OK, Json(response)), Ok(()))
}

#[derive(Deserialize)]
struct ReviewsQuery {
    #[serde(default)]
    homepage: bool,
}
