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
use crate::entities::{analysis::AnalysisView, category::CategoryView, Analysis, Category};
use crate::middleware::logging::{to_response, ApiError};
use crate::store::ContentStore;

pub fn analyses_router(store: Arc<ContentStore>) -> Router {
    Router::new()
        .route("/analyses", get(get_analyses))
        .route("/analyses/:slug", get(get_analysis))
        .route("/categories", get(get_categories))
        .layer(Extension(store))
}

async fn get_analyses(
    Query(params): Query<AnalysesQuery>,
    Query(lang): Query<LocaleQuery>,
    Extension(store): Extension<Arc<ContentStore>>,
) -> Response {
    let locale = lang.locale();
    let analyses = match params.category_id.as_deref() {
        Some(category_id) => store.analyses_by_category(category_id).await,
        None => store.list::<Analysis>().await,
    };
    let categories = store.list::<Category>().await;

    let response: Vec<AnalysisView> = analyses
        .iter()
        .map(|a| a.view(locale, &categories))
        .collect();
    to_response((StatusCode::OK, Json(response)), Ok(()))
}

async fn get_analysis(
    Path(slug): Path<String>,
    Query(lang): Query<LocaleQuery>,
    Extension(store): Extension<Arc<ContentStore>>,
) -> Response {
    let Some(analysis) = store.analysis_by_slug(&slug).await else {
        return to_response(
            (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": format!("No analysis with {} slug was found.", slug)
                })),
            ),
            Err(ApiError::NotFound(format!("analyses/{slug}"))),
        );
    };
    let categories = store.list::<Category>().await;

    to_response(
        (StatusCode::OK, Json(analysis.view(lang.locale(), &categories))),
        Ok(()),
    )
}

async fn get_categories(
    Query(lang): Query<LocaleQuery>,
    Extension(store): Extension<Arc<ContentStore>>,
) -> Response {
    let locale = lang.locale();
    let categories = store.list::<Category>().await;

    let response: Vec<CategoryView> = categories.iter().map(|c| c.view(locale)).collect();
    to_response((StatusCode::OK, Json(response)), Ok(()))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalysesQuery {
    category_id: Option<String>,
}
