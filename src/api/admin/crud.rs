use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::entities::Record;
use crate::middleware::logging::{to_response, ApiError};
use crate::store::ContentStore;

//ROUTERS
/// `GET|POST {path}` and `GET|PATCH|DELETE {path}/:id` over one collection.
pub fn crud_router<T: Record>(path: &str) -> Router {
    Router::new()
        .route(path, get(list_records::<T>).post(create_record::<T>))
        .route(
            &format!("{path}/:id"),
            get(get_record::<T>)
                .patch(patch_record::<T>)
                .delete(delete_record::<T>),
        )
}

/// `GET {path}` and `GET {path}/:id`.
pub fn read_router<T: Record>(path: &str) -> Router {
    Router::new()
        .route(path, get(list_records::<T>))
        .route(&format!("{path}/:id"), get(get_record::<T>))
}

//ROUTES
pub async fn list_records<T: Record>(
    Extension(store): Extension<Arc<ContentStore>>,
) -> Response {
    let records = store.list::<T>().await;
    to_response((StatusCode::OK, Json(records)), Ok(()))
}

pub async fn get_record<T: Record>(
    Path(id): Path<String>,
    Extension(store): Extension<Arc<ContentStore>>,
) -> Response {
    match store.get_by_id::<T>(&id).await {
        Some(record) => to_response((StatusCode::OK, Json(record)), Ok(())),
        None => not_found::<T>(&id),
    }
}

pub async fn create_record<T: Record>(
    Extension(store): Extension<Arc<ContentStore>>,
    Json(payload): Json<T::Draft>,
) -> Response {
    if let Some(err) = payload.validate().err() {
        return invalid(err);
    }

    match store.create::<T>(payload).await {
        Ok(record) => to_response((StatusCode::CREATED, Json(record)), Ok(())),
        Err(err) => internal(err),
    }
}

pub async fn patch_record<T: Record>(
    Path(id): Path<String>,
    Extension(store): Extension<Arc<ContentStore>>,
    Json(payload): Json<T::Patch>,
) -> Response {
    if let Some(err) = payload.validate().err() {
        return invalid(err);
    }

    match store.update::<T>(&id, payload).await {
        Ok(Some(record)) => to_response((StatusCode::OK, Json(record)), Ok(())),
        Ok(None) => not_found::<T>(&id),
        Err(err) => internal(err),
    }
}

pub async fn delete_record<T: Record>(
    Path(id): Path<String>,
    Extension(store): Extension<Arc<ContentStore>>,
) -> Response {
    match store.delete::<T>(&id).await {
        Ok(true) => to_response(
            (
                StatusCode::OK,
                Json(json!({
                    "message": "Resource deleted successfully."
                })),
            ),
            Ok(()),
        ),
        Ok(false) => not_found::<T>(&id),
        Err(err) => internal(err),
    }
}

//utils
pub(crate) fn not_found<T: Record>(id: &str) -> Response {
    to_response(
        (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": format!("No {} record with {} id was found.", T::COLLECTION, id)
            })),
        ),
        Err(ApiError::NotFound(format!("{}/{}", T::COLLECTION, id))),
    )
}

pub(crate) fn invalid(err: validator::ValidationErrors) -> Response {
    to_response(
        (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Validation failed",
                "fields": &err,
            })),
        ),
        Err(ApiError::ValidationFail(err.to_string())),
    )
}

pub(crate) fn internal(err: crate::store::StoreError) -> Response {
    to_response(
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Internal server error"
            })),
        ),
        Err(ApiError::Store(err.to_string())),
    )
}
