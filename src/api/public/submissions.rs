use axum::{
    extract::Extension,
    http::StatusCode,
    response::Response,
    routing::post,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::api::admin::crud::{internal, invalid};
use crate::entities::{submission::SubmissionDraft, Analysis, Submission, SubmissionKind};
use crate::locale::Locale;
use crate::middleware::logging::{to_response, ApiError};
use crate::store::ContentStore;

pub fn submissions_router(store: Arc<ContentStore>) -> Router {
    Router::new()
        .route("/submissions/contact", post(post_contact))
        .route("/submissions/booking", post(post_booking))
        .layer(Extension(store))
}

async fn post_contact(
    Extension(store): Extension<Arc<ContentStore>>,
    Json(mut payload): Json<SubmissionDraft>,
) -> Response {
    payload.kind = SubmissionKind::Contact;
    submit(&store, payload).await
}

async fn post_booking(
    Extension(store): Extension<Arc<ContentStore>>,
    Json(mut payload): Json<SubmissionDraft>,
) -> Response {
    payload.kind = SubmissionKind::Booking;

    let Some(analysis_id) = payload.analysis_id.clone().filter(|id| !id.is_empty()) else {
        return to_response(
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Booking requires analysisId"
                })),
            ),
            Err(ApiError::ValidationFail("missing analysisId".to_string())),
        );
    };
    if payload.analysis_name.is_none() {
        payload.analysis_name = store
            .get_by_id::<Analysis>(&analysis_id)
            .await
            .map(|a| a.name_in(Locale::Ru).to_string());
    }

    submit(&store, payload).await
}

async fn submit(store: &ContentStore, payload: SubmissionDraft) -> Response {
    if let Some(err) = payload.validate().err() {
        return invalid(err);
    }

    match store.create::<Submission>(payload).await {
        Ok(submission) => to_response((StatusCode::CREATED, Json(submission)), Ok(())),
        Err(err) => internal(err),
    }
}
