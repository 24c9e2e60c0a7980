pub mod crud;

use axum::{
    extract::Extension,
    routing::get,
    Router,
};
use std::sync::Arc;

use crud::{crud_router, delete_record, get_record, list_records, read_router};

use crate::entities::{
    Analysis, Category, ContentBlock, HomepageCategory, HomepageService, NewsItem, Review,
    Submission,
};
use crate::store::ContentStore;

/// Back-office endpoints. Authentication is expected in front of this router;
/// the handlers trust every caller.
pub fn admin_api_router(store: Arc<ContentStore>) -> Router {
    Router::new()
        .merge(crud_router::<NewsItem>("/news"))
        .merge(crud_router::<Analysis>("/analyses"))
        .merge(crud_router::<Review>("/reviews"))
        .merge(crud_router::<HomepageCategory>("/homepage-categories"))
        .merge(crud_router::<HomepageService>("/homepage-services"))
        .merge(crud_router::<ContentBlock>("/content-blocks"))
        .merge(read_router::<Category>("/categories"))
        .route("/submissions", get(list_records::<Submission>))
        .route(
            "/submissions/:id",
            get(get_record::<Submission>).delete(delete_record::<Submission>),
        )
        .layer(Extension(store))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn router_builds_for_every_record_kind() {
        let store = Arc::new(ContentStore::file(std::env::temp_dir().join("lab-content-admin")));
        let _router: Router = admin_api_router(store);
    }
}
