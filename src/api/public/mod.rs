pub mod analyses;
pub mod homepage;
pub mod news;
pub mod pages;
pub mod submissions;

use axum::Router;
use serde::Deserialize;
use std::sync::Arc;

use analyses::analyses_router;
use homepage::homepage_router;
use news::news_router;
use pages::pages_router;
use submissions::submissions_router;

use crate::locale::Locale;
use crate::store::ContentStore;

pub fn public_api_router(store: Arc<ContentStore>) -> Router {
    Router::new()
        .merge(news_router(store.clone()))
        .merge(analyses_router(store.clone()))
        .merge(homepage_router(store.clone()))
        .merge(pages_router(store.clone()))
        .merge(submissions_router(store))
}

/// `?locale=` on public reads. Unknown or missing codes read as russian.
#[derive(Deserialize, Default)]
pub struct LocaleQuery {
    locale: Option<String>,
}

impl LocaleQuery {
    pub fn locale(&self) -> Locale {
        self.locale
            .as_deref()
            .and_then(|code| code.parse().ok())
            .unwrap_or_default()
    }
}
