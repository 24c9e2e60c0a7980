pub mod analysis;
pub mod category;
pub mod content_block;
pub mod homepage_category;
pub mod homepage_service;
pub mod news;
pub mod review;
pub mod submission;

use chrono::{DateTime, Utc};
use rand::Rng;
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, EntityTrait};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use validator::Validate;

pub use analysis::Analysis;
pub use category::Category;
pub use content_block::{BlockKind, ContentBlock};
pub use homepage_category::HomepageCategory;
pub use homepage_service::HomepageService;
pub use news::{NewsCategory, NewsItem};
pub use review::Review;
pub use submission::{Submission, SubmissionKind};

/// How a collection hands out primary keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdScheme {
    /// `max(numeric ids) + 1`, as a string.
    Sequential,
    /// `<prefix>_<epoch-ms>`.
    Timestamped(&'static str),
    /// `sub_<epoch-ms>_<6 random lowercase alphanumerics>`.
    Submission,
}

impl IdScheme {
    pub fn next_id<T: Record>(&self, existing: &[T], now: DateTime<Utc>) -> String {
        let taken = |id: &str| existing.iter().any(|r| r.id() == id);

        match self {
            IdScheme::Sequential => {
                let max = existing
                    .iter()
                    .filter_map(|r| r.id().parse::<u64>().ok())
                    .max()
                    .unwrap_or(0);
                if let Some(next) = max.checked_add(1) {
                    return next.to_string();
                }
                // The largest id is taken; hand out the lowest free number.
                let mut candidate: u64 = 1;
                loop {
                    let id = candidate.to_string();
                    if !taken(&id) {
                        return id;
                    }
                    candidate += 1;
                }
            }
            IdScheme::Timestamped(prefix) => {
                let mut millis = now.timestamp_millis();
                loop {
                    let id = format!("{prefix}_{millis}");
                    if !taken(&id) {
                        return id;
                    }
                    millis += 1;
                }
            }
            IdScheme::Submission => loop {
                let id = format!("sub_{}_{}", now.timestamp_millis(), random_suffix(6));
                if !taken(&id) {
                    return id;
                }
            },
        }
    }
}

pub(crate) fn random_suffix(len: usize) -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

/// A record kind the content store can persist.
///
/// Each kind is a single struct that is both the JSON shape of the file
/// collection (camelCase) and the sea-orm model of its table (snake_case).
pub trait Record:
    Serialize + DeserializeOwned + sea_orm::FromQueryResult + Clone + Debug + PartialEq + Send + Sync + 'static
{
    type Entity: EntityTrait<Model = Self>;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity>
        + ActiveModelBehavior
        + From<Self>
        + Send
        + Sync
        + 'static;
    /// Fields a caller supplies on create.
    type Draft: DeserializeOwned + Validate + Send + 'static;
    /// Partial update; every field optional.
    type Patch: DeserializeOwned + Validate + Send + 'static;

    /// File stem of the JSON collection and name of the table.
    const COLLECTION: &'static str;
    const ID_SCHEME: IdScheme;
    /// New records go to the front of the file collection instead of the back.
    const PREPEND: bool = false;

    fn id(&self) -> &str;

    fn id_column() -> <Self::Entity as EntityTrait>::Column;

    /// Builds the stored record. `existing` is the current collection, used for
    /// anything that must be unique across it (slugs).
    fn build(id: String, draft: Self::Draft, existing: &[Self], now: DateTime<Utc>) -> Self;

    /// Shallow merge of `patch` onto `self`. Never touches the id.
    fn apply(&mut self, patch: Self::Patch);

    /// Puts a loaded collection in its listing order.
    fn arrange(_records: &mut Vec<Self>) {}

    /// Whether writing `written` forces a change on `self` (exclusive flags).
    fn displaced_by(&self, _written: &Self) -> bool {
        false
    }

    fn displace(&mut self) {}
}

/// Normalizes an incoming locale variant: blank means "not translated".
pub(crate) fn variant(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Stable ascending sort by an `order` key; equal keys keep storage order.
pub(crate) fn sort_by_order<T, F>(records: &mut [T], key: F)
where
    F: Fn(&T) -> i32,
{
    records.sort_by_key(|r| key(r));
}
