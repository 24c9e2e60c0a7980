use tracing::info;

use crate::entities::{
    Analysis, Category, ContentBlock, HomepageCategory, HomepageService, NewsItem, Record,
    Review, Submission,
};
use crate::store::{Backend, StoreError};

/// Copies every collection from `from` into `to`, skipping collections that
/// already hold data in `to`. Returns the number of records copied.
pub async fn copy_collections(from: &Backend, to: &Backend) -> Result<usize, StoreError> {
    let mut copied = 0;
    copied += copy::<NewsItem>(from, to).await?;
    copied += copy::<Analysis>(from, to).await?;
    copied += copy::<Category>(from, to).await?;
    copied += copy::<Review>(from, to).await?;
    copied += copy::<HomepageCategory>(from, to).await?;
    copied += copy::<HomepageService>(from, to).await?;
    copied += copy::<ContentBlock>(from, to).await?;
    copied += copy::<Submission>(from, to).await?;
    Ok(copied)
}

async fn copy<T: Record>(from: &Backend, to: &Backend) -> Result<usize, StoreError> {
    if !to.load::<T>().await?.is_empty() {
        info!(collection = T::COLLECTION, "Target collection not empty, skipping import");
        return Ok(0);
    }

    let records = from.load::<T>().await?;
    // Inserting back to front keeps a prepend-ordered collection in order.
    if T::PREPEND {
        for record in records.iter().rev() {
            to.insert(record).await?;
        }
    } else {
        for record in records.iter() {
            to.insert(record).await?;
        }
    }

    info!(collection = T::COLLECTION, count = records.len(), "Imported collection");
    Ok(records.len())
}
