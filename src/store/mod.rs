pub mod file;
pub mod import;
pub mod queries;
pub mod sql;

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{BackendConfig, Config};
use crate::entities::Record;

pub use file::FileBackend;
pub use import::copy_collections;
pub use sql::SqlBackend;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed `{collection}` collection: {source}")]
    Malformed {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Clone, Debug)]
pub enum Backend {
    File(FileBackend),
    Sql(SqlBackend),
}

impl Backend {
    pub async fn load<T: Record>(&self) -> Result<Vec<T>, StoreError> {
        match self {
            Backend::File(files) => files.load().await,
            Backend::Sql(sql) => sql.load().await,
        }
    }

    pub async fn find<T: Record>(&self, id: &str) -> Result<Option<T>, StoreError> {
        match self {
            Backend::File(files) => Ok(files
                .load::<T>()
                .await?
                .into_iter()
                .find(|r| r.id() == id)),
            Backend::Sql(sql) => sql.find(id).await,
        }
    }

    pub async fn insert<T: Record>(&self, record: &T) -> Result<(), StoreError> {
        match self {
            Backend::File(files) => files.insert(record).await,
            Backend::Sql(sql) => sql.insert(record).await,
        }
    }

    pub async fn replace<T: Record>(&self, record: &T) -> Result<bool, StoreError> {
        match self {
            Backend::File(files) => files.replace(record).await,
            Backend::Sql(sql) => sql.replace(record).await,
        }
    }

    pub async fn remove<T: Record>(&self, id: &str) -> Result<bool, StoreError> {
        match self {
            Backend::File(files) => files.remove::<T>(id).await,
            Backend::Sql(sql) => sql.remove::<T>(id).await,
        }
    }
}

/// Handle to the site content. Holds no cached state: every read goes to the
/// backend, so concurrent handles always see the latest write.
#[derive(Clone, Debug)]
pub struct ContentStore {
    backend: Backend,
}

impl ContentStore {
    pub fn new(backend: Backend) -> ContentStore {
        ContentStore { backend }
    }

    pub fn file(dir: impl Into<PathBuf>) -> ContentStore {
        ContentStore::new(Backend::File(FileBackend::new(dir)))
    }

    pub fn sql(backend: SqlBackend) -> ContentStore {
        ContentStore::new(Backend::Sql(backend))
    }

    /// Opens the backend named by `config` and prepares it (directory or
    /// tables). When `import_from` is set, file collections are copied into a
    /// SQL backend whose tables are still empty.
    pub async fn open(config: &Config) -> Result<ContentStore, StoreError> {
        let backend = match &config.backend {
            BackendConfig::File { dir } => {
                let files = FileBackend::new(dir);
                files.ensure_dir().await?;
                info!(dir = %files.dir().display(), "Using file content store");
                Backend::File(files)
            }
            BackendConfig::Sql {
                url,
                max_connections,
            } => {
                let sql = SqlBackend::connect(url, *max_connections).await?;
                sql.setup_schema().await?;
                Backend::Sql(sql)
            }
        };

        if let (Some(dir), Backend::Sql(_)) = (&config.import_from, &backend) {
            let source = Backend::File(FileBackend::new(dir));
            copy_collections(&source, &backend).await?;
        }

        Ok(ContentStore { backend })
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// All records of a kind, in listing order. A read failure is logged and
    /// reported as an empty collection.
    pub async fn list<T: Record>(&self) -> Vec<T> {
        match self.backend.load::<T>().await {
            Ok(mut records) => {
                T::arrange(&mut records);
                records
            }
            Err(err) => {
                warn!(collection = T::COLLECTION, error = %err, "Failed to read collection");
                vec![]
            }
        }
    }

    pub async fn get_by_id<T: Record>(&self, id: &str) -> Option<T> {
        match self.backend.find::<T>(id).await {
            Ok(record) => record,
            Err(err) => {
                warn!(collection = T::COLLECTION, id = %id, error = %err, "Failed to read record");
                None
            }
        }
    }

    /// Stores a new record built from `draft` and returns it with its
    /// generated fields.
    pub async fn create<T: Record>(&self, draft: T::Draft) -> Result<T, StoreError> {
        let existing = self.backend.load::<T>().await?;
        let now = now();
        let id = T::ID_SCHEME.next_id(&existing, now);
        let record = T::build(id, draft, &existing, now);

        self.backend.insert(&record).await?;
        self.settle(&record, existing).await?;

        debug!(collection = T::COLLECTION, id = %record.id(), "Created record");
        Ok(record)
    }

    /// Merges `patch` onto the record. `Ok(None)` when the id is unknown.
    pub async fn update<T: Record>(
        &self,
        id: &str,
        patch: T::Patch,
    ) -> Result<Option<T>, StoreError> {
        let existing = self.backend.load::<T>().await?;
        let mut record = match existing.iter().find(|r| r.id() == id) {
            Some(record) => record.clone(),
            None => return Ok(None),
        };

        record.apply(patch);
        if !self.backend.replace(&record).await? {
            return Ok(None);
        }
        self.settle(&record, existing).await?;

        debug!(collection = T::COLLECTION, id = %id, "Updated record");
        Ok(Some(record))
    }

    /// Removes the record. `Ok(false)` when there was nothing to remove.
    pub async fn delete<T: Record>(&self, id: &str) -> Result<bool, StoreError> {
        let removed = self.backend.remove::<T>(id).await?;
        if removed {
            debug!(collection = T::COLLECTION, id = %id, "Deleted record");
        }
        Ok(removed)
    }

    // Rewrites records that lost an exclusive flag to `written`.
    async fn settle<T: Record>(&self, written: &T, others: Vec<T>) -> Result<(), StoreError> {
        for mut other in others {
            if other.displaced_by(written) {
                other.displace();
                self.backend.replace(&other).await?;
                debug!(collection = T::COLLECTION, id = %other.id(), "Cleared exclusive flag");
            }
        }
        Ok(())
    }
}

// Millisecond precision, the same as the ids derived from it.
fn now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}
