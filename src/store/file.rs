use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::entities::{random_suffix, Record};
use crate::store::StoreError;

/// JSON-array-per-collection storage in one directory.
///
/// Every write reads the whole array, changes it, and writes the whole array
/// back. There is no locking: two writers racing on one collection means the
/// last one wins.
#[derive(Clone, Debug)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> FileBackend {
        FileBackend { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StoreError::io(&self.dir, source))
    }

    fn path<T: Record>(&self) -> PathBuf {
        self.dir.join(format!("{}.json", T::COLLECTION))
    }

    /// Reads the collection in storage order. A missing file is an empty
    /// collection; an unreadable or malformed one is an error.
    pub async fn load<T: Record>(&self) -> Result<Vec<T>, StoreError> {
        let path = self.path::<T>();
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(err) => return Err(StoreError::io(&path, err)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(vec![]);
        }

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
            collection: T::COLLECTION,
            source,
        })
    }

    /// Replaces the whole collection. The array is written to a temp file of
    /// its own next to the target and renamed over it, so readers see either
    /// the old or the new array and concurrent writers never share a temp file.
    pub async fn save<T: Record>(&self, records: &[T]) -> Result<(), StoreError> {
        let path = self.path::<T>();
        let tmp = self
            .dir
            .join(format!(".{}.json.{}.tmp", T::COLLECTION, random_suffix(12)));

        let body = serde_json::to_vec_pretty(records).map_err(|source| StoreError::Malformed {
            collection: T::COLLECTION,
            source,
        })?;

        self.ensure_dir().await?;
        fs::write(&tmp, body)
            .await
            .map_err(|source| StoreError::io(&tmp, source))?;
        if let Err(source) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(StoreError::io(&path, source));
        }
        Ok(())
    }

    pub async fn insert<T: Record>(&self, record: &T) -> Result<(), StoreError> {
        let mut records = self.load::<T>().await?;
        if T::PREPEND {
            records.insert(0, record.clone());
        } else {
            records.push(record.clone());
        }
        self.save(&records).await
    }

    pub async fn replace<T: Record>(&self, record: &T) -> Result<bool, StoreError> {
        let mut records = self.load::<T>().await?;
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => *slot = record.clone(),
            None => return Ok(false),
        }
        self.save(&records).await?;
        Ok(true)
    }

    pub async fn remove<T: Record>(&self, id: &str) -> Result<bool, StoreError> {
        let mut records = self.load::<T>().await?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Ok(false);
        }
        self.save(&records).await?;
        Ok(true)
    }
}
