use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use models::Record;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::errors::ServiceError;
use crate::storage::json_document::{read_json, write_json_pretty, Document, DocumentLayout, Entry};

type KeyOf<R> = <R as Record>::Key;

/// Keyed record collection persisted as one JSON document.
///
/// Nothing is cached: reads reload the file, writes run load → mutate →
/// save under `write_lock` so two writers in this process cannot interleave.
/// Other processes writing the same file are not coordinated with.
pub struct JsonCollection<L, R> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _doc: PhantomData<fn() -> (L, R)>,
}

impl<L, R> JsonCollection<L, R>
where
    L: DocumentLayout,
    R: Record + Clone + Serialize + DeserializeOwned,
{
    const ENTITY: &'static str = R::ENTITY;

    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()), _doc: PhantomData }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the backing file and decode its layout.
    pub async fn load(&self) -> Result<Document<L, R>, ServiceError> {
        let root = read_json(&self.path).await?;
        let doc = Document::decode(root).map_err(|e| ServiceError::storage(&self.path, e))?;
        debug!(entity = Self::ENTITY, path = %self.path.display(), count = doc.len(), "document loaded");
        Ok(doc)
    }

    /// Rebuild the full document and replace the backing file.
    pub async fn save(&self, doc: &Document<L, R>) -> Result<(), ServiceError> {
        write_json_pretty(&self.path, &doc.encode()).await?;
        debug!(entity = Self::ENTITY, path = %self.path.display(), count = doc.len(), "document saved");
        Ok(())
    }

    /// All records in stored order.
    pub async fn list(&self) -> Result<Vec<R>, ServiceError> {
        Ok(self.load().await?.into_records())
    }

    /// First record whose key matches.
    pub async fn get(&self, key: &KeyOf<R>) -> Result<R, ServiceError> {
        self.load()
            .await?
            .into_records()
            .into_iter()
            .find(|r| r.key_matches(key))
            .ok_or_else(|| ServiceError::not_found(Self::ENTITY, key))
    }

    /// Append a record whose key is not yet present.
    pub async fn create(&self, record: R) -> Result<R, ServiceError> {
        record.validate()?;
        let _guard = self.write_lock.lock().await;
        let mut doc = self.load().await?;
        if doc.records().any(|r| r.key_matches(record.key())) {
            return Err(ServiceError::conflict(Self::ENTITY, record.key()));
        }
        let entry = self.entry(record.clone())?;
        doc.entries_mut().push(entry);
        self.save(&doc).await?;
        info!(entity = Self::ENTITY, key = %record.key(), "record created");
        Ok(record)
    }

    /// Replace, in place, the first record matching `key` with `record`.
    ///
    /// The payload carries its own key; when it differs from `key` the record
    /// is renamed. The new key is not checked against the other records.
    pub async fn update(&self, key: &KeyOf<R>, record: R) -> Result<R, ServiceError> {
        record.validate()?;
        let _guard = self.write_lock.lock().await;
        let mut doc = self.load().await?;
        let idx = doc
            .records()
            .position(|r| r.key_matches(key))
            .ok_or_else(|| ServiceError::not_found(Self::ENTITY, key))?;
        if !record.key_matches(key) {
            warn!(entity = Self::ENTITY, from = %key, to = %record.key(), "update renames record");
        }
        doc.entries_mut()[idx] = self.entry(record.clone())?;
        self.save(&doc).await?;
        info!(entity = Self::ENTITY, key = %record.key(), "record replaced");
        Ok(record)
    }

    /// Remove every record matching `key`; returns how many were removed.
    /// The file is left untouched when nothing matched.
    pub async fn delete(&self, key: &KeyOf<R>) -> Result<usize, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.load().await?;
        let before = doc.len();
        doc.entries_mut().retain(|e| !e.record().key_matches(key));
        let removed = before - doc.len();
        if removed == 0 {
            return Err(ServiceError::not_found(Self::ENTITY, key));
        }
        self.save(&doc).await?;
        info!(entity = Self::ENTITY, %key, removed, "record deleted");
        Ok(removed)
    }

    fn entry(&self, record: R) -> Result<Entry<R>, ServiceError> {
        Entry::from_record(record).map_err(|e| ServiceError::storage(&self.path, e))
    }
}
