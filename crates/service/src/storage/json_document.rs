use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::fs;

use crate::errors::ServiceError;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("unexpected document root: {0}")]
    Shape(String),
}

/// On-disk layout of one collection: where the record array sits in the
/// parsed JSON root and how the root is rebuilt around a new array.
pub trait DocumentLayout: Sized {
    /// Take the record array out of `root`, keeping whatever else the
    /// layout needs to rebuild it.
    fn split(root: Value) -> Result<(Self, Vec<Value>), DocumentError>;

    fn join(&self, records: Vec<Value>) -> Value;
}

/// Name of a JSON value's type, for shape errors.
pub(crate) fn value_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One decoded record and the JSON it is written back as.
///
/// `raw` is the value read from disk until the record is replaced, so
/// records a write does not touch are saved exactly as they were read.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry<R> {
    record: R,
    raw: Value,
}

impl<R: Serialize + DeserializeOwned> Entry<R> {
    pub fn from_raw(raw: Value) -> Result<Self, DocumentError> {
        let record = R::deserialize(&raw)?;
        Ok(Self { record, raw })
    }

    pub fn from_record(record: R) -> Result<Self, DocumentError> {
        let raw = serde_json::to_value(&record)?;
        Ok(Self { record, raw })
    }
}

impl<R> Entry<R> {
    pub fn record(&self) -> &R {
        &self.record
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

/// A loaded backing document: its layout and its records in stored order.
#[derive(Clone, Debug, PartialEq)]
pub struct Document<L, R> {
    layout: L,
    entries: Vec<Entry<R>>,
}

impl<L: DocumentLayout, R: Serialize + DeserializeOwned> Document<L, R> {
    pub fn decode(root: Value) -> Result<Self, DocumentError> {
        let (layout, items) = L::split(root)?;
        let entries = items.into_iter().map(Entry::from_raw).collect::<Result<Vec<_>, _>>()?;
        Ok(Self { layout, entries })
    }

    pub fn encode(&self) -> Value {
        self.layout.join(self.entries.iter().map(|e| e.raw.clone()).collect())
    }
}

impl<L, R> Document<L, R> {
    pub fn layout(&self) -> &L {
        &self.layout
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &R> + '_ {
        self.entries.iter().map(|e| &e.record)
    }

    pub fn into_records(self) -> Vec<R> {
        self.entries.into_iter().map(|e| e.record).collect()
    }

    pub(crate) fn entries_mut(&mut self) -> &mut Vec<Entry<R>> {
        &mut self.entries
    }
}

/// Read and parse the whole file. A missing file is an error; no default
/// document is created.
pub async fn read_json(path: &Path) -> Result<Value, ServiceError> {
    let bytes = fs::read(path).await.map_err(|e| ServiceError::storage(path, e))?;
    serde_json::from_slice(&bytes).map_err(|e| ServiceError::storage(path, e))
}

/// Replace the file with the pretty-printed document.
///
/// Output uses a two-space indent and leaves non-ASCII text unescaped. The
/// bytes go to a sibling temp file first and are renamed into place.
pub async fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, doc: &T) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(doc).map_err(|e| ServiceError::storage(path, e))?;
    let tmp = temp_sibling(path);
    fs::write(&tmp, &data).await.map_err(|e| ServiceError::storage(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(ServiceError::storage(path, e));
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tmp_file(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("json_document_{tag}_{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn pretty_output_keeps_unicode() -> Result<(), ServiceError> {
        let path = tmp_file("unicode");
        write_json_pretty(&path, &json!({"users": [{"name": "Zoë"}]})).await?;

        let text = tokio::fs::read_to_string(&path).await.map_err(|e| ServiceError::storage(&path, e))?;
        assert!(text.contains("Zoë"));
        assert!(!text.contains("\\u00eb"));
        assert!(text.contains("\n  \"users\": ["));
        assert!(!temp_sibling(&path).exists());

        let back = read_json(&path).await?;
        assert_eq!(back["users"][0]["name"], "Zoë");
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn missing_file_is_storage_error() {
        let path = tmp_file("missing");
        assert!(matches!(read_json(&path).await, Err(ServiceError::Storage(_))));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn invalid_json_is_storage_error() -> Result<(), std::io::Error> {
        let path = tmp_file("invalid");
        tokio::fs::write(&path, b"{\"users\": [").await?;
        assert!(matches!(read_json(&path).await, Err(ServiceError::Storage(_))));
        tokio::fs::remove_file(&path).await
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Point {
        x: f64,
    }

    #[test]
    fn entry_keeps_the_json_it_was_read_from() -> Result<(), DocumentError> {
        let raw = json!({"x": 2, "label": "origin"});
        let read = Entry::<Point>::from_raw(raw.clone())?;
        assert_eq!(read.record(), &Point { x: 2.0 });
        assert_eq!(read.raw(), &raw);
        assert!(read.raw()["x"].is_u64());

        let built = Entry::from_record(Point { x: 2.0 })?;
        assert_eq!(built.raw(), &json!({"x": 2.0}));
        Ok(())
    }

    #[test]
    fn temp_sibling_stays_in_directory() {
        let p = Path::new("/srv/data/movies.json");
        assert_eq!(temp_sibling(p), PathBuf::from("/srv/data/.movies.json.tmp"));
    }
}
