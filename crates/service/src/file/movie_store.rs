use std::path::{Path, PathBuf};
use std::sync::Arc;

use models::movie::Movie;
use serde_json::{Map, Value};

use crate::errors::ServiceError;
use crate::storage::json_document::value_kind;
use crate::storage::{Document, DocumentError, DocumentLayout, JsonCollection};

const RESULTS: &str = "results";

/// Backing document layout for movies, detected on every load.
///
/// A listing is stored either as a bare array or as an object carrying the
/// array under `results` (the shape of a TMDB page). Saving writes back the
/// shape that was loaded; a wrapped document keeps its other fields.
#[derive(Clone, Debug, PartialEq)]
pub enum MovieLayout {
    Bare,
    Wrapped { envelope: Map<String, Value> },
}

impl MovieLayout {
    pub fn is_wrapped(&self) -> bool {
        matches!(self, MovieLayout::Wrapped { .. })
    }
}

impl DocumentLayout for MovieLayout {
    fn split(root: Value) -> Result<(Self, Vec<Value>), DocumentError> {
        match root {
            Value::Array(items) => Ok((MovieLayout::Bare, items)),
            Value::Object(mut envelope) => {
                // the emptied slot keeps its position for `join`
                let items = match envelope.get_mut(RESULTS).map(Value::take) {
                    Some(Value::Array(items)) => items,
                    Some(other) => {
                        return Err(DocumentError::Shape(format!("`results` must be an array, found {}", value_kind(&other))))
                    }
                    None => return Err(DocumentError::Shape("object without a `results` field".into())),
                };
                Ok((MovieLayout::Wrapped { envelope }, items))
            }
            other => Err(DocumentError::Shape(format!("expected array or object, found {}", value_kind(&other)))),
        }
    }

    fn join(&self, records: Vec<Value>) -> Value {
        match self {
            MovieLayout::Bare => Value::Array(records),
            MovieLayout::Wrapped { envelope } => {
                let mut root = envelope.clone();
                root.insert(RESULTS.to_string(), Value::Array(records));
                Value::Object(root)
            }
        }
    }
}

/// A loaded movie document.
pub type MovieDocument = Document<MovieLayout, Movie>;

/// Movie collection keyed by integer id.
pub struct MovieStore {
    collection: JsonCollection<MovieLayout, Movie>,
}

impl MovieStore {
    /// Store over the file at `path`; the file is not touched until first use.
    pub fn new<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { collection: JsonCollection::new(path) })
    }

    pub fn path(&self) -> &Path {
        self.collection.path()
    }

    /// Load the document as-is, shape included.
    pub async fn load(&self) -> Result<MovieDocument, ServiceError> {
        self.collection.load().await
    }

    /// Replace the whole document.
    pub async fn save(&self, doc: &MovieDocument) -> Result<(), ServiceError> {
        self.collection.save(doc).await
    }

    /// All movies in stored order.
    pub async fn list(&self) -> Result<Vec<Movie>, ServiceError> {
        self.collection.list().await
    }

    /// First movie with this id.
    pub async fn get(&self, id: i64) -> Result<Movie, ServiceError> {
        self.collection.get(&id).await
    }

    /// Append a new movie; `Conflict` if the id is taken.
    pub async fn create(&self, movie: Movie) -> Result<Movie, ServiceError> {
        self.collection.create(movie).await
    }

    /// Replace the movie found under `id` with the full payload.
    pub async fn update(&self, id: i64, movie: Movie) -> Result<Movie, ServiceError> {
        self.collection.update(&id, movie).await
    }

    /// Remove every movie with this id.
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.collection.delete(&id).await.map(|_| ())
    }
}
