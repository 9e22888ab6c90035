use std::fmt::Display;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str, key: impl Display) -> Self {
        Self::NotFound(format!("{entity} '{key}' not found"))
    }

    pub fn conflict(entity: &str, key: impl Display) -> Self {
        Self::Conflict(format!("{entity} '{key}' already exists"))
    }

    pub fn storage(path: &Path, err: impl Display) -> Self {
        Self::Storage(format!("{}: {err}", path.display()))
    }
}
