//! Service layer: keyed CRUD over JSON-file-backed collections.
//! - `storage` holds the whole-document load/save discipline.
//! - `file` holds the concrete user and movie stores.
//! - Field rules live with the record types in the `models` crate.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod file;
