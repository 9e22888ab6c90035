use std::fmt::Display;

use crate::errors::ModelError;

/// A record that lives in a keyed collection.
///
/// `key_matches` is the lookup predicate used for get, update, delete and
/// the uniqueness check on create.
pub trait Record {
    type Key: ?Sized + Display;

    /// Name used in log lines and error messages.
    const ENTITY: &'static str;

    fn key(&self) -> &Self::Key;

    fn key_matches(&self, key: &Self::Key) -> bool;

    /// Field rules beyond what the typed decode already enforces.
    fn validate(&self) -> Result<(), ModelError> {
        Ok(())
    }
}
