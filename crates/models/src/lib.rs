//! Record types stored in the JSON collections, plus the field rules a
//! payload must satisfy before it is handed to a store.

pub mod errors;
pub mod record;
pub mod user;
pub mod movie;

pub use record::Record;
