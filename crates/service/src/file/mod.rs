//! File-backed collection stores, one per backing document.

pub mod user_store;
pub mod movie_store;
