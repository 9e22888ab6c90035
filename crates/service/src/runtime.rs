//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so the server crate can check the
//! stores it was handed without depending on `common` for it.

use crate::file::{movie_store::MovieStore, user_store::UserStore};

/// Warn about backing documents that are missing at startup.
pub async fn check_stores(users: &UserStore, movies: &MovieStore) -> anyhow::Result<()> {
    common::env::check_backing_files([("users", users.path()), ("movies", movies.path())]).await?;
    Ok(())
}
