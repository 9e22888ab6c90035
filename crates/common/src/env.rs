//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, before the router is built.

use std::path::Path;

use tracing::{info, warn};

/// Check that each collection's backing document is present.
///
/// Nothing is created here: a missing document only produces a warning,
/// and requests against that collection fail until the file appears.
pub async fn check_backing_files<'a, I>(files: I) -> anyhow::Result<usize>
where
    I: IntoIterator<Item = (&'a str, &'a Path)>,
{
    let mut missing = 0;
    for (collection, path) in files {
        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_file() => {
                info!(%collection, path = %path.display(), bytes = meta.len(), "backing document found");
            }
            Ok(_) => {
                return Err(anyhow::anyhow!(
                    "backing document for {collection} is not a regular file: {}",
                    path.display()
                ));
            }
            Err(_) => {
                missing += 1;
                warn!(%collection, path = %path.display(), "backing document missing; requests will fail until it exists");
            }
        }
    }
    Ok(missing)
}
