use configs::{AppConfig, StorageConfig};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};
use service::{
    file::{movie_store::MovieStore, user_store::UserStore},
    runtime,
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open both stores at the configured paths. Nothing is read yet.
pub fn build_state(storage: &StorageConfig) -> AppState {
    AppState {
        users: UserStore::new(storage.users_path.clone()),
        movies: MovieStore::new(storage.movies_path.clone()),
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    if cfg.storage.shares_backing_file() {
        return Err(StartupError::InvalidConfig(format!(
            "users and movies cannot share a backing document ({})",
            cfg.storage.users_path.display()
        )));
    }

    let state = build_state(&cfg.storage);
    runtime::check_stores(&state.users, &state.movies).await?;

    let app = routes::build_router(state, build_cors());

    let addr = cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    info!(%addr, "starting server");
    axum::serve(listener, app).await.map_err(anyhow::Error::from)?;
    Ok(())
}
