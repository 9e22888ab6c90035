use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::{Health, Welcome};
use service::file::{movie_store::MovieStore, user_store::UserStore};

use crate::openapi;

pub mod movies;
pub mod pages;
pub mod users;

/// Stores shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserStore>,
    pub movies: Arc<MovieStore>,
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn root() -> Json<Welcome> {
    Json(Welcome::default())
}

/// Build the full application router: public endpoints plus both collections.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi::openapi_json));

    // `/users/html` is a static segment and wins over `/users/:name`
    let user_routes = Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/html", get(pages::users_html))
        .route(
            "/users/:name",
            get(users::get_user).put(users::update_user).delete(users::delete_user),
        );

    let movie_routes = Router::new()
        .route("/movies", get(movies::list_movies).post(movies::create_movie))
        .route(
            "/movies/:id",
            get(movies::get_movie).put(movies::update_movie).delete(movies::delete_movie),
        );

    public
        .merge(user_routes)
        .merge(movie_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
