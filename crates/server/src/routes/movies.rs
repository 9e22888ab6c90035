use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use models::movie::Movie;
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::AppState;

/// List every movie in stored order.
#[utoipa::path(
    get, path = "/movies", tag = "movies",
    responses(
        (status = 200, description = "All movies in stored order", body = [crate::openapi::MovieDoc]),
        (status = 500, description = "Backing document unreadable", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list_movies(State(state): State<AppState>) -> Result<Json<Vec<Movie>>, JsonApiError> {
    let movies = state.movies.list().await?;
    info!(count = movies.len(), "list movies");
    Ok(Json(movies))
}

/// Fetch one movie by id.
#[utoipa::path(
    get, path = "/movies/{id}", tag = "movies",
    params(("id" = i64, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::MovieDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Id is not an integer", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get_movie(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Movie>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(state.movies.get(id).await?))
}

/// Create a movie whose id is not taken.
#[utoipa::path(
    post, path = "/movies", tag = "movies",
    request_body = crate::openapi::MovieDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::MovieDoc),
        (status = 409, description = "Id already taken", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create_movie(
    State(state): State<AppState>,
    payload: Result<Json<Movie>, JsonRejection>,
) -> Result<(StatusCode, Json<Movie>), JsonApiError> {
    let Json(movie) = payload?;
    let created = state.movies.create(movie).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace a movie with the full payload.
#[utoipa::path(
    put, path = "/movies/{id}", tag = "movies",
    params(("id" = i64, Path, description = "Movie id")),
    request_body = crate::openapi::MovieDoc,
    responses(
        (status = 200, description = "Replaced", body = crate::openapi::MovieDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update_movie(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Movie>, JsonRejection>,
) -> Result<Json<Movie>, JsonApiError> {
    let Path(id) = id?;
    let Json(movie) = payload?;
    Ok(Json(state.movies.update(id, movie).await?))
}

/// Delete the movie with this id.
#[utoipa::path(
    delete, path = "/movies/{id}", tag = "movies",
    params(("id" = i64, Path, description = "Movie id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Path(id) = id?;
    state.movies.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
