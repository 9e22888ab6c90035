use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use models::user::User;
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::AppState;

/// List every user in stored order.
#[utoipa::path(
    get, path = "/users", tag = "users",
    responses(
        (status = 200, description = "All users in stored order", body = [crate::openapi::UserDoc]),
        (status = 500, description = "Backing document unreadable", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, JsonApiError> {
    let users = state.users.list().await?;
    info!(count = users.len(), "list users");
    Ok(Json(users))
}

/// Fetch one user; the name is matched ignoring case.
#[utoipa::path(
    get, path = "/users/{name}", tag = "users",
    params(("name" = String, Path, description = "User name, matched case-insensitively")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::UserDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<User>, JsonApiError> {
    Ok(Json(state.users.get(&name).await?))
}

/// Create a user whose name is not taken in any casing.
#[utoipa::path(
    post, path = "/users", tag = "users",
    request_body = crate::openapi::UserDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::UserDoc),
        (status = 409, description = "Name already taken", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<User>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), JsonApiError> {
    let Json(user) = payload?;
    let created = state.users.create(user).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace a user with the full payload. A different name in the body renames it.
#[utoipa::path(
    put, path = "/users/{name}", tag = "users",
    params(("name" = String, Path, description = "User name, matched case-insensitively")),
    request_body = crate::openapi::UserDoc,
    responses(
        (status = 200, description = "Replaced", body = crate::openapi::UserDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<User>, JsonRejection>,
) -> Result<Json<User>, JsonApiError> {
    let Json(user) = payload?;
    Ok(Json(state.users.update(&name, user).await?))
}

/// Delete every user matching the name.
#[utoipa::path(
    delete, path = "/users/{name}", tag = "users",
    params(("name" = String, Path, description = "User name, matched case-insensitively")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, JsonApiError> {
    state.users.delete(&name).await?;
    Ok(StatusCode::NO_CONTENT)
}
