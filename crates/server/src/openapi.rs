use axum::Json;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String, pub detail: Option<String> }

#[derive(ToSchema)]
pub struct UserDoc { pub name: String, pub phone: i64, pub fave_color: String }

#[derive(ToSchema)]
pub struct MovieDoc {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub release_date: String,
    pub vote_average: f64,
    pub vote_count: i64,
    pub popularity: f64,
    pub genre_ids: Vec<i64>,
    pub original_title: Option<String>,
    pub original_language: Option<String>,
    pub adult: Option<bool>,
    pub video: Option<bool>,
    pub media_type: Option<String>,
    pub backdrop_path: Option<String>,
    pub poster_path: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::list_users,
        crate::routes::users::get_user,
        crate::routes::users::create_user,
        crate::routes::users::update_user,
        crate::routes::users::delete_user,
        crate::routes::movies::list_movies,
        crate::routes::movies::get_movie,
        crate::routes::movies::create_movie,
        crate::routes::movies::update_movie,
        crate::routes::movies::delete_movie,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            UserDoc,
            MovieDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "users", description = "Users stored in a JSON document"),
        (name = "movies", description = "Movies stored in a JSON document"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
