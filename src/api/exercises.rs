use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use axum_extra::extract::WithRejection;

use crate::api::state::AppState;
use crate::error::{AppError, ErrorResponse};
use crate::models::{Exercise, ExerciseListQuery, ExerciseSearchQuery};
use crate::services::ExerciseService;

pub fn exercise_routes() -> Router<AppState> {
    Router::new()
        .route("/exercises", get(list_exercises))
        .route("/exercises/search", get(search_exercises))
}

/// List exercises, optionally filtered by `?search=`
#[utoipa::path(
    get,
    path = "/api/exercises",
    tag = "exercises",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive name filter"),
    ),
    responses(
        (status = 200, description = "Up to 50 exercises", body = [Exercise]),
    )
)]
pub async fn list_exercises(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ExerciseListQuery>, AppError>,
) -> Result<Json<Vec<Exercise>>, AppError> {
    let service = ExerciseService::new(state.store()?);
    let exercises = service.list(query.search.as_deref()).await?;
    Ok(Json(exercises))
}

/// Search exercises by name; `?q=` is required
#[utoipa::path(
    get,
    path = "/api/exercises/search",
    tag = "exercises",
    params(
        ("q" = String, Query, description = "Case-insensitive name fragment"),
    ),
    responses(
        (status = 200, description = "Up to 20 matching exercises", body = [Exercise]),
        (status = 400, description = "Missing query", body = ErrorResponse),
    )
)]
pub async fn search_exercises(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ExerciseSearchQuery>, AppError>,
) -> Result<Json<Vec<Exercise>>, AppError> {
    let service = ExerciseService::new(state.store()?);
    let exercises = service.search(&query.q).await?;
    Ok(Json(exercises))
}
