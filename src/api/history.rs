use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::auth::AuthUser;
use crate::error::{AppError, ErrorResponse};
use crate::models::{ExerciseHistoryEntry, HistoryEntry, HistoryQuery};
use crate::services::HistoryService;

pub fn history_routes() -> Router<AppState> {
    Router::new()
        .route("/history", get(get_history))
        .route("/exercises/:exercise_id/history", get(get_exercise_history))
}

/// Paginated completed workouts with volume totals
#[utoipa::path(
    get,
    path = "/api/history",
    tag = "history",
    params(
        ("limit" = Option<u32>, Query, description = "Page size, default 20, at most 100"),
        ("offset" = Option<u32>, Query, description = "Entries to skip, default 0"),
    ),
    responses(
        (status = 200, description = "Completed workouts, newest first", body = [HistoryEntry]),
        (status = 400, description = "Invalid pagination", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_history(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Query(query), _): WithRejection<Query<HistoryQuery>, AppError>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    let service = HistoryService::new(state.store()?);
    Ok(Json(service.history(user.user_id, query.limit, query.offset).await?))
}

/// Previous sets for an exercise, for the "previous" column while logging
#[utoipa::path(
    get,
    path = "/api/exercises/{exercise_id}/history",
    tag = "history",
    params(
        ("exercise_id" = Uuid, Path, description = "Exercise ID"),
    ),
    responses(
        (status = 200, description = "Last 10 sets from completed workouts", body = [ExerciseHistoryEntry]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_exercise_history(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Path(exercise_id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<Vec<ExerciseHistoryEntry>>, AppError> {
    let service = HistoryService::new(state.store()?);
    Ok(Json(service.exercise_history(user.user_id, exercise_id).await?))
}
