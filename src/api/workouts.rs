use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::auth::AuthUser;
use crate::error::{AppError, ErrorResponse};
use crate::models::{LogSetRequest, StartWorkoutQuery, WorkoutDetail, WorkoutSet, WorkoutSummary};
use crate::services::WorkoutService;

pub fn workout_routes() -> Router<AppState> {
    Router::new()
        .route("/workouts/active", get(get_active_workout))
        .route("/workouts/start", post(start_workout))
        .route("/workouts/:workout_id", get(get_workout))
        .route("/workouts/:workout_id/sets", post(log_set))
        .route("/workouts/:workout_id/finish", post(finish_workout))
}

/// The caller's in-progress workout, or `null`
#[utoipa::path(
    get,
    path = "/api/workouts/active",
    tag = "workouts",
    responses(
        (status = 200, description = "Active workout or null", body = Option<WorkoutSummary>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_active_workout(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Option<WorkoutSummary>>, AppError> {
    let service = WorkoutService::new(state.store()?);
    Ok(Json(service.active(user.user_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/workouts/start",
    tag = "workouts",
    params(
        ("routine_id" = Option<Uuid>, Query, description = "Routine whose name is snapshotted"),
    ),
    responses(
        (status = 200, description = "Workout started", body = WorkoutSummary),
        (status = 400, description = "An active workout already exists", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn start_workout(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Query(query), _): WithRejection<Query<StartWorkoutQuery>, AppError>,
) -> Result<Json<WorkoutSummary>, AppError> {
    let service = WorkoutService::new(state.store()?);
    Ok(Json(service.start(user.user_id, query.routine_id).await?))
}

/// Workout with its sets and each set's exercise
#[utoipa::path(
    get,
    path = "/api/workouts/{workout_id}",
    tag = "workouts",
    params(
        ("workout_id" = Uuid, Path, description = "Workout ID"),
    ),
    responses(
        (status = 200, description = "Workout with its sets", body = WorkoutDetail),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Workout not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_workout(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Path(workout_id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<WorkoutDetail>, AppError> {
    let service = WorkoutService::new(state.store()?);
    Ok(Json(service.get(user.user_id, workout_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/workouts/{workout_id}/sets",
    tag = "workouts",
    params(
        ("workout_id" = Uuid, Path, description = "Workout ID"),
    ),
    request_body = LogSetRequest,
    responses(
        (status = 200, description = "Set recorded", body = WorkoutSet),
        (status = 400, description = "Invalid set or workout not active", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Workout not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn log_set(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Path(workout_id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(request), _): WithRejection<Json<LogSetRequest>, AppError>,
) -> Result<Json<WorkoutSet>, AppError> {
    let service = WorkoutService::new(state.store()?);
    Ok(Json(service.log_set(user.user_id, workout_id, request).await?))
}

#[utoipa::path(
    post,
    path = "/api/workouts/{workout_id}/finish",
    tag = "workouts",
    params(
        ("workout_id" = Uuid, Path, description = "Workout ID"),
    ),
    responses(
        (status = 200, description = "Workout completed", body = WorkoutSummary),
        (status = 400, description = "Workout not active", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Workout not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn finish_workout(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Path(workout_id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<WorkoutSummary>, AppError> {
    let service = WorkoutService::new(state.store()?);
    Ok(Json(service.finish(user.user_id, workout_id).await?))
}
