use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, put},
    Router,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::api::extract::ValidatedJson;
use crate::api::state::AppState;
use crate::auth::AuthUser;
use crate::error::{AppError, ErrorResponse};
use crate::models::{DeleteResponse, RoutineRequest, RoutineResponse};
use crate::services::RoutineService;

pub fn routine_routes() -> Router<AppState> {
    Router::new()
        .route("/routines", get(list_routines).post(create_routine))
        .route("/routines/:routine_id", put(update_routine).delete(delete_routine))
}

/// Get all routines for the authenticated user
#[utoipa::path(
    get,
    path = "/api/routines",
    tag = "routines",
    responses(
        (status = 200, description = "The caller's routines", body = [RoutineResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_routines(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<RoutineResponse>>, AppError> {
    let service = RoutineService::new(state.store()?);
    Ok(Json(service.list(user.user_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/routines",
    tag = "routines",
    request_body = RoutineRequest,
    responses(
        (status = 200, description = "Routine created", body = RoutineResponse),
        (status = 400, description = "Invalid routine", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_routine(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(request): ValidatedJson<RoutineRequest>,
) -> Result<Json<RoutineResponse>, AppError> {
    let service = RoutineService::new(state.store()?);
    Ok(Json(service.create(user.user_id, request).await?))
}

/// Replace a routine and its whole exercise list
#[utoipa::path(
    put,
    path = "/api/routines/{routine_id}",
    tag = "routines",
    params(
        ("routine_id" = Uuid, Path, description = "Routine ID"),
    ),
    request_body = RoutineRequest,
    responses(
        (status = 200, description = "Routine replaced", body = RoutineResponse),
        (status = 400, description = "Invalid routine", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Routine not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_routine(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Path(routine_id), _): WithRejection<Path<Uuid>, AppError>,
    ValidatedJson(request): ValidatedJson<RoutineRequest>,
) -> Result<Json<RoutineResponse>, AppError> {
    let service = RoutineService::new(state.store()?);
    Ok(Json(service.update(user.user_id, routine_id, request).await?))
}

#[utoipa::path(
    delete,
    path = "/api/routines/{routine_id}",
    tag = "routines",
    params(
        ("routine_id" = Uuid, Path, description = "Routine ID"),
    ),
    responses(
        (status = 200, description = "Routine deleted", body = DeleteResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Routine not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_routine(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Path(routine_id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<DeleteResponse>, AppError> {
    let service = RoutineService::new(state.store()?);
    Ok(Json(service.delete(user.user_id, routine_id).await?))
}
