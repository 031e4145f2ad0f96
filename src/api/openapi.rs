//! OpenAPI description of the HTTP surface, generated from the handler and
//! wire types with utoipa. Served at `/api/openapi.json` with a Swagger UI at
//! `/api/docs`.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use super::{exercises, health, history, routines, workouts};
use crate::error::ErrorResponse;
use crate::models::{
    DeleteResponse, Exercise, ExerciseHistoryEntry, HistoryEntry, LogSetRequest,
    RoutineExerciseDetail, RoutineExerciseRequest, RoutineRequest, RoutineResponse, Workout,
    WorkoutDetail, WorkoutRef, WorkoutSet, WorkoutSetDetail, WorkoutStatus, WorkoutSummary,
};

pub const OPENAPI_PATH: &str = "/api/openapi.json";
pub const DOCS_PATH: &str = "/api/docs";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Workout Tracker API",
        version = "0.1.0",
        description = "Exercise catalogue, weekly routines, live workout logging and training history"
    ),
    paths(
        health::health_check,
        exercises::list_exercises,
        exercises::search_exercises,
        routines::list_routines,
        routines::create_routine,
        routines::update_routine,
        routines::delete_routine,
        workouts::get_active_workout,
        workouts::start_workout,
        workouts::get_workout,
        workouts::log_set,
        workouts::finish_workout,
        history::get_history,
        history::get_exercise_history,
    ),
    components(schemas(
        ErrorResponse,
        health::HealthResponse,
        Exercise,
        RoutineRequest,
        RoutineExerciseRequest,
        RoutineResponse,
        RoutineExerciseDetail,
        DeleteResponse,
        WorkoutStatus,
        Workout,
        WorkoutSummary,
        WorkoutDetail,
        WorkoutSet,
        WorkoutSetDetail,
        LogSetRequest,
        HistoryEntry,
        ExerciseHistoryEntry,
        WorkoutRef,
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "exercises", description = "Exercise catalogue"),
        (name = "routines", description = "Weekly routines"),
        (name = "workouts", description = "Workout sessions and sets"),
        (name = "history", description = "Completed workouts and per-exercise history"),
    ),
    modifiers(&BearerAuth)
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by authenticated routes.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");

        assert!(components.security_schemes.contains_key("bearer_auth"));
        assert!(components.schemas.contains_key("ErrorResponse"));
    }
}
