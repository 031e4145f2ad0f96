use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::exercises::exercise_routes;
use super::health::health_check;
use super::history::history_routes;
use super::openapi::{ApiDoc, DOCS_PATH, OPENAPI_PATH};
use super::routines::routine_routes;
use super::state::AppState;
use super::workouts::workout_routes;

pub fn create_routes(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health_check))
        .merge(exercise_routes())
        .merge(routine_routes())
        .merge(workout_routes())
        .merge(history_routes());

    Router::new()
        .nest("/api", api)
        .merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
