use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use utoipa::ToSchema;

/// Global reference data, not owned by any user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub muscle_group: String,
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct ExerciseListQuery {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExerciseSearchQuery {
    pub q: String,
}
