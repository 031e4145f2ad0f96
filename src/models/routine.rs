use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Routine {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub schedule_day_index: i32,
}

/// A routine's exercise entry with the referenced exercise's name joined in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RoutineExerciseDetail {
    pub id: Uuid,
    pub exercise_id: Uuid,
    pub exercise_name: String,
    pub order: i32,
    pub target_sets: i32,
    pub target_reps_min: i32,
    pub target_reps_max: i32,
}

/// A routine together with every exercise entry that belongs to it.
#[derive(Debug, Clone)]
pub struct RoutineWithExercises {
    pub routine: Routine,
    pub exercises: Vec<RoutineExerciseDetail>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_rep_range"))]
pub struct RoutineExerciseRequest {
    pub exercise_id: Uuid,
    pub order: i32,
    #[validate(range(min = 1, message = "target_sets must be at least 1"))]
    pub target_sets: i32,
    #[validate(range(min = 0, message = "target_reps_min cannot be negative"))]
    pub target_reps_min: i32,
    pub target_reps_max: i32,
}

fn validate_rep_range(exercise: &RoutineExerciseRequest) -> Result<(), ValidationError> {
    if exercise.target_reps_min > exercise.target_reps_max {
        let mut err = ValidationError::new("rep_range");
        err.message = Some("target_reps_min cannot exceed target_reps_max".into());
        return Err(err);
    }
    Ok(())
}

/// Body of both create and update; an update replaces the whole exercise list.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RoutineRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    /// 0 = Sunday, 1 = Monday, ...
    #[validate(range(min = 0, max = 6, message = "schedule_day_index must be between 0 and 6"))]
    pub schedule_day_index: i32,
    #[validate(nested)]
    pub exercises: Vec<RoutineExerciseRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RoutineResponse {
    pub id: Uuid,
    pub name: String,
    pub schedule_day_index: i32,
    pub exercises: Vec<RoutineExerciseDetail>,
}

impl RoutineResponse {
    /// Create and update answer with an empty exercise list; only list joins them in.
    pub fn without_exercises(routine: Routine) -> Self {
        Self {
            id: routine.id,
            name: routine.name,
            schedule_day_index: routine.schedule_day_index,
            exercises: Vec::new(),
        }
    }
}

impl From<RoutineWithExercises> for RoutineResponse {
    fn from(value: RoutineWithExercises) -> Self {
        let mut exercises = value.exercises;
        // stable: entries sharing an order keep insertion order
        exercises.sort_by_key(|exercise| exercise.order);

        Self {
            id: value.routine.id,
            name: value.routine.name,
            schedule_day_index: value.routine.schedule_day_index,
            exercises,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub status: String,
}

impl DeleteResponse {
    pub fn deleted() -> Self {
        Self {
            status: "deleted".to_string(),
        }
    }
}
