use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use utoipa::ToSchema;

use super::Exercise;

/// Lifecycle of a workout; `InProgress -> Completed` is the only transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "workout_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WorkoutStatus {
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Workout {
    pub id: Uuid,
    pub user_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: WorkoutStatus,
    pub routine_id: Option<Uuid>,
    /// Snapshot of the routine's name at start time.
    pub routine_name: Option<String>,
}

impl Workout {
    pub fn start(user_id: Uuid, routine_id: Option<Uuid>, routine_name: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            start_time: Utc::now(),
            end_time: None,
            status: WorkoutStatus::InProgress,
            routine_id,
            routine_name,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == WorkoutStatus::InProgress
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WorkoutSummary {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: WorkoutStatus,
    pub routine_name: Option<String>,
}

impl From<Workout> for WorkoutSummary {
    fn from(workout: Workout) -> Self {
        Self {
            id: workout.id,
            start_time: workout.start_time,
            end_time: workout.end_time,
            status: workout.status,
            routine_name: workout.routine_name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StartWorkoutQuery {
    pub routine_id: Option<Uuid>,
}

/// One recorded unit of work. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct WorkoutSet {
    pub id: Uuid,
    pub workout_id: Uuid,
    pub exercise_id: Uuid,
    pub set_number: i32,
    pub weight: f64,
    pub reps: i32,
    pub rpe: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LogSetRequest {
    pub exercise_id: Uuid,
    pub set_number: i32,
    pub weight: f64,
    pub reps: i32,
    pub rpe: Option<f64>,
}

impl WorkoutSet {
    pub fn from_request(workout_id: Uuid, request: LogSetRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            workout_id,
            exercise_id: request.exercise_id,
            set_number: request.set_number,
            weight: request.weight,
            reps: request.reps,
            rpe: request.rpe,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WorkoutSetDetail {
    #[serde(flatten)]
    pub set: WorkoutSet,
    #[serde(rename = "exercises")]
    pub exercise: Option<Exercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WorkoutDetail {
    #[serde(flatten)]
    pub workout: Workout,
    pub workout_sets: Vec<WorkoutSetDetail>,
}
