use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use utoipa::ToSchema;

use super::{Workout, WorkoutSet, WorkoutStatus};

pub const DEFAULT_HISTORY_LIMIT: u32 = 20;
pub const MAX_HISTORY_LIMIT: u32 = 100;

/// The slice of a set that volume aggregation needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetVolume {
    pub weight: f64,
    pub reps: i32,
}

impl SetVolume {
    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps)
    }
}

#[derive(Debug, Clone)]
pub struct CompletedWorkout {
    pub workout: Workout,
    pub sets: Vec<SetVolume>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

fn default_limit() -> u32 {
    DEFAULT_HISTORY_LIMIT
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub routine_name: Option<String>,
    pub total_volume: f64,
    pub total_sets: usize,
}

/// The owning workout's fields embedded in an exercise history row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WorkoutRef {
    pub user_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub status: WorkoutStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExerciseHistoryEntry {
    #[serde(flatten)]
    pub set: WorkoutSet,
    pub workouts: WorkoutRef,
}
