use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{CompletedWorkout, ExerciseHistoryEntry, HistoryEntry, MAX_HISTORY_LIMIT};
use crate::store::WorkoutStore;

pub const EXERCISE_HISTORY_LIMIT: i64 = 10;

#[derive(Clone)]
pub struct HistoryService {
    store: Arc<dyn WorkoutStore>,
}

impl HistoryService {
    pub fn new(store: Arc<dyn WorkoutStore>) -> Self {
        Self { store }
    }

    /// Completed workouts, newest first, with volume and set count per entry.
    #[instrument(skip(self))]
    pub async fn history(
        &self,
        user_id: Uuid,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<HistoryEntry>, AppError> {
        let limit = limit.min(MAX_HISTORY_LIMIT);
        let workouts = self
            .store
            .list_completed_workouts(user_id, i64::from(limit), i64::from(offset))
            .await?;

        Ok(workouts.into_iter().map(summarize).collect())
    }

    /// The last sets of an exercise, for the "previous" hint while logging.
    #[instrument(skip(self))]
    pub async fn exercise_history(
        &self,
        user_id: Uuid,
        exercise_id: Uuid,
    ) -> Result<Vec<ExerciseHistoryEntry>, AppError> {
        Ok(self
            .store
            .exercise_history(user_id, exercise_id, EXERCISE_HISTORY_LIMIT)
            .await?)
    }
}

/// Volume is the sum of weight x reps over every set of the workout.
pub fn summarize(completed: CompletedWorkout) -> HistoryEntry {
    let total_volume: f64 = completed.sets.iter().map(|set| set.volume()).sum();

    HistoryEntry {
        id: completed.workout.id,
        start_time: completed.workout.start_time,
        end_time: completed.workout.end_time,
        routine_name: completed.workout.routine_name,
        total_volume,
        total_sets: completed.sets.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SetVolume, Workout, WorkoutStatus};
    use chrono::Utc;

    fn completed(sets: Vec<SetVolume>) -> CompletedWorkout {
        let mut workout = Workout::start(Uuid::new_v4(), None, Some("Push".to_string()));
        workout.status = WorkoutStatus::Completed;
        workout.end_time = Some(Utc::now());
        CompletedWorkout { workout, sets }
    }

    #[test]
    fn test_summarize_sums_weight_times_reps() {
        let entry = summarize(completed(vec![
            SetVolume { weight: 100.0, reps: 5 },
            SetVolume { weight: 50.0, reps: 10 },
        ]));

        assert_eq!(entry.total_volume, 1000.0);
        assert_eq!(entry.total_sets, 2);
        assert_eq!(entry.routine_name.as_deref(), Some("Push"));
    }

    #[test]
    fn test_summarize_without_sets() {
        let entry = summarize(completed(Vec::new()));

        assert_eq!(entry.total_volume, 0.0);
        assert_eq!(entry.total_sets, 0);
    }

    #[test]
    fn test_summarize_fractional_weights() {
        let entry = summarize(completed(vec![SetVolume { weight: 22.5, reps: 8 }]));

        assert_eq!(entry.total_volume, 180.0);
    }
}
