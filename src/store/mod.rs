//! Persistence boundary.
//!
//! Handlers never talk to the database directly: every read and write goes
//! through [`WorkoutStore`], which the Postgres pool implements in production.
//! Ownership is always expressed as a filter on `user_id`, so a row that
//! belongs to someone else looks exactly like a row that does not exist.

pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    CompletedWorkout, Exercise, ExerciseHistoryEntry, Routine, RoutineExerciseRequest,
    RoutineWithExercises, Workout, WorkoutSet, WorkoutSetDetail,
};

pub use postgres::PgWorkoutStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                return StoreError::UniqueViolation(constraint);
            }
        }
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait WorkoutStore: Send + Sync {
    /// Case-insensitive substring match on name when `name_contains` is set.
    async fn search_exercises(
        &self,
        name_contains: Option<&str>,
        limit: i64,
    ) -> StoreResult<Vec<Exercise>>;

    /// The caller's routines ordered by schedule day, exercises joined in.
    async fn list_routines(&self, user_id: Uuid) -> StoreResult<Vec<RoutineWithExercises>>;

    async fn find_routine(&self, routine_id: Uuid, user_id: Uuid) -> StoreResult<Option<Routine>>;

    async fn insert_routine(&self, routine: &Routine) -> StoreResult<Routine>;

    /// Overwrites name and schedule day.
    async fn update_routine(&self, routine: &Routine) -> StoreResult<()>;

    async fn delete_routine(&self, routine_id: Uuid) -> StoreResult<()>;

    async fn insert_routine_exercises(
        &self,
        routine_id: Uuid,
        exercises: &[RoutineExerciseRequest],
    ) -> StoreResult<()>;

    async fn delete_routine_exercises(&self, routine_id: Uuid) -> StoreResult<()>;

    async fn find_active_workout(&self, user_id: Uuid) -> StoreResult<Option<Workout>>;

    async fn find_workout(&self, workout_id: Uuid, user_id: Uuid) -> StoreResult<Option<Workout>>;

    /// Fails with [`StoreError::UniqueViolation`] when the user already has an
    /// in-progress workout.
    async fn insert_workout(&self, workout: &Workout) -> StoreResult<Workout>;

    async fn complete_workout(
        &self,
        workout_id: Uuid,
        end_time: DateTime<Utc>,
    ) -> StoreResult<Workout>;

    async fn list_workout_sets(&self, workout_id: Uuid) -> StoreResult<Vec<WorkoutSetDetail>>;

    async fn insert_workout_set(&self, set: &WorkoutSet) -> StoreResult<WorkoutSet>;

    /// Completed workouts, newest start time first, with their sets' weight and reps.
    async fn list_completed_workouts(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<CompletedWorkout>>;

    /// Most recent sets of one exercise across the user's completed workouts.
    async fn exercise_history(
        &self,
        user_id: Uuid,
        exercise_id: Uuid,
        limit: i64,
    ) -> StoreResult<Vec<ExerciseHistoryEntry>>;
}
