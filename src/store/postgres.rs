use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use super::{StoreResult, WorkoutStore};
use crate::models::{
    CompletedWorkout, Exercise, ExerciseHistoryEntry, Routine, RoutineExerciseDetail,
    RoutineExerciseRequest, RoutineWithExercises, SetVolume, Workout, WorkoutRef, WorkoutSet,
    WorkoutSetDetail, WorkoutStatus,
};

const WORKOUT_COLUMNS: &str =
    "id, user_id, start_time, end_time, status, routine_id, routine_name";

/// [`WorkoutStore`] backed by a Postgres pool.
#[derive(Debug, Clone)]
pub struct PgWorkoutStore {
    db: PgPool,
}

impl PgWorkoutStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[derive(FromRow)]
struct RoutineExerciseRow {
    routine_id: Uuid,
    #[sqlx(flatten)]
    detail: RoutineExerciseDetail,
}

#[derive(FromRow)]
struct SetWithExerciseRow {
    #[sqlx(flatten)]
    set: WorkoutSet,
    exercise_name: Option<String>,
    muscle_group: Option<String>,
    category: Option<String>,
}

#[derive(FromRow)]
struct SetVolumeRow {
    workout_id: Uuid,
    weight: f64,
    reps: i32,
}

#[derive(FromRow)]
struct ExerciseHistoryRow {
    #[sqlx(flatten)]
    set: WorkoutSet,
    user_id: Uuid,
    start_time: DateTime<Utc>,
    status: WorkoutStatus,
}

/// Wraps a search term for `ILIKE`, escaping the pattern metacharacters so
/// the match is a literal substring.
pub(crate) fn ilike_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl WorkoutStore for PgWorkoutStore {
    async fn search_exercises(
        &self,
        name_contains: Option<&str>,
        limit: i64,
    ) -> StoreResult<Vec<Exercise>> {
        let exercises = match name_contains {
            Some(term) => {
                sqlx::query_as::<_, Exercise>(
                    "SELECT id, name, muscle_group, category FROM exercises
                     WHERE name ILIKE $1
                     ORDER BY name
                     LIMIT $2",
                )
                .bind(ilike_pattern(term))
                .bind(limit)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, Exercise>(
                    "SELECT id, name, muscle_group, category FROM exercises
                     ORDER BY name
                     LIMIT $1",
                )
                .bind(limit)
                .fetch_all(&self.db)
                .await?
            }
        };

        Ok(exercises)
    }

    async fn list_routines(&self, user_id: Uuid) -> StoreResult<Vec<RoutineWithExercises>> {
        let routines = sqlx::query_as::<_, Routine>(
            "SELECT id, user_id, name, schedule_day_index FROM routines
             WHERE user_id = $1
             ORDER BY schedule_day_index",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        if routines.is_empty() {
            return Ok(Vec::new());
        }

        let routine_ids: Vec<Uuid> = routines.iter().map(|routine| routine.id).collect();
        let rows = sqlx::query_as::<_, RoutineExerciseRow>(
            r#"
            SELECT
                re.routine_id, re.id, re.exercise_id,
                COALESCE(e.name, '') AS exercise_name,
                re."order", re.target_sets, re.target_reps_min, re.target_reps_max
            FROM routine_exercises re
            LEFT JOIN exercises e ON e.id = re.exercise_id
            WHERE re.routine_id = ANY($1)
            ORDER BY re."order"
            "#,
        )
        .bind(&routine_ids)
        .fetch_all(&self.db)
        .await?;

        let mut by_routine: HashMap<Uuid, Vec<RoutineExerciseDetail>> = HashMap::new();
        for row in rows {
            by_routine.entry(row.routine_id).or_default().push(row.detail);
        }

        Ok(routines
            .into_iter()
            .map(|routine| {
                let exercises = by_routine.remove(&routine.id).unwrap_or_default();
                RoutineWithExercises { routine, exercises }
            })
            .collect())
    }

    async fn find_routine(&self, routine_id: Uuid, user_id: Uuid) -> StoreResult<Option<Routine>> {
        let routine = sqlx::query_as::<_, Routine>(
            "SELECT id, user_id, name, schedule_day_index FROM routines
             WHERE id = $1 AND user_id = $2",
        )
        .bind(routine_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(routine)
    }

    async fn insert_routine(&self, routine: &Routine) -> StoreResult<Routine> {
        let routine = sqlx::query_as::<_, Routine>(
            "INSERT INTO routines (id, user_id, name, schedule_day_index)
             VALUES ($1, $2, $3, $4)
             RETURNING id, user_id, name, schedule_day_index",
        )
        .bind(routine.id)
        .bind(routine.user_id)
        .bind(&routine.name)
        .bind(routine.schedule_day_index)
        .fetch_one(&self.db)
        .await?;

        Ok(routine)
    }

    async fn update_routine(&self, routine: &Routine) -> StoreResult<()> {
        sqlx::query("UPDATE routines SET name = $2, schedule_day_index = $3 WHERE id = $1")
            .bind(routine.id)
            .bind(&routine.name)
            .bind(routine.schedule_day_index)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    async fn delete_routine(&self, routine_id: Uuid) -> StoreResult<()> {
        sqlx::query("DELETE FROM routines WHERE id = $1")
            .bind(routine_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    async fn insert_routine_exercises(
        &self,
        routine_id: Uuid,
        exercises: &[RoutineExerciseRequest],
    ) -> StoreResult<()> {
        if exercises.is_empty() {
            return Ok(());
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            r#"INSERT INTO routine_exercises (id, routine_id, exercise_id, "order", target_sets, target_reps_min, target_reps_max) "#,
        );
        builder.push_values(exercises, |mut row, exercise| {
            row.push_bind(Uuid::new_v4())
                .push_bind(routine_id)
                .push_bind(exercise.exercise_id)
                .push_bind(exercise.order)
                .push_bind(exercise.target_sets)
                .push_bind(exercise.target_reps_min)
                .push_bind(exercise.target_reps_max);
        });
        builder.build().execute(&self.db).await?;

        debug!(%routine_id, count = exercises.len(), "Inserted routine exercises");
        Ok(())
    }

    async fn delete_routine_exercises(&self, routine_id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM routine_exercises WHERE routine_id = $1")
            .bind(routine_id)
            .execute(&self.db)
            .await?;

        debug!(%routine_id, removed = result.rows_affected(), "Deleted routine exercises");
        Ok(())
    }

    async fn find_active_workout(&self, user_id: Uuid) -> StoreResult<Option<Workout>> {
        let workout = sqlx::query_as::<_, Workout>(&format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts WHERE user_id = $1 AND status = $2 LIMIT 1"
        ))
        .bind(user_id)
        .bind(WorkoutStatus::InProgress)
        .fetch_optional(&self.db)
        .await?;

        Ok(workout)
    }

    async fn find_workout(&self, workout_id: Uuid, user_id: Uuid) -> StoreResult<Option<Workout>> {
        let workout = sqlx::query_as::<_, Workout>(&format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts WHERE id = $1 AND user_id = $2"
        ))
        .bind(workout_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(workout)
    }

    async fn insert_workout(&self, workout: &Workout) -> StoreResult<Workout> {
        let workout = sqlx::query_as::<_, Workout>(&format!(
            "INSERT INTO workouts ({WORKOUT_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {WORKOUT_COLUMNS}"
        ))
        .bind(workout.id)
        .bind(workout.user_id)
        .bind(workout.start_time)
        .bind(workout.end_time)
        .bind(workout.status)
        .bind(workout.routine_id)
        .bind(&workout.routine_name)
        .fetch_one(&self.db)
        .await?;

        Ok(workout)
    }

    async fn complete_workout(
        &self,
        workout_id: Uuid,
        end_time: DateTime<Utc>,
    ) -> StoreResult<Workout> {
        let workout = sqlx::query_as::<_, Workout>(&format!(
            "UPDATE workouts SET end_time = $2, status = $3
             WHERE id = $1
             RETURNING {WORKOUT_COLUMNS}"
        ))
        .bind(workout_id)
        .bind(end_time)
        .bind(WorkoutStatus::Completed)
        .fetch_one(&self.db)
        .await?;

        Ok(workout)
    }

    async fn list_workout_sets(&self, workout_id: Uuid) -> StoreResult<Vec<WorkoutSetDetail>> {
        let rows = sqlx::query_as::<_, SetWithExerciseRow>(
            r#"
            SELECT
                s.id, s.workout_id, s.exercise_id, s.set_number, s.weight, s.reps, s.rpe, s.created_at,
                e.name AS exercise_name, e.muscle_group, e.category
            FROM workout_sets s
            LEFT JOIN exercises e ON e.id = s.exercise_id
            WHERE s.workout_id = $1
            ORDER BY s.set_number, s.created_at
            "#,
        )
        .bind(workout_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let exercise = match (row.exercise_name, row.muscle_group, row.category) {
                    (Some(name), Some(muscle_group), Some(category)) => Some(Exercise {
                        id: row.set.exercise_id,
                        name,
                        muscle_group,
                        category,
                    }),
                    _ => None,
                };
                WorkoutSetDetail {
                    set: row.set,
                    exercise,
                }
            })
            .collect())
    }

    async fn insert_workout_set(&self, set: &WorkoutSet) -> StoreResult<WorkoutSet> {
        let set = sqlx::query_as::<_, WorkoutSet>(
            "INSERT INTO workout_sets (id, workout_id, exercise_id, set_number, weight, reps, rpe, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id, workout_id, exercise_id, set_number, weight, reps, rpe, created_at",
        )
        .bind(set.id)
        .bind(set.workout_id)
        .bind(set.exercise_id)
        .bind(set.set_number)
        .bind(set.weight)
        .bind(set.reps)
        .bind(set.rpe)
        .bind(set.created_at)
        .fetch_one(&self.db)
        .await?;

        Ok(set)
    }

    async fn list_completed_workouts(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<CompletedWorkout>> {
        let workouts = sqlx::query_as::<_, Workout>(&format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts
             WHERE user_id = $1 AND status = $2
             ORDER BY start_time DESC
             LIMIT $3 OFFSET $4"
        ))
        .bind(user_id)
        .bind(WorkoutStatus::Completed)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        if workouts.is_empty() {
            return Ok(Vec::new());
        }

        let workout_ids: Vec<Uuid> = workouts.iter().map(|workout| workout.id).collect();
        let rows = sqlx::query_as::<_, SetVolumeRow>(
            "SELECT workout_id, weight, reps FROM workout_sets WHERE workout_id = ANY($1)",
        )
        .bind(&workout_ids)
        .fetch_all(&self.db)
        .await?;

        let mut by_workout: HashMap<Uuid, Vec<SetVolume>> = HashMap::new();
        for row in rows {
            by_workout.entry(row.workout_id).or_default().push(SetVolume {
                weight: row.weight,
                reps: row.reps,
            });
        }

        Ok(workouts
            .into_iter()
            .map(|workout| {
                let sets = by_workout.remove(&workout.id).unwrap_or_default();
                CompletedWorkout { workout, sets }
            })
            .collect())
    }

    async fn exercise_history(
        &self,
        user_id: Uuid,
        exercise_id: Uuid,
        limit: i64,
    ) -> StoreResult<Vec<ExerciseHistoryEntry>> {
        let rows = sqlx::query_as::<_, ExerciseHistoryRow>(
            r#"
            SELECT
                s.id, s.workout_id, s.exercise_id, s.set_number, s.weight, s.reps, s.rpe, s.created_at,
                w.user_id, w.start_time, w.status
            FROM workout_sets s
            JOIN workouts w ON w.id = s.workout_id
            WHERE s.exercise_id = $1 AND w.user_id = $2 AND w.status = $3
            ORDER BY w.start_time DESC, s.set_number DESC
            LIMIT $4
            "#,
        )
        .bind(exercise_id)
        .bind(user_id)
        .bind(WorkoutStatus::Completed)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ExerciseHistoryEntry {
                set: row.set,
                workouts: WorkoutRef {
                    user_id: row.user_id,
                    start_time: row.start_time,
                    status: row.status,
                },
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ilike_pattern_wraps_term() {
        assert_eq!(ilike_pattern("bench"), "%bench%");
        assert_eq!(ilike_pattern(""), "%%");
    }

    #[test]
    fn test_ilike_pattern_escapes_metacharacters() {
        assert_eq!(ilike_pattern("100%"), "%100\\%%");
        assert_eq!(ilike_pattern("a_b"), "%a\\_b%");
        assert_eq!(ilike_pattern("c:\\"), "%c:\\\\%");
    }
}
