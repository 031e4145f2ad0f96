// Shared fixtures for the integration tests: an in-memory store and a router driver.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use workout_tracker::api::{routes::create_routes, state::AppState};
use workout_tracker::auth::{TokenVerifier, DEFAULT_AUDIENCE};
use workout_tracker::models::*;
use workout_tracker::store::{StoreError, StoreResult, WorkoutStore};

pub const TEST_SECRET: &str = "test_secret_key_for_testing_only";

#[derive(Default)]
struct Tables {
    exercises: Vec<Exercise>,
    routines: Vec<Routine>,
    routine_exercises: Vec<(Uuid, Uuid, RoutineExerciseRequest)>,
    workouts: Vec<Workout>,
    sets: Vec<WorkoutSet>,
}

/// [`WorkoutStore`] over plain vectors, including the one-active-workout index.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn seed_exercise(&self, name: &str, muscle_group: &str, category: &str) -> Exercise {
        let exercise = Exercise {
            id: Uuid::new_v4(),
            name: name.to_string(),
            muscle_group: muscle_group.to_string(),
            category: category.to_string(),
        };
        self.tables.lock().unwrap().exercises.push(exercise.clone());
        exercise
    }

    /// Exercise ids currently associated with a routine, in insertion order.
    pub fn routine_exercise_ids(&self, routine_id: Uuid) -> Vec<Uuid> {
        self.tables
            .lock()
            .unwrap()
            .routine_exercises
            .iter()
            .filter(|(owner, _, _)| *owner == routine_id)
            .map(|(_, _, exercise)| exercise.exercise_id)
            .collect()
    }

    pub fn routine_exists(&self, routine_id: Uuid) -> bool {
        self.tables
            .lock()
            .unwrap()
            .routines
            .iter()
            .any(|routine| routine.id == routine_id)
    }

    pub fn set_start_time(&self, workout_id: Uuid, start_time: DateTime<Utc>) {
        let mut tables = self.tables.lock().unwrap();
        if let Some(workout) = tables.workouts.iter_mut().find(|w| w.id == workout_id) {
            workout.start_time = start_time;
        }
    }

    pub fn in_progress_count(&self, user_id: Uuid) -> usize {
        self.tables
            .lock()
            .unwrap()
            .workouts
            .iter()
            .filter(|w| w.user_id == user_id && w.is_active())
            .count()
    }
}

#[async_trait]
impl WorkoutStore for MemoryStore {
    async fn search_exercises(
        &self,
        name_contains: Option<&str>,
        limit: i64,
    ) -> StoreResult<Vec<Exercise>> {
        let needle = name_contains.map(str::to_lowercase);
        let tables = self.tables.lock().unwrap();
        let mut matches: Vec<Exercise> = tables
            .exercises
            .iter()
            .filter(|exercise| match &needle {
                Some(needle) => exercise.name.to_lowercase().contains(needle.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        matches.truncate(limit as usize);
        Ok(matches)
    }

    async fn list_routines(&self, user_id: Uuid) -> StoreResult<Vec<RoutineWithExercises>> {
        let tables = self.tables.lock().unwrap();
        let mut routines: Vec<Routine> = tables
            .routines
            .iter()
            .filter(|routine| routine.user_id == user_id)
            .cloned()
            .collect();
        routines.sort_by_key(|routine| routine.schedule_day_index);

        Ok(routines
            .into_iter()
            .map(|routine| {
                let exercises = tables
                    .routine_exercises
                    .iter()
                    .filter(|(owner, _, _)| *owner == routine.id)
                    .map(|(_, id, entry)| RoutineExerciseDetail {
                        id: *id,
                        exercise_id: entry.exercise_id,
                        exercise_name: tables
                            .exercises
                            .iter()
                            .find(|exercise| exercise.id == entry.exercise_id)
                            .map(|exercise| exercise.name.clone())
                            .unwrap_or_default(),
                        order: entry.order,
                        target_sets: entry.target_sets,
                        target_reps_min: entry.target_reps_min,
                        target_reps_max: entry.target_reps_max,
                    })
                    .collect();
                RoutineWithExercises { routine, exercises }
            })
            .collect())
    }

    async fn find_routine(&self, routine_id: Uuid, user_id: Uuid) -> StoreResult<Option<Routine>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .routines
            .iter()
            .find(|routine| routine.id == routine_id && routine.user_id == user_id)
            .cloned())
    }

    async fn insert_routine(&self, routine: &Routine) -> StoreResult<Routine> {
        self.tables.lock().unwrap().routines.push(routine.clone());
        Ok(routine.clone())
    }

    async fn update_routine(&self, routine: &Routine) -> StoreResult<()> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(existing) = tables.routines.iter_mut().find(|r| r.id == routine.id) {
            existing.name = routine.name.clone();
            existing.schedule_day_index = routine.schedule_day_index;
        }
        Ok(())
    }

    async fn delete_routine(&self, routine_id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.lock().unwrap();
        tables.routines.retain(|routine| routine.id != routine_id);
        for workout in tables.workouts.iter_mut() {
            if workout.routine_id == Some(routine_id) {
                workout.routine_id = None;
            }
        }
        Ok(())
    }

    async fn insert_routine_exercises(
        &self,
        routine_id: Uuid,
        exercises: &[RoutineExerciseRequest],
    ) -> StoreResult<()> {
        let mut tables = self.tables.lock().unwrap();
        for exercise in exercises {
            tables
                .routine_exercises
                .push((routine_id, Uuid::new_v4(), exercise.clone()));
        }
        Ok(())
    }

    async fn delete_routine_exercises(&self, routine_id: Uuid) -> StoreResult<()> {
        self.tables
            .lock()
            .unwrap()
            .routine_exercises
            .retain(|(owner, _, _)| *owner != routine_id);
        Ok(())
    }

    async fn find_active_workout(&self, user_id: Uuid) -> StoreResult<Option<Workout>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .workouts
            .iter()
            .find(|workout| workout.user_id == user_id && workout.is_active())
            .cloned())
    }

    async fn find_workout(&self, workout_id: Uuid, user_id: Uuid) -> StoreResult<Option<Workout>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .workouts
            .iter()
            .find(|workout| workout.id == workout_id && workout.user_id == user_id)
            .cloned())
    }

    async fn insert_workout(&self, workout: &Workout) -> StoreResult<Workout> {
        let mut tables = self.tables.lock().unwrap();
        let duplicate_active = workout.is_active()
            && tables
                .workouts
                .iter()
                .any(|existing| existing.user_id == workout.user_id && existing.is_active());
        if duplicate_active {
            return Err(StoreError::UniqueViolation("idx_workouts_one_active".to_string()));
        }
        tables.workouts.push(workout.clone());
        Ok(workout.clone())
    }

    async fn complete_workout(
        &self,
        workout_id: Uuid,
        end_time: DateTime<Utc>,
    ) -> StoreResult<Workout> {
        let mut tables = self.tables.lock().unwrap();
        let workout = tables
            .workouts
            .iter_mut()
            .find(|workout| workout.id == workout_id)
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))?;
        workout.end_time = Some(end_time);
        workout.status = WorkoutStatus::Completed;
        Ok(workout.clone())
    }

    async fn list_workout_sets(&self, workout_id: Uuid) -> StoreResult<Vec<WorkoutSetDetail>> {
        let tables = self.tables.lock().unwrap();
        let mut sets: Vec<WorkoutSet> = tables
            .sets
            .iter()
            .filter(|set| set.workout_id == workout_id)
            .cloned()
            .collect();
        sets.sort_by_key(|set| (set.set_number, set.created_at));

        Ok(sets
            .into_iter()
            .map(|set| {
                let exercise = tables
                    .exercises
                    .iter()
                    .find(|exercise| exercise.id == set.exercise_id)
                    .cloned();
                WorkoutSetDetail { set, exercise }
            })
            .collect())
    }

    async fn insert_workout_set(&self, set: &WorkoutSet) -> StoreResult<WorkoutSet> {
        self.tables.lock().unwrap().sets.push(set.clone());
        Ok(set.clone())
    }

    async fn list_completed_workouts(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<CompletedWorkout>> {
        let tables = self.tables.lock().unwrap();
        let mut workouts: Vec<Workout> = tables
            .workouts
            .iter()
            .filter(|w| w.user_id == user_id && w.status == WorkoutStatus::Completed)
            .cloned()
            .collect();
        workouts.sort_by(|a, b| b.start_time.cmp(&a.start_time));

        Ok(workouts
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|workout| {
                let sets = tables
                    .sets
                    .iter()
                    .filter(|set| set.workout_id == workout.id)
                    .map(|set| SetVolume {
                        weight: set.weight,
                        reps: set.reps,
                    })
                    .collect();
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
        let tables = self.tables.lock().unwrap();
        let mut entries: Vec<ExerciseHistoryEntry> = tables
            .sets
            .iter()
            .filter(|set| set.exercise_id == exercise_id)
            .filter_map(|set| {
                let workout = tables.workouts.iter().find(|w| w.id == set.workout_id)?;
                (workout.user_id == user_id && workout.status == WorkoutStatus::Completed).then(|| {
                    ExerciseHistoryEntry {
                        set: set.clone(),
                        workouts: WorkoutRef {
                            user_id: workout.user_id,
                            start_time: workout.start_time,
                            status: workout.status,
                        },
                    }
                })
            })
            .collect();
        entries.sort_by(|a, b| {
            b.workouts
                .start_time
                .cmp(&a.workouts.start_time)
                .then(b.set.set_number.cmp(&a.set.set_number))
        });
        entries.truncate(limit as usize);
        Ok(entries)
    }
}

/// Sign a token the way the identity provider would.
pub fn sign_token(claims: Value, secret: &str) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn token_for(user_id: Uuid) -> String {
    sign_token(
        json!({
            "sub": user_id.to_string(),
            "email": "lifter@example.com",
            "aud": DEFAULT_AUDIENCE,
            "role": "authenticated",
            "exp": (Utc::now() + Duration::hours(1)).timestamp(),
        }),
        TEST_SECRET,
    )
}

/// The full router wired to a fresh [`MemoryStore`].
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let state = AppState::new(
            Some(store.clone() as Arc<dyn WorkoutStore>),
            Some(TokenVerifier::new(TEST_SECRET, DEFAULT_AUDIENCE)),
        );

        Self {
            router: create_routes(state),
            store,
        }
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            router: create_routes(state),
            store: Arc::new(MemoryStore::default()),
        }
    }

    /// Send a request and decode the JSON body (`Null` when empty).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(token), body).await
    }

    /// Start a workout and return its id.
    pub async fn start_workout(&self, token: &str) -> Uuid {
        let (status, body) = self.post("/api/workouts/start", token, None).await;
        assert_eq!(status, StatusCode::OK, "start failed: {body}");
        Uuid::parse_str(body["id"].as_str().unwrap()).unwrap()
    }

    pub async fn log_set(
        &self,
        token: &str,
        workout_id: Uuid,
        exercise_id: Uuid,
        set_number: i32,
        weight: f64,
        reps: i32,
    ) -> (StatusCode, Value) {
        self.post(
            &format!("/api/workouts/{workout_id}/sets"),
            token,
            Some(json!({
                "exercise_id": exercise_id,
                "set_number": set_number,
                "weight": weight,
                "reps": reps,
            })),
        )
        .await
    }
}
