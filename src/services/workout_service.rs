use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{LogSetRequest, Workout, WorkoutDetail, WorkoutSet, WorkoutSummary};
use crate::store::{StoreError, WorkoutStore};

const ACTIVE_WORKOUT_EXISTS: &str = "You already have an active workout";
const WORKOUT_NOT_ACTIVE: &str = "Workout is not active";
const WORKOUT_NOT_FOUND: &str = "Workout not found";

/// Drives a workout through `in_progress -> completed`.
#[derive(Clone)]
pub struct WorkoutService {
    store: Arc<dyn WorkoutStore>,
}

impl WorkoutService {
    pub fn new(store: Arc<dyn WorkoutStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn active(&self, user_id: Uuid) -> Result<Option<WorkoutSummary>, AppError> {
        let workout = self.store.find_active_workout(user_id).await?;
        Ok(workout.map(WorkoutSummary::from))
    }

    /// Start a workout, optionally snapshotting the name of one of the
    /// caller's routines. An unknown routine is silently ignored.
    #[instrument(skip(self))]
    pub async fn start(
        &self,
        user_id: Uuid,
        routine_id: Option<Uuid>,
    ) -> Result<WorkoutSummary, AppError> {
        if self.store.find_active_workout(user_id).await?.is_some() {
            return Err(AppError::conflict(ACTIVE_WORKOUT_EXISTS));
        }

        let routine = match routine_id {
            Some(routine_id) => self.store.find_routine(routine_id, user_id).await?,
            None => None,
        };
        let workout = Workout::start(
            user_id,
            routine.as_ref().map(|routine| routine.id),
            routine.map(|routine| routine.name),
        );

        // the unique index catches a start racing past the check above
        let workout = self
            .store
            .insert_workout(&workout)
            .await
            .map_err(|err| match err {
                StoreError::UniqueViolation(_) => AppError::conflict(ACTIVE_WORKOUT_EXISTS),
                other => AppError::from(other),
            })?;

        info!(workout_id = %workout.id, routine = ?workout.routine_name, "Workout started");
        Ok(WorkoutSummary::from(workout))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, user_id: Uuid, workout_id: Uuid) -> Result<WorkoutDetail, AppError> {
        let workout = self.owned_workout(user_id, workout_id).await?;
        let workout_sets = self.store.list_workout_sets(workout.id).await?;

        Ok(WorkoutDetail {
            workout,
            workout_sets,
        })
    }

    #[instrument(skip(self, request))]
    pub async fn log_set(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
        request: LogSetRequest,
    ) -> Result<WorkoutSet, AppError> {
        let workout = self.active_workout(user_id, workout_id).await?;

        let set = self
            .store
            .insert_workout_set(&WorkoutSet::from_request(workout.id, request))
            .await?;

        info!(%workout_id, set_id = %set.id, set_number = set.set_number, "Set logged");
        Ok(set)
    }

    #[instrument(skip(self))]
    pub async fn finish(&self, user_id: Uuid, workout_id: Uuid) -> Result<WorkoutSummary, AppError> {
        let workout = self.active_workout(user_id, workout_id).await?;

        let workout = self.store.complete_workout(workout.id, Utc::now()).await?;

        info!(%workout_id, "Workout finished");
        Ok(WorkoutSummary::from(workout))
    }

    async fn owned_workout(&self, user_id: Uuid, workout_id: Uuid) -> Result<Workout, AppError> {
        match self.store.find_workout(workout_id, user_id).await? {
            Some(workout) => Ok(workout),
            None => {
                warn!(%workout_id, "Workout not found for caller");
                Err(AppError::not_found(WORKOUT_NOT_FOUND))
            }
        }
    }

    async fn active_workout(&self, user_id: Uuid, workout_id: Uuid) -> Result<Workout, AppError> {
        let workout = self.owned_workout(user_id, workout_id).await?;
        if !workout.is_active() {
            return Err(AppError::conflict(WORKOUT_NOT_ACTIVE));
        }
        Ok(workout)
    }
}
