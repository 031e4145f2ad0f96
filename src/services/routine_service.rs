use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{DeleteResponse, Routine, RoutineRequest, RoutineResponse};
use crate::store::WorkoutStore;

#[derive(Clone)]
pub struct RoutineService {
    store: Arc<dyn WorkoutStore>,
}

impl RoutineService {
    pub fn new(store: Arc<dyn WorkoutStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<RoutineResponse>, AppError> {
        let routines = self.store.list_routines(user_id).await?;
        Ok(routines.into_iter().map(RoutineResponse::from).collect())
    }

    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        user_id: Uuid,
        request: RoutineRequest,
    ) -> Result<RoutineResponse, AppError> {
        let routine = self
            .store
            .insert_routine(&Routine {
                id: Uuid::new_v4(),
                user_id,
                name: request.name,
                schedule_day_index: request.schedule_day_index,
            })
            .await?;

        self.store
            .insert_routine_exercises(routine.id, &request.exercises)
            .await?;

        info!(routine_id = %routine.id, exercises = request.exercises.len(), "Routine created");
        Ok(RoutineResponse::without_exercises(routine))
    }

    /// Overwrite name and day, then replace the exercise list wholesale.
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        user_id: Uuid,
        routine_id: Uuid,
        request: RoutineRequest,
    ) -> Result<RoutineResponse, AppError> {
        let mut routine = self.owned_routine(user_id, routine_id).await?;
        routine.name = request.name;
        routine.schedule_day_index = request.schedule_day_index;

        self.store.update_routine(&routine).await?;
        self.store.delete_routine_exercises(routine_id).await?;
        self.store
            .insert_routine_exercises(routine_id, &request.exercises)
            .await?;

        info!(%routine_id, exercises = request.exercises.len(), "Routine updated");
        Ok(RoutineResponse::without_exercises(routine))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: Uuid, routine_id: Uuid) -> Result<DeleteResponse, AppError> {
        self.owned_routine(user_id, routine_id).await?;

        self.store.delete_routine_exercises(routine_id).await?;
        self.store.delete_routine(routine_id).await?;

        info!(%routine_id, "Routine deleted");
        Ok(DeleteResponse::deleted())
    }

    /// Someone else's routine is reported exactly like a missing one.
    async fn owned_routine(&self, user_id: Uuid, routine_id: Uuid) -> Result<Routine, AppError> {
        match self.store.find_routine(routine_id, user_id).await? {
            Some(routine) => Ok(routine),
            None => {
                warn!(%routine_id, "Routine not found for caller");
                Err(AppError::not_found("Routine not found"))
            }
        }
    }
}
