use std::sync::Arc;

use tracing::instrument;

use crate::error::AppError;
use crate::models::Exercise;
use crate::store::WorkoutStore;

pub const EXERCISE_LIST_LIMIT: i64 = 50;
pub const EXERCISE_SEARCH_LIMIT: i64 = 20;

/// Read-only access to the global exercise catalogue.
#[derive(Clone)]
pub struct ExerciseService {
    store: Arc<dyn WorkoutStore>,
}

impl ExerciseService {
    pub fn new(store: Arc<dyn WorkoutStore>) -> Self {
        Self { store }
    }

    /// Up to 50 exercises, filtered by name when a non-empty search is given.
    #[instrument(skip(self))]
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Exercise>, AppError> {
        let search = search.filter(|term| !term.is_empty());
        Ok(self.store.search_exercises(search, EXERCISE_LIST_LIMIT).await?)
    }

    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<Exercise>, AppError> {
        Ok(self
            .store
            .search_exercises(Some(query), EXERCISE_SEARCH_LIMIT)
            .await?)
    }
}
