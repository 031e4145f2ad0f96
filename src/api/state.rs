use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::auth::TokenVerifier;
use crate::config::{run_migrations, AppConfig};
use crate::error::AppError;
use crate::store::{PgWorkoutStore, WorkoutStore};

/// Collaborators shared by every handler. Either one may be absent when its
/// configuration is missing; requests that need it then fail with a 500.
#[derive(Clone)]
pub struct AppState {
    store: Option<Arc<dyn WorkoutStore>>,
    token_verifier: Option<TokenVerifier>,
}

impl AppState {
    pub fn new(store: Option<Arc<dyn WorkoutStore>>, token_verifier: Option<TokenVerifier>) -> Self {
        Self {
            store,
            token_verifier,
        }
    }

    /// Build the production state: a lazily connected Postgres store and the
    /// token verifier, running migrations first when asked to.
    pub async fn connect(config: &AppConfig) -> Result<Self> {
        let store: Option<Arc<dyn WorkoutStore>> = match &config.database {
            Some(database) => {
                let pool = database.create_pool()?;
                if config.run_migrations {
                    run_migrations(&pool).await?;
                    info!("Database migrations applied");
                }
                Some(Arc::new(PgWorkoutStore::new(pool)))
            }
            None => {
                warn!("DATABASE_URL or DATABASE_SERVICE_KEY not set; data routes will answer 500");
                None
            }
        };

        let token_verifier = config.token_verifier();
        if token_verifier.is_none() {
            warn!("JWT_SECRET not set; authenticated routes will answer 500");
        }

        Ok(Self::new(store, token_verifier))
    }

    pub fn store(&self) -> Result<Arc<dyn WorkoutStore>, AppError> {
        self.store
            .clone()
            .ok_or_else(|| AppError::Config("Database not configured".to_string()))
    }

    pub fn token_verifier(&self) -> Result<&TokenVerifier, AppError> {
        self.token_verifier
            .as_ref()
            .ok_or_else(|| AppError::Config("Authentication not configured".to_string()))
    }
}
