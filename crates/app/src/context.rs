//! App Context

use std::sync::Arc;

use sqlx::migrate::MigrateError;
use thiserror::Error;
use tracing::info;

use crate::{
    database::{self, DatabaseConfig, Db},
    domain::{
        reservations::{PgReservationsService, ReservationsService},
        rooms::{PgRoomsService, RoomsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub rooms: Arc<dyn RoomsService>,
    pub reservations: Arc<dyn ReservationsService>,
}

impl AppContext {
    /// Build application context from database settings, applying any pending
    /// migrations first.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, AppInitError> {
        let pool = database::connect(config)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        info!("database migrations are up to date");

        Ok(Self::from_db(Db::new(pool)))
    }

    #[must_use]
    pub fn from_db(db: Db) -> Self {
        Self {
            rooms: Arc::new(PgRoomsService::new(db.clone())),
            reservations: Arc::new(PgReservationsService::new(db)),
        }
    }
}
