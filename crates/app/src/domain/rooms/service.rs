//! Rooms service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::rooms::{
        catalog::Catalog,
        data::{RoomAvailability, RoomTypeAvailability},
        errors::RoomsServiceError,
        records::{RoomRecord, RoomTypeRecord},
        repository::PgRoomsRepository,
    },
};

/// Rows inserted by a catalog install.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogSummary {
    pub room_types: u64,
    pub rooms: u64,
}

#[derive(Debug, Clone)]
pub struct PgRoomsService {
    db: Db,
    repository: PgRoomsRepository,
}

impl PgRoomsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgRoomsRepository::new(),
        }
    }

    /// Install a catalog, skipping room types and rooms that already exist.
    ///
    /// # Errors
    ///
    /// Returns an error when a room references a missing room type or the
    /// database rejects the data.
    pub async fn install_catalog(
        &self,
        catalog: &Catalog,
    ) -> Result<CatalogSummary, RoomsServiceError> {
        let mut tx = self.db.begin().await?;
        let mut summary = CatalogSummary::default();

        for room_type in &catalog.room_types {
            summary.room_types += self.repository.create_room_type(&mut tx, room_type).await?;
        }

        for room in &catalog.rooms {
            summary.rooms += self.repository.create_room(&mut tx, room).await?;
        }

        tx.commit().await?;

        info!(
            room_types = summary.room_types,
            rooms = summary.rooms,
            "installed room catalog"
        );

        Ok(summary)
    }
}

#[async_trait]
impl RoomsService for PgRoomsService {
    async fn list_rooms(&self) -> Result<Vec<RoomRecord>, RoomsServiceError> {
        let mut tx = self.db.begin().await?;

        let rooms = self.repository.list_rooms(&mut tx).await?;

        tx.commit().await?;

        Ok(rooms)
    }

    async fn list_room_types(&self) -> Result<Vec<RoomTypeRecord>, RoomsServiceError> {
        let mut tx = self.db.begin().await?;

        let room_types = self.repository.list_room_types(&mut tx).await?;

        tx.commit().await?;

        Ok(room_types)
    }

    async fn available_room_types(
        &self,
        query: RoomTypeAvailability,
    ) -> Result<Vec<RoomTypeRecord>, RoomsServiceError> {
        let mut tx = self.db.begin().await?;

        let room_types = self
            .repository
            .available_room_types(&mut tx, query.stay, query.min_guest_capacity)
            .await?;

        tx.commit().await?;

        Ok(room_types)
    }

    async fn available_rooms(
        &self,
        query: RoomAvailability,
    ) -> Result<Vec<RoomRecord>, RoomsServiceError> {
        let mut tx = self.db.begin().await?;

        let rooms = self
            .repository
            .available_rooms(&mut tx, query.stay, &query.room_type, None)
            .await?;

        tx.commit().await?;

        Ok(rooms)
    }
}

#[automock]
#[async_trait]
pub trait RoomsService: Send + Sync {
    /// Every room with its room type, ordered by room number.
    async fn list_rooms(&self) -> Result<Vec<RoomRecord>, RoomsServiceError>;

    /// Every room type, ordered by id.
    async fn list_room_types(&self) -> Result<Vec<RoomTypeRecord>, RoomsServiceError>;

    /// Room types that fit the guest count and have a room free for the stay.
    async fn available_room_types(
        &self,
        query: RoomTypeAvailability,
    ) -> Result<Vec<RoomTypeRecord>, RoomsServiceError>;

    /// Rooms of the given type free for the stay, ordered by room number.
    async fn available_rooms(
        &self,
        query: RoomAvailability,
    ) -> Result<Vec<RoomRecord>, RoomsServiceError>;
}
