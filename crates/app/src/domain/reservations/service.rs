//! Reservations service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        reservations::{
            data::{NewReservation, ReservationUpdate},
            errors::ReservationsServiceError,
            records::{ReservationRecord, ReservationUuid},
            repository::PgReservationsRepository,
        },
        rooms::PgRoomsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgReservationsService {
    db: Db,
    repository: PgReservationsRepository,
    rooms: PgRoomsRepository,
}

impl PgReservationsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgReservationsRepository::new(),
            rooms: PgRoomsRepository::new(),
        }
    }
}

#[async_trait]
impl ReservationsService for PgReservationsService {
    async fn create_reservation(
        &self,
        reservation: NewReservation,
    ) -> Result<ReservationRecord, ReservationsServiceError> {
        let mut tx = self.db.begin().await?;

        // Bookings of one room type run one at a time from here until commit.
        if self
            .rooms
            .lock_room_type(&mut tx, &reservation.room_type)
            .await?
            .is_none()
        {
            debug!(room_type = %reservation.room_type, "unknown room type");

            return Err(ReservationsServiceError::Unavailable);
        }

        let room = self
            .rooms
            .available_rooms(&mut tx, reservation.stay, &reservation.room_type, None)
            .await?
            .into_iter()
            .next()
            .ok_or(ReservationsServiceError::Unavailable)?;

        let created = self
            .repository
            .create_reservation(
                &mut tx,
                reservation.uuid,
                room.number,
                reservation.stay,
                &reservation.user,
            )
            .await?;

        tx.commit().await?;

        info!(
            reservation = %created.uuid,
            room = created.room.number,
            stay = %created.stay,
            "created reservation"
        );

        Ok(created)
    }

    async fn get_reservation(
        &self,
        reservation: ReservationUuid,
    ) -> Result<ReservationRecord, ReservationsServiceError> {
        let mut tx = self.db.begin().await?;

        let reservation = self.repository.get_reservation(&mut tx, reservation).await?;

        tx.commit().await?;

        Ok(reservation)
    }

    async fn list_user_reservations(
        &self,
        user_id: String,
    ) -> Result<Vec<ReservationRecord>, ReservationsServiceError> {
        let mut tx = self.db.begin().await?;

        let reservations = self
            .repository
            .list_user_reservations(&mut tx, &user_id)
            .await?;

        tx.commit().await?;

        Ok(reservations)
    }

    async fn update_reservation(
        &self,
        reservation: ReservationUuid,
        update: ReservationUpdate,
    ) -> Result<ReservationRecord, ReservationsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_reservation(&mut tx, reservation).await?;

        self.rooms
            .lock_room_type(&mut tx, &current.room.room_type.name)
            .await?;

        let room_is_free = self
            .rooms
            .available_rooms(
                &mut tx,
                update.stay,
                &current.room.room_type.name,
                Some(reservation),
            )
            .await?
            .iter()
            .any(|room| room.number == current.room.number);

        if !room_is_free {
            debug!(
                reservation = %reservation,
                room = current.room.number,
                stay = %update.stay,
                "room is taken for the new dates"
            );

            return Err(ReservationsServiceError::Unavailable);
        }

        let updated = self
            .repository
            .update_reservation_dates(&mut tx, reservation, update.stay)
            .await?;

        tx.commit().await?;

        info!(
            reservation = %updated.uuid,
            room = updated.room.number,
            stay = %updated.stay,
            "updated reservation"
        );

        Ok(updated)
    }

    async fn delete_reservation(
        &self,
        reservation: ReservationUuid,
    ) -> Result<(), ReservationsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_reservation(&mut tx, reservation)
            .await?;

        tx.commit().await?;

        if rows_affected > 0 {
            info!(reservation = %reservation, "deleted reservation");
        }

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ReservationsService: Send + Sync {
    /// Book the lowest-numbered room of the requested type that is free for the stay.
    async fn create_reservation(
        &self,
        reservation: NewReservation,
    ) -> Result<ReservationRecord, ReservationsServiceError>;

    /// Retrieve a single reservation.
    async fn get_reservation(
        &self,
        reservation: ReservationUuid,
    ) -> Result<ReservationRecord, ReservationsServiceError>;

    /// All reservations held by a user, earliest check-in first.
    async fn list_user_reservations(
        &self,
        user_id: String,
    ) -> Result<Vec<ReservationRecord>, ReservationsServiceError>;

    /// Move a reservation to new dates, keeping its room.
    async fn update_reservation(
        &self,
        reservation: ReservationUuid,
        update: ReservationUpdate,
    ) -> Result<ReservationRecord, ReservationsServiceError>;

    /// Delete a reservation. Deleting an unknown reservation succeeds.
    async fn delete_reservation(
        &self,
        reservation: ReservationUuid,
    ) -> Result<(), ReservationsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use jiff_sqlx::Date as SqlxDate;
    use serde_json::json;
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::{
        domain::{reservations::records::Guest, stays::StayDates},
        test::{TestContext, helpers::new_reservation},
    };

    use super::*;

    fn stay(checkin: (i16, i8, i8), checkout: (i16, i8, i8)) -> StayDates {
        StayDates::new(
            date(checkin.0, checkin.1, checkin.2),
            date(checkout.0, checkout.1, checkout.2),
        )
        .expect("valid stay")
    }

    #[tokio::test]
    async fn create_reservation_books_lowest_free_room() -> TestResult {
        let ctx = TestContext::new().await;
        let dates = stay((2024, 1, 10), (2024, 1, 15));

        let first = ctx
            .reservations
            .create_reservation(new_reservation("Double", dates, "guest-1"))
            .await?;

        let second = ctx
            .reservations
            .create_reservation(new_reservation("Double", dates, "guest-2"))
            .await?;

        assert_eq!(first.room.number, 105);
        assert_eq!(first.room.room_type.name, "Double");
        assert_eq!(first.stay, dates);
        assert_eq!(first.created_at, first.updated_at);
        assert_eq!(second.room.number, 106);

        Ok(())
    }

    #[tokio::test]
    async fn get_reservation_returns_created_reservation() -> TestResult {
        let ctx = TestContext::new().await;
        let mut reservation = new_reservation("Suite", stay((2024, 2, 1), (2024, 2, 3)), "ada");

        reservation.user = Guest::from_json(json!({ "id": "ada", "name": "Ada Lovelace" }))?;

        let created = ctx
            .reservations
            .create_reservation(reservation.clone())
            .await?;

        let fetched = ctx.reservations.get_reservation(created.uuid).await?;

        assert_eq!(fetched, created);
        assert_eq!(fetched.uuid, reservation.uuid);
        assert_eq!(fetched.user, reservation.user);
        assert_eq!(fetched.room.number, 304);

        Ok(())
    }

    #[tokio::test]
    async fn get_reservation_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .reservations
            .get_reservation(ReservationUuid::new())
            .await;

        assert!(
            matches!(result, Err(ReservationsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_reservation_when_type_is_full_returns_unavailable() -> TestResult {
        let ctx = TestContext::new().await;
        let dates = stay((2024, 6, 1), (2024, 6, 5));

        for guest in ["guest-1", "guest-2"] {
            ctx.reservations
                .create_reservation(new_reservation("Family", dates, guest))
                .await?;
        }

        let result = ctx
            .reservations
            .create_reservation(new_reservation(
                "Family",
                stay((2024, 6, 4), (2024, 6, 8)),
                "guest-3",
            ))
            .await;

        assert!(
            matches!(result, Err(ReservationsServiceError::Unavailable)),
            "expected Unavailable, got {result:?}"
        );

        ctx.reservations
            .create_reservation(new_reservation(
                "Family",
                stay((2024, 6, 5), (2024, 6, 8)),
                "guest-3",
            ))
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn create_reservation_unknown_room_type_returns_unavailable() {
        let ctx = TestContext::new().await;

        let result = ctx
            .reservations
            .create_reservation(new_reservation(
                "Penthouse",
                stay((2024, 1, 10), (2024, 1, 15)),
                "guest-1",
            ))
            .await;

        assert!(
            matches!(result, Err(ReservationsServiceError::Unavailable)),
            "expected Unavailable, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_reservation_duplicate_uuid_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let reservation = new_reservation("Single", stay((2024, 1, 10), (2024, 1, 15)), "guest-1");

        ctx.reservations
            .create_reservation(reservation.clone())
            .await?;

        let result = ctx.reservations.create_reservation(reservation).await;

        assert!(
            matches!(result, Err(ReservationsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_bookings_of_last_room_admit_exactly_one() -> TestResult {
        let ctx = TestContext::new().await;
        let dates = stay((2024, 8, 1), (2024, 8, 8));

        ctx.reservations
            .create_reservation(new_reservation("Family", dates, "guest-1"))
            .await?;

        let (left, right) = tokio::join!(
            ctx.reservations
                .create_reservation(new_reservation("Family", dates, "guest-2")),
            ctx.reservations
                .create_reservation(new_reservation("Family", dates, "guest-3")),
        );

        let outcomes = [left, right];
        let booked = outcomes.iter().filter(|result| result.is_ok()).count();
        let refused = outcomes
            .iter()
            .filter(|result| matches!(result, Err(ReservationsServiceError::Unavailable)))
            .count();

        assert_eq!((booked, refused), (1, 1), "got {outcomes:?}");

        Ok(())
    }

    #[tokio::test]
    async fn list_user_reservations_orders_by_checkin() -> TestResult {
        let ctx = TestContext::new().await;

        let later = ctx
            .reservations
            .create_reservation(new_reservation(
                "Single",
                stay((2024, 5, 1), (2024, 5, 3)),
                "ada",
            ))
            .await?;

        let earlier = ctx
            .reservations
            .create_reservation(new_reservation(
                "Double",
                stay((2024, 4, 1), (2024, 4, 3)),
                "ada",
            ))
            .await?;

        ctx.reservations
            .create_reservation(new_reservation(
                "Single",
                stay((2024, 4, 1), (2024, 4, 3)),
                "grace",
            ))
            .await?;

        let listed = ctx
            .reservations
            .list_user_reservations("ada".to_string())
            .await?;

        let uuids: Vec<ReservationUuid> = listed.iter().map(|r| r.uuid).collect();

        assert_eq!(uuids, vec![earlier.uuid, later.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn list_user_reservations_unknown_user_is_empty() -> TestResult {
        let ctx = TestContext::new().await;

        let listed = ctx
            .reservations
            .list_user_reservations("nobody".to_string())
            .await?;

        assert!(listed.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn update_reservation_can_extend_over_its_own_dates() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .reservations
            .create_reservation(new_reservation(
                "Suite",
                stay((2024, 1, 10), (2024, 1, 15)),
                "guest-1",
            ))
            .await?;

        let extended = stay((2024, 1, 9), (2024, 1, 17));

        let updated = ctx
            .reservations
            .update_reservation(created.uuid, ReservationUpdate { stay: extended })
            .await?;

        assert_eq!(updated.uuid, created.uuid);
        assert_eq!(updated.stay, extended);
        assert_eq!(updated.room, created.room);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn update_reservation_into_taken_dates_returns_unavailable() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx
            .reservations
            .create_reservation(new_reservation(
                "Single",
                stay((2024, 1, 10), (2024, 1, 15)),
                "guest-1",
            ))
            .await?;

        // Fill every other Single for the later week so 101 cannot be swapped out.
        let blocked = stay((2024, 1, 15), (2024, 1, 20));

        for _ in 0..10 {
            ctx.reservations
                .create_reservation(new_reservation("Single", blocked, "guest-2"))
                .await?;
        }

        let result = ctx
            .reservations
            .update_reservation(
                first.uuid,
                ReservationUpdate {
                    stay: stay((2024, 1, 12), (2024, 1, 17)),
                },
            )
            .await;

        assert!(
            matches!(result, Err(ReservationsServiceError::Unavailable)),
            "expected Unavailable, got {result:?}"
        );

        let unchanged = ctx.reservations.get_reservation(first.uuid).await?;

        assert_eq!(unchanged, first);

        Ok(())
    }

    #[tokio::test]
    async fn update_reservation_keeps_room_even_when_another_is_free() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx
            .reservations
            .create_reservation(new_reservation(
                "Double",
                stay((2024, 1, 10), (2024, 1, 15)),
                "guest-1",
            ))
            .await?;

        ctx.reservations
            .create_reservation(new_reservation(
                "Double",
                stay((2024, 1, 15), (2024, 1, 20)),
                "guest-2",
            ))
            .await?;

        let result = ctx
            .reservations
            .update_reservation(
                first.uuid,
                ReservationUpdate {
                    stay: stay((2024, 1, 10), (2024, 1, 18)),
                },
            )
            .await;

        assert!(
            matches!(result, Err(ReservationsServiceError::Unavailable)),
            "expected Unavailable, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_reservation_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .reservations
            .update_reservation(
                ReservationUuid::new(),
                ReservationUpdate {
                    stay: stay((2024, 1, 10), (2024, 1, 15)),
                },
            )
            .await;

        assert!(
            matches!(result, Err(ReservationsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_reservation_frees_the_room() -> TestResult {
        let ctx = TestContext::new().await;
        let dates = stay((2024, 1, 10), (2024, 1, 15));

        let created = ctx
            .reservations
            .create_reservation(new_reservation("Single", dates, "guest-1"))
            .await?;

        ctx.reservations.delete_reservation(created.uuid).await?;

        let result = ctx.reservations.get_reservation(created.uuid).await;

        assert!(
            matches!(result, Err(ReservationsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        let rebooked = ctx
            .reservations
            .create_reservation(new_reservation("Single", dates, "guest-2"))
            .await?;

        assert_eq!(rebooked.room.number, created.room.number);

        Ok(())
    }

    #[tokio::test]
    async fn delete_reservation_unknown_uuid_succeeds() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ReservationUuid::new();

        ctx.reservations.delete_reservation(uuid).await?;
        ctx.reservations.delete_reservation(uuid).await?;

        Ok(())
    }

    #[tokio::test]
    async fn deleting_twice_removes_only_the_target() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx
            .reservations
            .create_reservation(new_reservation(
                "Double",
                stay((2024, 4, 1), (2024, 4, 4)),
                "guest-1",
            ))
            .await?;

        let second = ctx
            .reservations
            .create_reservation(new_reservation(
                "Double",
                stay((2024, 4, 2), (2024, 4, 6)),
                "guest-2",
            ))
            .await?;

        ctx.reservations.delete_reservation(first.uuid).await?;
        ctx.reservations.delete_reservation(first.uuid).await?;

        let deleted = ctx.reservations.get_reservation(first.uuid).await;

        assert!(
            matches!(deleted, Err(ReservationsServiceError::NotFound)),
            "expected NotFound after delete, got {deleted:?}"
        );
        assert_eq!(ctx.reservations.get_reservation(second.uuid).await?, second);
        assert!(
            ctx.reservations
                .list_user_reservations("guest-1".to_string())
                .await?
                .is_empty(),
            "deleted reservation should not be listed"
        );

        Ok(())
    }

    #[tokio::test]
    async fn overlapping_insert_is_rejected_by_the_database() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .reservations
            .create_reservation(new_reservation(
                "Suite",
                stay((2024, 1, 10), (2024, 1, 15)),
                "guest-1",
            ))
            .await?;

        let result = sqlx::query(
            "INSERT INTO reservation (id, room, checkin_date, checkout_date, \"user\") \
             VALUES ($1, $2, $3, $4, 'guest-2')",
        )
        .bind(Uuid::now_v7())
        .bind(created.room.number)
        .bind(SqlxDate::from(date(2024, 1, 14)))
        .bind(SqlxDate::from(date(2024, 1, 20)))
        .execute(ctx.db.pool())
        .await;

        let error = ReservationsServiceError::from(
            result.expect_err("overlapping stays in one room should be rejected"),
        );

        assert!(
            matches!(error, ReservationsServiceError::Unavailable),
            "expected Unavailable, got {error:?}"
        );

        Ok(())
    }
}
