//! Reservations Repository

use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use serde_json::{Map, Value};
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json,
};

use crate::domain::{
    reservations::records::{Guest, ReservationRecord, ReservationUuid},
    rooms::{records::RoomRecord, try_get_room_type},
    stays::StayDates,
};

const CREATE_RESERVATION_SQL: &str = include_str!("sql/create_reservation.sql");
const GET_RESERVATION_SQL: &str = include_str!("sql/get_reservation.sql");
const LOCK_RESERVATION_SQL: &str = include_str!("sql/lock_reservation.sql");
const LIST_USER_RESERVATIONS_SQL: &str = include_str!("sql/list_user_reservations.sql");
const UPDATE_RESERVATION_DATES_SQL: &str = include_str!("sql/update_reservation_dates.sql");
const DELETE_RESERVATION_SQL: &str = include_str!("sql/delete_reservation.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReservationsRepository;

impl PgReservationsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_reservation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        reservation: ReservationUuid,
        room: i32,
        stay: StayDates,
        user: &Guest,
    ) -> Result<ReservationRecord, sqlx::Error> {
        query_as::<Postgres, ReservationRecord>(CREATE_RESERVATION_SQL)
            .bind(reservation.into_uuid())
            .bind(room)
            .bind(SqlxDate::from(stay.checkin()))
            .bind(SqlxDate::from(stay.checkout()))
            .bind(&user.id)
            .bind(Json(&user.profile))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_reservation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        reservation: ReservationUuid,
    ) -> Result<ReservationRecord, sqlx::Error> {
        query_as::<Postgres, ReservationRecord>(GET_RESERVATION_SQL)
            .bind(reservation.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch a reservation and hold its row lock until `tx` ends.
    pub(crate) async fn lock_reservation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        reservation: ReservationUuid,
    ) -> Result<ReservationRecord, sqlx::Error> {
        query_as::<Postgres, ReservationRecord>(LOCK_RESERVATION_SQL)
            .bind(reservation.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_user_reservations(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: &str,
    ) -> Result<Vec<ReservationRecord>, sqlx::Error> {
        query_as::<Postgres, ReservationRecord>(LIST_USER_RESERVATIONS_SQL)
            .bind(user_id)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_reservation_dates(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        reservation: ReservationUuid,
        stay: StayDates,
    ) -> Result<ReservationRecord, sqlx::Error> {
        query_as::<Postgres, ReservationRecord>(UPDATE_RESERVATION_DATES_SQL)
            .bind(reservation.into_uuid())
            .bind(SqlxDate::from(stay.checkin()))
            .bind(SqlxDate::from(stay.checkout()))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_reservation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        reservation: ReservationUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_RESERVATION_SQL)
            .bind(reservation.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ReservationRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let checkin = row.try_get::<SqlxDate, _>("checkin_date")?.to_jiff();
        let checkout = row.try_get::<SqlxDate, _>("checkout_date")?.to_jiff();

        let stay = StayDates::new(checkin, checkout).map_err(|e| sqlx::Error::ColumnDecode {
            index: "checkout_date".to_string(),
            source: Box::new(e),
        })?;

        let Json(mut profile) = row.try_get::<Json<Map<String, Value>>, _>("user_info")?;

        profile.remove("id");

        Ok(Self {
            uuid: ReservationUuid::from_uuid(row.try_get("id")?),
            room: RoomRecord {
                number: row.try_get("room_number")?,
                room_type: try_get_room_type(row)?,
            },
            stay,
            user: Guest {
                id: row.try_get("user_id")?,
                profile,
            },
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
