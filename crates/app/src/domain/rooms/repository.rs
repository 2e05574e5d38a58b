//! Rooms Repository

use jiff_sqlx::Date as SqlxDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    reservations::records::ReservationUuid,
    rooms::{
        data::{NewRoom, NewRoomType},
        records::{RoomRecord, RoomTypeRecord},
    },
    stays::StayDates,
};

const LIST_ROOMS_SQL: &str = include_str!("sql/list_rooms.sql");
const LIST_ROOM_TYPES_SQL: &str = include_str!("sql/list_room_types.sql");
const AVAILABLE_ROOM_TYPES_SQL: &str = include_str!("sql/available_room_types.sql");
const AVAILABLE_ROOMS_SQL: &str = include_str!("sql/available_rooms.sql");
const LOCK_ROOM_TYPE_SQL: &str = include_str!("sql/lock_room_type.sql");
const CREATE_ROOM_TYPE_SQL: &str = include_str!("sql/create_room_type.sql");
const CREATE_ROOM_SQL: &str = include_str!("sql/create_room.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgRoomsRepository;

impl PgRoomsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_rooms(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<RoomRecord>, sqlx::Error> {
        query_as::<Postgres, RoomRecord>(LIST_ROOMS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_room_types(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<RoomTypeRecord>, sqlx::Error> {
        query_as::<Postgres, RoomTypeRecord>(LIST_ROOM_TYPES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    /// Room types with at least `min_guest_capacity` places and one room free for `stay`.
    pub(crate) async fn available_room_types(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        stay: StayDates,
        min_guest_capacity: u32,
    ) -> Result<Vec<RoomTypeRecord>, sqlx::Error> {
        query_as::<Postgres, RoomTypeRecord>(AVAILABLE_ROOM_TYPES_SQL)
            .bind(i64::from(min_guest_capacity))
            .bind(SqlxDate::from(stay.checkin()))
            .bind(SqlxDate::from(stay.checkout()))
            .fetch_all(&mut **tx)
            .await
    }

    /// Rooms of the named type free for `stay`, lowest room number first.
    ///
    /// Nights held by `ignore` count as free, so a reservation can be checked
    /// against its own new dates.
    pub(crate) async fn available_rooms(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        stay: StayDates,
        room_type: &str,
        ignore: Option<ReservationUuid>,
    ) -> Result<Vec<RoomRecord>, sqlx::Error> {
        query_as::<Postgres, RoomRecord>(AVAILABLE_ROOMS_SQL)
            .bind(room_type)
            .bind(SqlxDate::from(stay.checkin()))
            .bind(SqlxDate::from(stay.checkout()))
            .bind(ignore.map(ReservationUuid::into_uuid))
            .fetch_all(&mut **tx)
            .await
    }

    /// Take a row lock on the named room type until `tx` ends.
    ///
    /// Serializes bookings of the same type. Returns `None` for unknown types.
    pub(crate) async fn lock_room_type(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room_type: &str,
    ) -> Result<Option<i32>, sqlx::Error> {
        query_scalar::<Postgres, i32>(LOCK_ROOM_TYPE_SQL)
            .bind(room_type)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_room_type(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room_type: &NewRoomType,
    ) -> Result<u64, sqlx::Error> {
        let guest_capacity = i32::try_from(room_type.guest_capacity)
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        let rows_affected = query(CREATE_ROOM_TYPE_SQL)
            .bind(room_type.id)
            .bind(&room_type.name)
            .bind(guest_capacity)
            .bind(room_type.price)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn create_room(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: &NewRoom,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CREATE_ROOM_SQL)
            .bind(room.number)
            .bind(room.room_type_id)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for RoomTypeRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            guest_capacity: try_get_capacity(row, "guest_capacity")?,
            price: row.try_get::<Decimal, _>("price")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for RoomRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            number: row.try_get("number")?,
            room_type: try_get_room_type(row)?,
        })
    }
}

/// Decode a room type embedded under `type_*` columns.
pub(crate) fn try_get_room_type(row: &PgRow) -> sqlx::Result<RoomTypeRecord> {
    Ok(RoomTypeRecord {
        id: row.try_get("type_id")?,
        name: row.try_get("type_name")?,
        guest_capacity: try_get_capacity(row, "type_guest_capacity")?,
        price: row.try_get::<Decimal, _>("type_price")?,
    })
}

fn try_get_capacity(row: &PgRow, col: &str) -> sqlx::Result<u32> {
    let capacity: i32 = row.try_get(col)?;

    u32::try_from(capacity).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
