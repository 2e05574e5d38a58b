//! Available Room Types Handler

use std::sync::Arc;

use salvo::prelude::*;

use hotel_app::domain::rooms::data::RoomTypeAvailability;

use crate::{
    extensions::*,
    reservations::params::AvailabilityQuery,
    rooms::{into_status_error, responses::RoomTypeResponse},
    state::State,
};

/// Available Room Types Handler
///
/// Query parameters: `checkinDate`, `checkoutDate` (YYYY-MM-DD) and
/// `guestCapacity`. Returns the room types that fit the party and still have a
/// room free for every night of the stay.
#[endpoint(
    tags("reservations"),
    summary = "Available Room Types",
    responses(
        (status_code = StatusCode::OK, description = "Room types with a free room"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Vec<RoomTypeResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let query = req
        .parse_queries::<AvailabilityQuery>()
        .or_400("could not parse query string")?;

    let room_types = state
        .app
        .rooms
        .available_room_types(RoomTypeAvailability {
            stay: query.stay()?,
            min_guest_capacity: query.guest_capacity()?,
        })
        .await
        .map_err(into_status_error)?;

    Ok(Json(room_types.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use hotel_app::domain::rooms::MockRoomsService;

    use crate::{rooms::responses::tests::make_room_type, test_helpers::rooms_service};

    use super::{super::tests::*, *};

    fn make_service(rooms: MockRoomsService) -> Service {
        rooms_service(rooms, Router::with_path("reservations/roomTypes").get(handler))
    }

    #[tokio::test]
    async fn test_available_room_types_success() -> TestResult {
        let mut rooms = MockRoomsService::new();

        rooms
            .expect_available_room_types()
            .once()
            .withf(|query| {
                *query
                    == RoomTypeAvailability {
                        stay: make_stay((2024, 1, 10), (2024, 1, 15)),
                        min_guest_capacity: 3,
                    }
            })
            .return_once(|_| {
                Ok(vec![
                    make_room_type(2, "Family", 4, 200),
                    make_room_type(3, "Suite", 4, 300),
                ])
            });

        let mut res = TestClient::get(
            "http://example.com/reservations/roomTypes\
             ?checkinDate=2024-01-10&checkoutDate=2024-01-15&guestCapacity=3",
        )
        .send(&make_service(rooms))
        .await;

        let body: Vec<RoomTypeResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            body.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
            vec!["Family", "Suite"]
        );
        assert_eq!(body.last().map(|t| t.price.as_str()), Some("300.00"));

        Ok(())
    }

    #[tokio::test]
    async fn test_available_room_types_missing_capacity_returns_400() -> TestResult {
        let mut rooms = MockRoomsService::new();

        rooms.expect_available_room_types().never();

        let res = TestClient::get(
            "http://example.com/reservations/roomTypes\
             ?checkinDate=2024-01-10&checkoutDate=2024-01-15",
        )
        .send(&make_service(rooms))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_available_room_types_inverted_dates_returns_400() -> TestResult {
        let mut rooms = MockRoomsService::new();

        rooms.expect_available_room_types().never();

        let res = TestClient::get(
            "http://example.com/reservations/roomTypes\
             ?checkinDate=2024-01-15&checkoutDate=2024-01-10&guestCapacity=1",
        )
        .send(&make_service(rooms))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
