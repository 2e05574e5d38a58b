//! Get Reservation Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    reservations::{into_status_error, responses::ReservationResponse},
    state::State,
};

/// Get Reservation Handler
#[endpoint(
    tags("reservations"),
    summary = "Get Reservation",
    responses(
        (status_code = StatusCode::OK, description = "Reservation found"),
        (status_code = StatusCode::NOT_FOUND, description = "Reservation not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    reservation: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ReservationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let reservation = state
        .app
        .reservations
        .get_reservation(reservation.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(reservation.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use hotel_app::domain::reservations::{
        MockReservationsService, ReservationsServiceError, records::ReservationUuid,
    };

    use crate::test_helpers::reservations_service;

    use super::{super::tests::*, *};

    fn make_service(reservations: MockReservationsService) -> Service {
        reservations_service(
            reservations,
            Router::with_path("reservations/{reservation}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_reservation_success() -> TestResult {
        let uuid = ReservationUuid::new();
        let reservation = make_reservation(uuid, "ada");

        let mut reservations = MockReservationsService::new();

        reservations
            .expect_get_reservation()
            .once()
            .withf(move |requested| *requested == uuid)
            .return_once(move |_| Ok(reservation));

        let mut res = TestClient::get(format!("http://example.com/reservations/{uuid}"))
            .send(&make_service(reservations))
            .await;

        let body: ReservationResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.id, uuid.into_uuid());
        assert_eq!(body.created_at, "1970-01-01T00:00:00Z");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_reservation_not_found_returns_404() -> TestResult {
        let mut reservations = MockReservationsService::new();

        reservations
            .expect_get_reservation()
            .once()
            .return_once(|_| Err(ReservationsServiceError::NotFound));

        let res = TestClient::get(format!(
            "http://example.com/reservations/{}",
            ReservationUuid::new()
        ))
        .send(&make_service(reservations))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_reservation_invalid_uuid_returns_400() -> TestResult {
        let mut reservations = MockReservationsService::new();

        reservations.expect_get_reservation().never();

        let res = TestClient::get("http://example.com/reservations/not-a-uuid")
            .send(&make_service(reservations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
