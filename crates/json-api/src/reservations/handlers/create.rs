//! Create Reservation Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use hotel_app::domain::reservations::{
    ReservationsServiceError,
    data::NewReservation,
    records::{Guest, ReservationUuid},
};

use crate::{
    extensions::*,
    observability::{ReservationOperation, ReservationOutcome, record_reservation},
    reservations::{into_status_error, params, responses::ReservationResponse},
    state::State,
};

/// Create Reservation Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateReservationRequest {
    /// First night of the stay (YYYY-MM-DD)
    pub checkin_date: String,

    /// Departure day (YYYY-MM-DD), after `checkinDate`
    pub checkout_date: String,

    /// Name of the room type to book, e.g. "Double"
    pub room_type: String,

    /// The guest; must carry a string `id`, other fields are stored as given
    #[salvo(schema(value_type = Object))]
    pub user: Value,
}

impl CreateReservationRequest {
    fn into_new_reservation(self) -> Result<NewReservation, StatusError> {
        let stay = params::stay(&self.checkin_date, &self.checkout_date)?;
        let user = Guest::from_json(self.user).or_400("user must be an object with a string id")?;
        let room_type = self.room_type.trim();

        if room_type.is_empty() {
            return Err(StatusError::bad_request().brief("missing roomType parameter"));
        }

        Ok(NewReservation {
            uuid: ReservationUuid::new(),
            room_type: room_type.to_string(),
            stay,
            user,
        })
    }
}

/// Create Reservation Handler
///
/// Books the lowest-numbered room of the requested type that is free for the
/// whole stay.
#[endpoint(
    tags("reservations"),
    summary = "Create Reservation",
    responses(
        (status_code = StatusCode::OK, description = "Reservation created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::CONFLICT, description = "No room of the type is available"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateReservationRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReservationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let reservation = json.into_inner().into_new_reservation()?;
    let room_type = reservation.room_type.clone();
    let stay = reservation.stay;

    let created = state
        .app
        .reservations
        .create_reservation(reservation)
        .await
        .map_err(|error| match error {
            ReservationsServiceError::Unavailable => {
                record_reservation(ReservationOperation::Create, ReservationOutcome::Unavailable);

                StatusError::conflict().brief(format!(
                    "No {room_type} rooms are available from {} to {}",
                    stay.checkin(),
                    stay.checkout()
                ))
            }
            ReservationsServiceError::AlreadyExists => {
                record_reservation(ReservationOperation::Create, ReservationOutcome::AlreadyExists);

                into_status_error(ReservationsServiceError::AlreadyExists)
            }
            other => into_status_error(other),
        })?;

    record_reservation(ReservationOperation::Create, ReservationOutcome::Booked);

    res.add_header(LOCATION, format!("/reservations/{}", created.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::OK);

    info!(
        reservation = %created.uuid,
        room = created.room.number,
        user = %created.user.id,
        "booked room"
    );

    Ok(Json(created.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use hotel_app::domain::reservations::MockReservationsService;

    use crate::{observability::reservations_count, test_helpers::reservations_service};

    use super::{super::tests::*, *};

    fn make_service(reservations: MockReservationsService) -> Service {
        reservations_service(reservations, Router::with_path("reservations").post(handler))
    }

    fn body() -> Value {
        json!({
            "checkinDate": "2024-01-10",
            "checkoutDate": "2024-01-15",
            "roomType": "Single",
            "user": { "id": "ada", "name": "Ada Lovelace" },
        })
    }

    #[tokio::test]
    async fn test_create_reservation_success() -> TestResult {
        let uuid = ReservationUuid::new();
        let mut created = make_reservation(uuid, "ada");

        created
            .user
            .profile
            .insert("name".to_string(), json!("Ada Lovelace"));

        let mut reservations = MockReservationsService::new();

        reservations
            .expect_create_reservation()
            .once()
            .withf(|new| {
                new.room_type == "Single"
                    && new.stay == make_stay((2024, 1, 10), (2024, 1, 15))
                    && new.user.id == "ada"
                    && new.user.profile.get("name") == Some(&json!("Ada Lovelace"))
            })
            .return_once(move |_| Ok(created));

        let mut res = TestClient::post("http://example.com/reservations")
            .json(&body())
            .send(&make_service(reservations))
            .await;

        let body: ReservationResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(location, Some(format!("/reservations/{uuid}").as_str()));
        assert_eq!(body.id, uuid.into_uuid());
        assert_eq!(body.room.number, 101);
        assert_eq!(body.room.room_type.name, "Single");
        assert_eq!(body.checkin_date, "2024-01-10");
        assert_eq!(body.checkout_date, "2024-01-15");
        assert_eq!(body.user, json!({ "id": "ada", "name": "Ada Lovelace" }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_reservation_unavailable_returns_409() -> TestResult {
        let mut reservations = MockReservationsService::new();

        reservations
            .expect_create_reservation()
            .once()
            .return_once(|_| Err(ReservationsServiceError::Unavailable));

        let before =
            reservations_count(ReservationOperation::Create, ReservationOutcome::Unavailable);

        let mut res = TestClient::post("http://example.com/reservations")
            .json(&body())
            .send(&make_service(reservations))
            .await;

        let text = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
        assert!(
            text.contains("No Single rooms are available"),
            "expected descriptive conflict, got {text}"
        );
        assert!(
            reservations_count(ReservationOperation::Create, ReservationOutcome::Unavailable)
                > before,
            "expected the unavailable booking to be counted"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_create_reservation_inverted_dates_returns_400() -> TestResult {
        let mut reservations = MockReservationsService::new();

        reservations.expect_create_reservation().never();

        let res = TestClient::post("http://example.com/reservations")
            .json(&json!({
                "checkinDate": "2024-01-15",
                "checkoutDate": "2024-01-10",
                "roomType": "Single",
                "user": { "id": "ada" },
            }))
            .send(&make_service(reservations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_reservation_user_without_id_returns_400() -> TestResult {
        let mut reservations = MockReservationsService::new();

        reservations.expect_create_reservation().never();

        let res = TestClient::post("http://example.com/reservations")
            .json(&json!({
                "checkinDate": "2024-01-10",
                "checkoutDate": "2024-01-15",
                "roomType": "Single",
                "user": { "name": "Ada" },
            }))
            .send(&make_service(reservations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_reservation_missing_field_returns_400() -> TestResult {
        let mut reservations = MockReservationsService::new();

        reservations.expect_create_reservation().never();

        let res = TestClient::post("http://example.com/reservations")
            .json(&json!({ "checkinDate": "2024-01-10", "roomType": "Single" }))
            .send(&make_service(reservations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
