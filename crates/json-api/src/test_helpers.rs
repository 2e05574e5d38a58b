//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use hotel_app::{
    context::AppContext,
    domain::{reservations::MockReservationsService, rooms::MockRoomsService},
};

use crate::state::State;

fn strict_rooms_mock() -> MockRoomsService {
    let mut rooms = MockRoomsService::new();

    rooms.expect_list_rooms().never();
    rooms.expect_list_room_types().never();
    rooms.expect_available_room_types().never();
    rooms.expect_available_rooms().never();

    rooms
}

fn strict_reservations_mock() -> MockReservationsService {
    let mut reservations = MockReservationsService::new();

    reservations.expect_create_reservation().never();
    reservations.expect_get_reservation().never();
    reservations.expect_list_user_reservations().never();
    reservations.expect_update_reservation().never();
    reservations.expect_delete_reservation().never();

    reservations
}

fn make_state(rooms: MockRoomsService, reservations: MockReservationsService) -> Arc<State> {
    State::from_app_context(AppContext {
        rooms: Arc::new(rooms),
        reservations: Arc::new(reservations),
    })
}

/// Serve `route` with the given rooms mock; any reservations call fails the test.
pub(crate) fn rooms_service(rooms: MockRoomsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(make_state(rooms, strict_reservations_mock())))
            .push(route),
    )
}

/// Serve `route` with the given reservations mock; any rooms call fails the test.
pub(crate) fn reservations_service(
    reservations: MockReservationsService,
    route: Router,
) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(make_state(strict_rooms_mock(), reservations)))
            .push(route),
    )
}
