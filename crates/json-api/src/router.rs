//! App Router

use salvo::Router;

use crate::{healthcheck, observability, reservations, rooms};

/// Every application route. Static reservation paths are pushed before the
/// `{reservation}` capture so they are never parsed as ids.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(Router::with_path("rooms").get(rooms::index::handler))
        .push(
            Router::with_path("reservations")
                .post(reservations::create::handler)
                .push(Router::with_path("roomTypes").get(reservations::room_types::handler))
                .push(Router::with_path("rooms").get(reservations::rooms::handler))
                .push(Router::with_path("users/{user_id}").get(reservations::user_index::handler))
                .push(
                    Router::with_path("{reservation}")
                        .get(reservations::get::handler)
                        .put(reservations::update::handler)
                        .delete(reservations::delete::handler),
                ),
        )
}
