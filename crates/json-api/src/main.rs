//! Hotel Reservations JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{OpenApi, swagger_ui::SwaggerUi},
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use hotel_app::context::AppContext;

use crate::{
    config::ServerConfig,
    observability::{Observability, request_logging},
    state::State,
};

mod config;
mod extensions;
mod healthcheck;
mod observability;
mod reservations;
mod rooms;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Hotel Reservations JSON API Server entry point
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|e| exit_before_logging("Configuration", &e));

    let observability =
        Observability::init(&config).unwrap_or_else(|e| exit_before_logging("Observability", &e));

    let addr = config.socket_addr();

    let app = match AppContext::from_config(&config.database).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            observability.shutdown();
            process::exit(1);
        }
    };

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(request_logging)
        .hoop(inject(State::from_app_context(app)))
        .push(router::app_router());

    let doc =
        OpenApi::new("Hotel Reservations API", env!("CARGO_PKG_VERSION")).merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;

    info!("server stopped");

    observability.shutdown();
}

#[expect(clippy::exit, reason = "startup failed before the server could run")]
fn exit_before_logging(stage: &str, error: &dyn std::fmt::Display) -> ! {
    #[expect(
        clippy::print_stderr,
        reason = "logging not initialized yet, must use eprintln for startup errors"
    )]
    {
        eprintln!("{stage} error: {error}");
    }

    process::exit(1);
}
