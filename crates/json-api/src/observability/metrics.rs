//! Prometheus metrics for HTTP traffic and booking outcomes, and the
//! `/metrics` exposition endpoint.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
    core::Collector,
};
use salvo::{
    Response, handler,
    http::{StatusCode, header::CONTENT_TYPE},
};
use tracing::error;

const NAMESPACE: &str = "hotel_json";

const DURATION_BUCKETS: [f64; 13] = [
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Booking endpoint that produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReservationOperation {
    Create,
    Update,
}

impl ReservationOperation {
    fn label(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
        }
    }
}

/// How a booking attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReservationOutcome {
    /// A room was assigned to a new reservation.
    Booked,

    /// An existing reservation moved to new dates.
    Moved,

    /// No room was free for the requested nights.
    Unavailable,

    /// The reservation id was already taken.
    AlreadyExists,
}

impl ReservationOutcome {
    fn label(self) -> &'static str {
        match self {
            Self::Booked => "booked",
            Self::Moved => "moved",
            Self::Unavailable => "unavailable",
            Self::AlreadyExists => "already_exists",
        }
    }
}

#[derive(Debug)]
struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    reservations_total: IntCounterVec,
}

static METRICS: OnceLock<Option<Metrics>> = OnceLock::new();

/// Keeps the in-flight gauge raised for as long as it lives.
#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    gauge: Option<IntGauge>,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let gauge = metrics().map(|metrics| metrics.requests_in_flight.clone());

        if let Some(gauge) = &gauge {
            gauge.inc();
        }

        Self { gauge }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if let Some(gauge) = &self.gauge {
            gauge.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_code_label = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[
            method,
            route,
            status_class(status_code),
            status_code_label.as_str(),
        ])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count one booking attempt by endpoint and outcome.
pub(crate) fn record_reservation(operation: ReservationOperation, outcome: ReservationOutcome) {
    if let Some(metrics) = metrics() {
        metrics
            .reservations_total
            .with_label_values(&[operation.label(), outcome.label()])
            .inc();
    }
}

/// Current value of one booking series.
#[cfg(test)]
pub(crate) fn reservations_count(
    operation: ReservationOperation,
    outcome: ReservationOutcome,
) -> u64 {
    metrics().map_or(0, |metrics| {
        metrics
            .reservations_total
            .with_label_values(&[operation.label(), outcome.label()])
            .get()
    })
}

#[handler]
pub(crate) async fn metrics_handler(res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();

    let body = match encoder.encode_to_string(&metrics.registry.gather()) {
        Ok(body) => body,
        Err(source) => {
            error!("failed to encode metrics: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

            return;
        }
    };

    if let Err(source) = res.add_header(CONTENT_TYPE, encoder.format_type(), true) {
        error!("failed to set metrics content type: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    res.render(body);
}

fn metrics() -> Option<&'static Metrics> {
    METRICS.get_or_init(build_metrics).as_ref()
}

fn build_metrics() -> Option<Metrics> {
    let registry = Registry::new();

    let requests_total = register(
        &registry,
        "http_requests_total",
        IntCounterVec::new(
            Opts::new(
                "http_requests_total",
                "HTTP requests by method, route, status class and status code.",
            )
            .namespace(NAMESPACE),
            &["method", "route", "status_class", "status_code"],
        ),
    )?;

    let request_duration_seconds = register(
        &registry,
        "http_request_duration_seconds",
        HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds by method and route.",
            )
            .namespace(NAMESPACE)
            .buckets(DURATION_BUCKETS.to_vec()),
            &["method", "route"],
        ),
    )?;

    let requests_in_flight = register(
        &registry,
        "http_requests_in_flight",
        IntGauge::with_opts(
            Opts::new("http_requests_in_flight", "HTTP requests currently being served.")
                .namespace(NAMESPACE),
        ),
    )?;

    let reservations_total = register(
        &registry,
        "reservations_total",
        IntCounterVec::new(
            Opts::new(
                "reservations_total",
                "Booking attempts by operation and outcome.",
            )
            .namespace(NAMESPACE),
            &["operation", "outcome"],
        ),
    )?;

    Some(Metrics {
        registry,
        requests_total,
        request_duration_seconds,
        requests_in_flight,
        reservations_total,
    })
}

fn register<M>(registry: &Registry, name: &str, metric: prometheus::Result<M>) -> Option<M>
where
    M: Collector + Clone + 'static,
{
    let metric = match metric {
        Ok(metric) => metric,
        Err(source) => {
            error!(metric = name, "failed to create metric: {source}");
            return None;
        }
    };

    if let Err(source) = registry.register(Box::new(metric.clone())) {
        error!(metric = name, "failed to register metric: {source}");
        return None;
    }

    Some(metric)
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        Router, Service,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    async fn scrape() -> TestResult<String> {
        let service =
            Service::new(Router::new().push(Router::with_path("metrics").get(metrics_handler)));

        Ok(TestClient::get("http://example.com/metrics")
            .send(&service)
            .await
            .take_string()
            .await?)
    }

    #[test]
    fn status_codes_fall_into_classes() {
        assert_eq!(status_class(201), "2xx");
        assert_eq!(status_class(409), "4xx");
        assert_eq!(status_class(503), "5xx");
        assert_eq!(status_class(42), "other");
    }

    #[test]
    fn record_reservation_increments_the_matching_series() {
        let before = reservations_count(ReservationOperation::Update, ReservationOutcome::Moved);

        record_reservation(ReservationOperation::Update, ReservationOutcome::Moved);

        let after = reservations_count(ReservationOperation::Update, ReservationOutcome::Moved);

        assert!(after > before, "expected update/moved to be counted");
    }

    #[tokio::test]
    async fn metrics_endpoint_exposes_http_and_booking_metrics() -> TestResult {
        observe_request("GET", "/reservations/{uuid}", 200, 0.042);
        observe_request("POST", "/reservations", 409, 0.123);
        record_reservation(ReservationOperation::Create, ReservationOutcome::Booked);
        record_reservation(ReservationOperation::Create, ReservationOutcome::Unavailable);

        let body = scrape().await?;

        for expected in [
            "hotel_json_http_requests_total",
            "status_class=\"4xx\"",
            "hotel_json_http_request_duration_seconds",
            "hotel_json_http_requests_in_flight",
            "hotel_json_reservations_total{operation=\"create\",outcome=\"booked\"}",
            "hotel_json_reservations_total{operation=\"create\",outcome=\"unavailable\"}",
        ] {
            assert!(body.contains(expected), "expected {expected} in:\n{body}");
        }

        Ok(())
    }
}
