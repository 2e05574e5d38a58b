//! HTTP span helpers.

use uuid::Uuid;

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) otel_path: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let otel_path = normalise_path_for_span_name(path);
    let otel_span_name = format!("{method} {otel_path}");

    RequestSpanName {
        otel_path,
        otel_span_name,
    }
}

/// Replace ids in `path` with placeholders so spans and metrics group by route.
fn normalise_path_for_span_name(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::new();
    let mut previous = "";

    for segment in path.trim_start_matches('/').split('/') {
        normalised.push('/');

        if Uuid::parse_str(segment).is_ok() {
            normalised.push_str("{uuid}");
        } else if previous == "users" && !segment.is_empty() {
            normalised.push_str("{userId}");
        } else {
            normalised.push_str(segment);
        }

        previous = segment;
    }

    normalised
}
