use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;
use opentelemetry::KeyValue;

use crate::telemetry::{HTTP_REQUEST_DURATION, HTTP_REQUESTS_TOTAL};

/// Records request count and latency, labelled by method, matched route and
/// status. Installed with `route_layer` so the matched route is known.
pub async fn track_http_metrics(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let response = next.run(request).await;

    let attributes = http_metric_attributes(&method, &route, response.status().as_u16());
    HTTP_REQUESTS_TOTAL.add(1, &attributes);
    HTTP_REQUEST_DURATION.record(started.elapsed().as_secs_f64() * 1000.0, &attributes);

    response
}

fn http_metric_attributes(method: &Method, route: &str, status: u16) -> Vec<KeyValue> {
    vec![
        KeyValue::new("http.method", method.as_str().to_owned()),
        KeyValue::new("http.route", route.to_owned()),
        KeyValue::new("http.status_code", status.to_string()),
        KeyValue::new("http.status_class", format!("{}xx", status / 100)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_of(attributes: &[KeyValue], key: &str) -> String {
        attributes
            .iter()
            .find(|kv| kv.key.as_str() == key)
            .map(|kv| kv.value.as_str().into_owned())
            .unwrap()
    }

    #[test]
    fn test_attributes_carry_method_route_and_status() {
        let attributes = http_metric_attributes(&Method::GET, "/generate-sarlaft-report", 200);

        assert_eq!(value_of(&attributes, "http.method"), "GET");
        assert_eq!(value_of(&attributes, "http.route"), "/generate-sarlaft-report");
        assert_eq!(value_of(&attributes, "http.status_code"), "200");
        assert_eq!(value_of(&attributes, "http.status_class"), "2xx");
    }

    #[test]
    fn test_client_errors_are_classed_4xx() {
        let attributes = http_metric_attributes(&Method::GET, "/generate-sarlaft-report", 400);
        assert_eq!(value_of(&attributes, "http.status_class"), "4xx");
    }
}
