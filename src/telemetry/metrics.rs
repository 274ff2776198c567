use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::LazyLock;

pub static METER: LazyLock<Meter> = LazyLock::new(|| global::meter("sarlaft-report-service"));

// --- Domain Metrics ---

pub static REPORTS_GENERATED: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("report.generated")
        .with_description("Number of reports rendered and returned")
        .with_unit("{report}")
        .build()
});

pub static REPORT_RENDER_DURATION: LazyLock<Histogram<f64>> = LazyLock::new(|| {
    METER
        .f64_histogram("report.render.duration")
        .with_description("Time spent rendering a report in milliseconds")
        .with_unit("ms")
        .build()
});

pub static LOGO_FALLBACKS: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("report.logo.fallback")
        .with_description("PDF renders that used the text header because no logo was usable")
        .with_unit("{render}")
        .build()
});

// --- HTTP Metrics ---

pub static HTTP_REQUESTS_TOTAL: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("http.requests.total")
        .with_description("Total number of HTTP requests")
        .with_unit("{request}")
        .build()
});

pub static HTTP_REQUEST_DURATION: LazyLock<Histogram<f64>> = LazyLock::new(|| {
    METER
        .f64_histogram("http.request.duration")
        .with_description("HTTP request duration in milliseconds")
        .with_unit("ms")
        .with_boundaries(vec![
            1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0, 5000.0,
        ])
        .build()
});
