use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Local;
use opentelemetry::KeyValue;
use serde::Deserialize;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::ReportRecord;
use crate::render::{ReportFormat, render_report};
use crate::telemetry::{REPORT_RENDER_DURATION, REPORTS_GENERATED};

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub format: Option<ReportFormat>,
}

/// Fabricates a report and returns it as a downloadable attachment.
pub async fn generate_sarlaft_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Response> {
    let format = query.format.unwrap_or(state.config.report_format);
    let asset_dir = state.config.asset_dir.clone();

    let record = ReportRecord::sample(Local::now());
    let report_id = record.report_id.clone();

    let start = Instant::now();
    let span = tracing::Span::current();
    let rendered = tokio::task::spawn_blocking(move || {
        let _entered = span.enter();
        render_report(&record, format, &asset_dir)
    })
    .await
    .map_err(|e| AppError::Internal(format!("render task failed: {e}")))??;

    let attributes = [KeyValue::new("report.format", format.as_str())];
    REPORT_RENDER_DURATION.record(start.elapsed().as_secs_f64() * 1000.0, &attributes);
    REPORTS_GENERATED.add(1, &attributes);

    tracing::info!(
        report.id = %report_id,
        report.format = %format,
        bytes = rendered.bytes.len(),
        "Report generated"
    );

    let disposition = format!("attachment; filename=\"{}\"", rendered.filename);

    Ok((
        [
            (header::CONTENT_TYPE, rendered.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        rendered.bytes,
    )
        .into_response())
}
