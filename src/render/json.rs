use crate::error::AppError;
use crate::models::ReportRecord;

#[tracing::instrument(name = "render_json", skip_all, fields(report.id = %record.report_id))]
pub fn render_json(record: &ReportRecord) -> Result<Vec<u8>, AppError> {
    Ok(serde_json::to_vec_pretty(record)?)
}
