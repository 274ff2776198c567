pub mod fonts;
pub mod json;
pub mod pdf;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::assets::load_logo;
use crate::error::AppError;
use crate::models::ReportRecord;

pub use json::render_json;
pub use pdf::render_pdf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Pdf,
    Json,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Json => "json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "application/pdf",
            ReportFormat::Json => "application/json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(ReportFormat::Pdf),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format: {other}")),
        }
    }
}

/// A rendered report ready to be sent as an attachment.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
}

/// Renders `record` in `format`. PDF rendering looks for the logo in
/// `asset_dir` and falls back to a text header when none is usable.
pub fn render_report(
    record: &ReportRecord,
    format: ReportFormat,
    asset_dir: &Path,
) -> Result<RenderedReport, AppError> {
    let (bytes, filename) = match format {
        ReportFormat::Pdf => {
            let logo = load_logo(asset_dir);
            if logo.is_none() {
                crate::telemetry::LOGO_FALLBACKS.add(1, &[]);
            }
            (
                render_pdf(record, logo.as_ref())?,
                format!("SARLAFT_Report_{}.pdf", record.report_id),
            )
        }
        ReportFormat::Json => (render_json(record)?, "sarlaft_report.json".to_string()),
    };

    Ok(RenderedReport {
        bytes,
        content_type: format.content_type(),
        filename,
    })
}
