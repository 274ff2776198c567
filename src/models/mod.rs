pub mod report;

pub use report::{ComplianceStatus, ReportCounts, ReportRecord};
