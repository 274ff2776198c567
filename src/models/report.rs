use chrono::{DateTime, Local, NaiveDateTime};
use serde::Serialize;

pub const REGULATOR: &str = "UIAF / SARLAFT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComplianceStatus {
    High,
    Medium,
    Low,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::High => "HIGH",
            ComplianceStatus::Medium => "MEDIUM",
            ComplianceStatus::Low => "LOW",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportCounts {
    pub transactions_analyzed: u32,
    pub suspicious_alerts_low: u32,
    pub suspicious_alerts_high: u32,
    pub reportable_cases: u32,
}

/// A fabricated SARLAFT compliance report. Built per request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRecord {
    pub report_id: String,
    pub regulator: String,
    pub date_generated: NaiveDateTime,
    pub compliance_status: ComplianceStatus,
    pub data_summary: ReportCounts,
    pub regulatory_notes: Vec<String>,
    pub disclaimer: String,
}

impl ReportRecord {
    /// Fabricates the sample report stamped with `now`.
    pub fn sample(now: DateTime<Local>) -> Self {
        let date_generated = now.naive_local();

        Self {
            report_id: format!("RPT-SARLAFT-{}", date_generated.format("%Y%m%d%H%M%S")),
            regulator: REGULATOR.to_string(),
            date_generated,
            compliance_status: ComplianceStatus::High,
            data_summary: ReportCounts {
                transactions_analyzed: 1500,
                suspicious_alerts_low: 3,
                suspicious_alerts_high: 2,
                reportable_cases: 2,
            },
            regulatory_notes: vec![
                "El proceso cumple con los requerimientos de la Circular 001 de 2024.".to_string(),
                "La privacidad de datos está asegurada conforme a Habeas Data.".to_string(),
            ],
            disclaimer: "Este es un reporte simulado. El objetivo es la prueba de la infraestructura CI/CD."
                .to_string(),
        }
    }

    /// Generation time as printed in the document body.
    pub fn display_date(&self) -> String {
        self.date_generated.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap()
    }

    #[test]
    fn test_sample_report_id_uses_timestamp() {
        let record = ReportRecord::sample(fixed_now());
        assert_eq!(record.report_id, "RPT-SARLAFT-20240305140709");
        assert_eq!(record.display_date(), "2024-03-05 14:07:09");
    }

    #[test]
    fn test_sample_figures() {
        let record = ReportRecord::sample(fixed_now());
        assert_eq!(record.regulator, "UIAF / SARLAFT");
        assert_eq!(record.compliance_status, ComplianceStatus::High);
        assert_eq!(record.data_summary.transactions_analyzed, 1500);
        assert_eq!(record.data_summary.suspicious_alerts_low, 3);
        assert_eq!(record.data_summary.suspicious_alerts_high, 2);
        assert_eq!(record.data_summary.reportable_cases, 2);
        assert_eq!(record.regulatory_notes.len(), 2);
        assert!(record.regulatory_notes[0].contains("Circular 001"));
    }

    #[test]
    fn test_serializes_with_payload_field_names() {
        let record = ReportRecord::sample(fixed_now());
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["report_id"], "RPT-SARLAFT-20240305140709");
        assert_eq!(value["compliance_status"], "HIGH");
        assert_eq!(value["date_generated"], "2024-03-05T14:07:09");
        assert_eq!(value["data_summary"]["suspicious_alerts_high"], 2);
        assert_eq!(value["regulatory_notes"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_status_as_str_matches_serde() {
        for status in [
            ComplianceStatus::High,
            ComplianceStatus::Medium,
            ComplianceStatus::Low,
        ] {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, status.as_str());
        }
    }
}
