use std::env;
use std::path::PathBuf;

use crate::render::ReportFormat;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub environment: String,
    pub asset_dir: PathBuf,
    pub report_format: ReportFormat,
    pub otel_service_name: String,
    pub otel_exporter_endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            environment: "development".to_string(),
            asset_dir: default_asset_dir(),
            report_format: ReportFormat::Pdf,
            otel_service_name: "sarlaft-report-service".to_string(),
            otel_exporter_endpoint: "http://localhost:4317".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Self {
            port: env::var("PORT")
                .map(|v| v.parse().expect("PORT must be a number"))
                .unwrap_or(defaults.port),
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            asset_dir: env::var("ASSET_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.asset_dir),
            report_format: env::var("REPORT_FORMAT")
                .map(|v| v.parse().expect("REPORT_FORMAT must be `pdf` or `json`"))
                .unwrap_or(defaults.report_format),
            otel_service_name: env::var("OTEL_SERVICE_NAME")
                .unwrap_or(defaults.otel_service_name),
            otel_exporter_endpoint: env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                .unwrap_or(defaults.otel_exporter_endpoint),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// `static/` next to the installed binary, or relative to the working
/// directory when the executable path is unavailable.
fn default_asset_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("static")))
        .unwrap_or_else(|| PathBuf::from("static"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_need_no_environment() {
        let config = Config::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.report_format, ReportFormat::Pdf);
        assert!(config.asset_dir.ends_with("static"));
        assert!(!config.is_production());
    }

    #[test]
    fn test_is_production() {
        let config = Config {
            environment: "production".to_string(),
            ..Config::default()
        };
        assert!(config.is_production());
    }
}
