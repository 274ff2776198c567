use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use opentelemetry::trace::TraceContextExt;
use serde_json::json;
use thiserror::Error;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message shown to the caller. Causes stay in the server logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::Pdf(_) | AppError::Render(_) => "Error generando PDF",
            AppError::Serialization(_) | AppError::Internal(_) => "Error generando reporte",
        }
    }
}

fn get_trace_id() -> Option<String> {
    let span = Span::current();
    let context = span.context();
    let span_ref = context.span();
    let span_context = span_ref.span_context();

    if span_context.is_valid() {
        Some(span_context.trace_id().to_string())
    } else {
        None
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Pdf(e) => tracing::error!(error = %e, "PDF error"),
            AppError::Serialization(e) => tracing::error!(error = %e, "Serialization error"),
            AppError::Render(msg) => tracing::error!(error = %msg, "Render error"),
            AppError::Internal(msg) => tracing::error!(error = %msg, "Internal error"),
        }

        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let error_message = self.public_message();

        let body = if let Some(trace_id) = get_trace_id() {
            json!({
                "error": error_message,
                "status": status.as_u16(),
                "trace_id": trace_id,
            })
        } else {
            json!({
                "error": error_message,
                "status": status.as_u16(),
            })
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error() {
        let error = AppError::Render("logo stream".to_string());
        assert_eq!(error.to_string(), "Render error: logo stream");
        assert_eq!(error.public_message(), "Error generando PDF");
    }

    #[test]
    fn test_internal_error() {
        let error = AppError::Internal("render task panicked".to_string());
        assert_eq!(error.to_string(), "Internal error: render task panicked");
        assert_eq!(error.public_message(), "Error generando reporte");
    }

    #[test]
    fn test_serialization_error_from() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: AppError = source.into();
        assert!(matches!(error, AppError::Serialization(_)));
        assert_eq!(error.public_message(), "Error generando reporte");
    }

    #[tokio::test]
    async fn test_into_response_hides_cause() {
        let response = AppError::Render("secret detail".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "Error generando PDF");
        assert_eq!(value["status"], 500);
        assert!(!String::from_utf8_lossy(&body).contains("secret detail"));
    }

    #[test]
    fn test_app_result_err() {
        fn returns_err() -> AppResult<i32> {
            Err(AppError::Internal("test".to_string()))
        }
        assert!(returns_err().is_err());
    }
}
