use crate::config::ConfigError;
use crate::diagnostics::{DiagnosticError, DiagnosticsServiceError, TemplateError};
use crate::surveys::{ResponseImportError, TemplateCatalogError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Template(TemplateError),
    Catalog(TemplateCatalogError),
    Import(ResponseImportError),
    Diagnostic(DiagnosticError),
    Service(DiagnosticsServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Template(err) => write!(f, "template error: {}", err),
            AppError::Catalog(err) => write!(f, "template catalog error: {}", err),
            AppError::Import(err) => write!(f, "response import error: {}", err),
            AppError::Diagnostic(err) => write!(f, "diagnostic error: {}", err),
            AppError::Service(err) => write!(f, "diagnostics service error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Template(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Diagnostic(err) => Some(err),
            AppError::Service(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Service(
                DiagnosticsServiceError::ResponseNotFound(_)
                | DiagnosticsServiceError::PersonNotFound(_),
            ) => StatusCode::NOT_FOUND,
            AppError::Template(_)
            | AppError::Catalog(_)
            | AppError::Import(_)
            | AppError::Diagnostic(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<TemplateError> for AppError {
    fn from(value: TemplateError) -> Self {
        Self::Template(value)
    }
}

impl From<TemplateCatalogError> for AppError {
    fn from(value: TemplateCatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<ResponseImportError> for AppError {
    fn from(value: ResponseImportError) -> Self {
        Self::Import(value)
    }
}

impl From<DiagnosticError> for AppError {
    fn from(value: DiagnosticError) -> Self {
        Self::Diagnostic(value)
    }
}

impl From<DiagnosticsServiceError> for AppError {
    fn from(value: DiagnosticsServiceError) -> Self {
        Self::Service(value)
    }
}
