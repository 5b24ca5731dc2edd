use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::cohort::TemplateFilter;
use super::service::{DiagnosticsService, DiagnosticsServiceError};
use super::store::ResponseStore;
use super::DiagnosticError;
use crate::surveys::{PersonId, ResponseId, SurveyResponse, TemplateId};

/// Router builder exposing the dashboard and printable-report endpoints.
pub fn diagnostics_router<S>(service: Arc<DiagnosticsService<S>>) -> Router
where
    S: ResponseStore + 'static,
{
    Router::new()
        .route("/api/v1/diagnostics/cohort", get(cohort_handler::<S>))
        .route(
            "/api/v1/diagnostics/cohort/summarize",
            post(summarize_handler::<S>),
        )
        .route(
            "/api/v1/diagnostics/responses/:response_id/report",
            get(response_report_handler::<S>),
        )
        .route(
            "/api/v1/diagnostics/people/:person_id/report",
            get(person_report_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CohortQuery {
    /// Comma-separated template ids; empty means every template.
    #[serde(default)]
    pub(crate) templates: Option<String>,
}

impl CohortQuery {
    fn filter(&self) -> TemplateFilter {
        let ids = self
            .templates
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(TemplateId::new);
        TemplateFilter::any_of(ids)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SummarizeRequest {
    pub(crate) responses: Vec<SurveyResponse>,
    #[serde(default)]
    pub(crate) template_ids: Vec<TemplateId>,
}

pub(crate) async fn cohort_handler<S>(
    State(service): State<Arc<DiagnosticsService<S>>>,
    Query(query): Query<CohortQuery>,
) -> Response
where
    S: ResponseStore + 'static,
{
    match service.cohort_summary(&query.filter()) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn summarize_handler<S>(
    State(service): State<Arc<DiagnosticsService<S>>>,
    axum::Json(request): axum::Json<SummarizeRequest>,
) -> Response
where
    S: ResponseStore + 'static,
{
    let filter = TemplateFilter::any_of(request.template_ids);
    let summary = service.summarize(&request.responses, &filter);
    (StatusCode::OK, axum::Json(summary)).into_response()
}

pub(crate) async fn response_report_handler<S>(
    State(service): State<Arc<DiagnosticsService<S>>>,
    Path(response_id): Path<String>,
) -> Response
where
    S: ResponseStore + 'static,
{
    match service.response_report(&ResponseId(response_id)) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn person_report_handler<S>(
    State(service): State<Arc<DiagnosticsService<S>>>,
    Path(person_id): Path<String>,
) -> Response
where
    S: ResponseStore + 'static,
{
    match service.person_report(&PersonId(person_id)) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: DiagnosticsServiceError) -> Response {
    let status = match &error {
        DiagnosticsServiceError::ResponseNotFound(_)
        | DiagnosticsServiceError::PersonNotFound(_) => StatusCode::NOT_FOUND,
        DiagnosticsServiceError::Diagnostic(
            DiagnosticError::UnknownTemplate(_) | DiagnosticError::WrongSchema { .. },
        ) => StatusCode::UNPROCESSABLE_ENTITY,
        DiagnosticsServiceError::Diagnostic(DiagnosticError::PersonMismatch { .. })
        | DiagnosticsServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
