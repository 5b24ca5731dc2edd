use std::sync::Arc;

use super::cache::SummaryCache;
use super::cohort::{CohortSummary, TemplateFilter};
use super::report::IndividualReport;
use super::store::{ResponseStore, StoreError};
use super::{DiagnosticEngine, DiagnosticError};
use crate::surveys::{Person, PersonId, ResponseId, SurveyResponse};

/// Service composing the engine, the response store, and the summary cache.
pub struct DiagnosticsService<S> {
    engine: Arc<DiagnosticEngine>,
    store: Arc<S>,
    cache: SummaryCache,
}

impl<S> DiagnosticsService<S>
where
    S: ResponseStore + 'static,
{
    pub fn new(engine: Arc<DiagnosticEngine>, store: Arc<S>) -> Self {
        Self {
            engine,
            store,
            cache: SummaryCache::default(),
        }
    }

    pub fn engine(&self) -> &DiagnosticEngine {
        &self.engine
    }

    pub fn cache(&self) -> &SummaryCache {
        &self.cache
    }

    /// Dashboard summary over every stored response passing `filter`.
    pub fn cohort_summary(
        &self,
        filter: &TemplateFilter,
    ) -> Result<CohortSummary, DiagnosticsServiceError> {
        let responses = self.store.responses()?;
        Ok(self.summarize(&responses, filter))
    }

    /// Summary over caller-supplied responses, memoized by collection identity.
    pub fn summarize(&self, responses: &[SurveyResponse], filter: &TemplateFilter) -> CohortSummary {
        self.cache.get_or_compute(responses, filter, || {
            self.engine.summarize(responses, filter)
        })
    }

    /// Printable report for one stored response.
    pub fn response_report(
        &self,
        response_id: &ResponseId,
    ) -> Result<IndividualReport, DiagnosticsServiceError> {
        let response = self
            .store
            .response(response_id)?
            .ok_or_else(|| DiagnosticsServiceError::ResponseNotFound(response_id.clone()))?;
        let person = self.person_or_placeholder(&response.person_id)?;

        Ok(self.engine.individual_report(&person, Some(&response))?)
    }

    /// Printable report from the person's latest new-members response; a person without one
    /// gets the no-data report.
    pub fn person_report(
        &self,
        person_id: &PersonId,
    ) -> Result<IndividualReport, DiagnosticsServiceError> {
        let person = self
            .store
            .person(person_id)?
            .ok_or_else(|| DiagnosticsServiceError::PersonNotFound(person_id.clone()))?;
        let responses = self.store.responses()?;
        let latest = self.engine.latest_new_member_response(&person, &responses);

        Ok(self.engine.individual_report(&person, latest)?)
    }

    fn person_or_placeholder(&self, person_id: &PersonId) -> Result<Person, StoreError> {
        Ok(self.store.person(person_id)?.unwrap_or_else(|| Person {
            id: person_id.clone(),
            display_name: person_id.0.clone(),
        }))
    }
}

/// Error raised by the diagnostics service.
#[derive(Debug, thiserror::Error)]
pub enum DiagnosticsServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Diagnostic(#[from] DiagnosticError),
    #[error("response '{0}' not found")]
    ResponseNotFound(ResponseId),
    #[error("person '{0}' not found")]
    PersonNotFound(PersonId),
}
