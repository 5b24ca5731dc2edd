//! Discipleship diagnostic scoring engine.
//!
//! Pipeline: [`answers`] → [`subscores`] → [`indices`] + [`signals`] → [`classifier`] →
//! [`cohort`]. [`DiagnosticEngine`] is the only entry point callers use, so the dashboard,
//! the member analysis view, and the printable report always agree.

pub mod answers;
mod cache;
pub mod classifier;
pub mod cohort;
pub mod indices;
mod profile;
pub mod questions;
mod report;
mod router;
mod service;
pub mod signals;
mod store;
pub mod subscores;
pub mod thresholds;

#[cfg(test)]
mod tests;

pub use cache::{fingerprint, SummaryCache};
pub use classifier::ProfileLabel;
pub use cohort::{CohortSummary, TemplateFilter};
pub use profile::{DiagnosticProfile, TransitionProfile};
pub use questions::{TemplateError, TemplateSchema};
pub use report::{recommended_actions, IndividualReport, ProfileCard};
pub use router::diagnostics_router;
pub use service::{DiagnosticsService, DiagnosticsServiceError};
pub use signals::{BarrierKind, WindowKind};
pub use store::{InMemoryResponseStore, ResponseStore, StoreError};
pub use subscores::{SubScoreTable, SubScores};
pub use thresholds::HealthStatus;

use crate::surveys::{Person, SurveyResponse, SurveyTemplate, TemplateCatalog, TemplateId};
use cohort::CohortTally;
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagnosticError {
    #[error("template '{0}' is not registered with the diagnostics engine")]
    UnknownTemplate(TemplateId),
    #[error("template '{template_id}' is scored as {found:?}, expected {expected:?}")]
    WrongSchema {
        template_id: TemplateId,
        expected: TemplateSchema,
        found: TemplateSchema,
    },
    #[error("response belongs to person '{response_person}', not '{report_person}'")]
    PersonMismatch {
        response_person: String,
        report_person: String,
    },
}

/// Stateless scorer bound to a validated set of templates.
#[derive(Debug, Clone)]
pub struct DiagnosticEngine {
    schemas: BTreeMap<TemplateId, TemplateSchema>,
    table: &'static SubScoreTable,
}

impl DiagnosticEngine {
    /// Binds every scored template, failing on the first one whose question codes do not
    /// match its schema.
    pub fn new<'a, I>(templates: I) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = &'a SurveyTemplate>,
    {
        let mut schemas = BTreeMap::new();
        for template in templates {
            if let Some(schema) = questions::bind_template(template)? {
                info!(template = %template.id, schema = schema.label(), "bound survey template");
                schemas.insert(template.id.clone(), schema);
            }
        }

        Ok(Self {
            schemas,
            table: SubScoreTable::current(),
        })
    }

    pub fn from_catalog(catalog: &TemplateCatalog) -> Result<Self, TemplateError> {
        Self::new(catalog.templates())
    }

    /// Engine over the built-in templates.
    pub fn standard() -> Result<Self, TemplateError> {
        Self::from_catalog(&TemplateCatalog::standard())
    }

    pub fn schema_for(&self, template_id: &TemplateId) -> Option<TemplateSchema> {
        self.schemas.get(template_id).copied()
    }

    pub fn table_version(&self) -> u16 {
        self.table.version()
    }

    pub fn diagnose(&self, response: &SurveyResponse) -> Result<DiagnosticProfile, DiagnosticError> {
        self.expect_schema(response, TemplateSchema::NewMembers)?;
        Ok(profile::diagnose_new_member(response, self.table))
    }

    pub fn classify(&self, response: &SurveyResponse) -> Result<ProfileLabel, DiagnosticError> {
        self.diagnose(response).map(|profile| profile.profile_label)
    }

    pub fn foundation_index(&self, response: &SurveyResponse) -> Result<u8, DiagnosticError> {
        self.diagnose(response).map(|profile| profile.foundation_index)
    }

    pub fn transition(
        &self,
        response: &SurveyResponse,
    ) -> Result<TransitionProfile, DiagnosticError> {
        self.expect_schema(response, TemplateSchema::Transition)?;
        Ok(profile::diagnose_transition(response))
    }

    /// Folds every response that passes `filter` and belongs to a bound template.
    pub fn summarize(&self, responses: &[SurveyResponse], filter: &TemplateFilter) -> CohortSummary {
        let mut tally = CohortTally::default();
        let mut skipped = 0usize;

        for response in responses
            .iter()
            .filter(|response| filter.matches(&response.template_id))
        {
            match self.schema_for(&response.template_id) {
                Some(TemplateSchema::NewMembers) => {
                    tally.add_profile(&profile::diagnose_new_member(response, self.table))
                }
                Some(TemplateSchema::Transition) => {
                    tally.add_transition(&profile::diagnose_transition(response))
                }
                None => skipped += 1,
            }
        }

        debug!(
            scored = tally.total_responses(),
            skipped,
            "summarized cohort responses"
        );
        tally.into_summary(filter)
    }

    /// Report for `person` from one response; `None` yields the no-data report.
    pub fn individual_report(
        &self,
        person: &Person,
        response: Option<&SurveyResponse>,
    ) -> Result<IndividualReport, DiagnosticError> {
        let Some(response) = response else {
            return Ok(IndividualReport::no_data(person.clone()));
        };

        if response.person_id != person.id {
            return Err(DiagnosticError::PersonMismatch {
                response_person: response.person_id.0.clone(),
                report_person: person.id.0.clone(),
            });
        }

        let profile = self.diagnose(response)?;
        Ok(IndividualReport::from_profile(
            person.clone(),
            response.updated_at,
            profile,
        ))
    }

    /// Most recent new-members response of a person, if any.
    pub fn latest_new_member_response<'a>(
        &self,
        person: &Person,
        responses: &'a [SurveyResponse],
    ) -> Option<&'a SurveyResponse> {
        responses
            .iter()
            .filter(|response| response.person_id == person.id)
            .filter(|response| {
                self.schema_for(&response.template_id) == Some(TemplateSchema::NewMembers)
            })
            .max_by(|left, right| {
                left.updated_at
                    .cmp(&right.updated_at)
                    .then_with(|| left.id.cmp(&right.id))
            })
    }

    fn expect_schema(
        &self,
        response: &SurveyResponse,
        expected: TemplateSchema,
    ) -> Result<(), DiagnosticError> {
        match self.schema_for(&response.template_id) {
            Some(found) if found == expected => Ok(()),
            Some(found) => Err(DiagnosticError::WrongSchema {
                template_id: response.template_id.clone(),
                expected,
                found,
            }),
            None => Err(DiagnosticError::UnknownTemplate(
                response.template_id.clone(),
            )),
        }
    }
}
