//! Survey records consumed by the diagnostics engine.
//!
//! Templates and responses are owned by the survey-taking feature; this crate only reads them.

mod catalog;
pub mod domain;
pub mod import;

pub use catalog::{TemplateCatalog, TemplateCatalogError, NEW_MEMBERS_TEMPLATE_ID, TRANSITION_TEMPLATE_ID};
pub use domain::{
    Answer, Person, PersonId, QuestionCode, ResponseId, SurveyResponse, SurveyTemplate,
    TemplateCategory, TemplateId, TemplateQuestion,
};
pub use import::{ImportedDataset, ResponseImportError, ResponseImporter};
