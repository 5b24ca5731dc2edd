use super::domain::{SurveyTemplate, TemplateCategory, TemplateId, TemplateQuestion};
use crate::diagnostics::questions::{NewMemberQuestion, TransitionQuestion};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::info;

pub const NEW_MEMBERS_TEMPLATE_ID: &str = "new-members-initial";
pub const TRANSITION_TEMPLATE_ID: &str = "transition";

#[derive(Debug, thiserror::Error)]
pub enum TemplateCatalogError {
    #[error("failed to read template catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid template catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("template '{0}' is declared more than once")]
    DuplicateTemplate(TemplateId),
}

/// Set of templates the engine is allowed to score, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: BTreeMap<TemplateId, SurveyTemplate>,
}

impl TemplateCatalog {
    /// Built-in "New Members Initial" and "Transition" templates.
    pub fn standard() -> Self {
        let new_members = SurveyTemplate {
            id: TemplateId::new(NEW_MEMBERS_TEMPLATE_ID),
            title: "New Members Initial".to_string(),
            category: TemplateCategory::NewMembers,
            version: 1,
            questions: NewMemberQuestion::ordered()
                .into_iter()
                .map(|question| TemplateQuestion {
                    code: question.code(),
                    prompt: question.prompt().to_string(),
                })
                .collect(),
        };

        let transition = SurveyTemplate {
            id: TemplateId::new(TRANSITION_TEMPLATE_ID),
            title: "Transition".to_string(),
            category: TemplateCategory::Transition,
            version: 1,
            questions: TransitionQuestion::ordered()
                .into_iter()
                .map(|question| TemplateQuestion {
                    code: question.code(),
                    prompt: question.prompt().to_string(),
                })
                .collect(),
        };

        let mut templates = BTreeMap::new();
        templates.insert(new_members.id.clone(), new_members);
        templates.insert(transition.id.clone(), transition);
        Self { templates }
    }

    pub fn from_templates(
        templates: impl IntoIterator<Item = SurveyTemplate>,
    ) -> Result<Self, TemplateCatalogError> {
        let mut catalog = BTreeMap::new();
        for template in templates {
            if catalog.contains_key(&template.id) {
                return Err(TemplateCatalogError::DuplicateTemplate(template.id));
            }
            catalog.insert(template.id.clone(), template);
        }
        Ok(Self {
            templates: catalog,
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TemplateCatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads a JSON array of templates.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TemplateCatalogError> {
        let templates: Vec<SurveyTemplate> = serde_json::from_reader(reader)?;
        let catalog = Self::from_templates(templates)?;
        info!(templates = catalog.len(), "loaded survey template catalog");
        Ok(catalog)
    }

    pub fn get(&self, id: &TemplateId) -> Option<&SurveyTemplate> {
        self.templates.get(id)
    }

    pub fn templates(&self) -> impl Iterator<Item = &SurveyTemplate> {
        self.templates.values()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
