//! Named question codes for each scored template, schema version 1.
//!
//! Renumbering a template's questions requires updating these enums; binding a template whose
//! questions no longer match fails when the engine is built instead of silently scoring zero.

use crate::surveys::{QuestionCode, SurveyTemplate, TemplateCategory, TemplateId};
use serde::Serialize;

pub const SCHEMA_VERSION: u16 = 1;

/// Questions of the "New Members Initial" template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NewMemberQuestion {
    PriorExperience,
    ArrivalChannel,
    LifeChanges,
    GrowthFeeling,
    DevotionalLife,
    BiblicalUnderstanding,
    Baptism,
    Participation,
    CurrentNeeds,
    Obstacles,
    NextStep,
}

impl NewMemberQuestion {
    pub const fn ordered() -> [Self; 11] {
        [
            Self::PriorExperience,
            Self::ArrivalChannel,
            Self::LifeChanges,
            Self::GrowthFeeling,
            Self::DevotionalLife,
            Self::BiblicalUnderstanding,
            Self::Baptism,
            Self::Participation,
            Self::CurrentNeeds,
            Self::Obstacles,
            Self::NextStep,
        ]
    }

    pub const fn code(self) -> QuestionCode {
        QuestionCode(match self {
            Self::PriorExperience => 1,
            Self::ArrivalChannel => 2,
            Self::LifeChanges => 3,
            Self::GrowthFeeling => 4,
            Self::DevotionalLife => 5,
            Self::BiblicalUnderstanding => 6,
            Self::Baptism => 7,
            Self::Participation => 8,
            Self::CurrentNeeds => 9,
            Self::Obstacles => 10,
            Self::NextStep => 11,
        })
    }

    pub const fn prompt(self) -> &'static str {
        match self {
            Self::PriorExperience => "¿Había asistido antes a una iglesia o leído la Biblia?",
            Self::ArrivalChannel => "¿Cómo llegó a nuestra iglesia?",
            Self::LifeChanges => "¿Ha notado cambios en su vida desde que llegó?",
            Self::GrowthFeeling => "¿Siente que está creciendo espiritualmente?",
            Self::DevotionalLife => "¿Con qué frecuencia ora o lee la Biblia?",
            Self::BiblicalUnderstanding => "¿Entiende lo que lee en la Biblia?",
            Self::Baptism => "¿Ha sido bautizado o desea bautizarse?",
            Self::Participation => "¿Participa en algún grupo o ministerio?",
            Self::CurrentNeeds => "¿Qué necesita en este momento?",
            Self::Obstacles => "¿Qué le dificulta crecer en su fe?",
            Self::NextStep => "¿Qué paso le gustaría dar ahora?",
        }
    }
}

/// Questions of the "Transition" template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionQuestion {
    Optimism,
    ThingsWillBeFine,
    UnderstandsReasons,
    SupportsDirection,
    LeadershipTrust,
    Transparency,
    Confidence,
}

impl TransitionQuestion {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Optimism,
            Self::ThingsWillBeFine,
            Self::UnderstandsReasons,
            Self::SupportsDirection,
            Self::LeadershipTrust,
            Self::Transparency,
            Self::Confidence,
        ]
    }

    pub const fn code(self) -> QuestionCode {
        QuestionCode(match self {
            Self::Optimism => 1,
            Self::ThingsWillBeFine => 2,
            Self::UnderstandsReasons => 3,
            Self::SupportsDirection => 4,
            Self::LeadershipTrust => 5,
            Self::Transparency => 6,
            Self::Confidence => 7,
        })
    }

    pub const fn prompt(self) -> &'static str {
        match self {
            Self::Optimism => "¿Se siente optimista sobre el futuro de la iglesia?",
            Self::ThingsWillBeFine => "¿Cree que todo estará bien durante la transición?",
            Self::UnderstandsReasons => "¿Entiende las razones del cambio?",
            Self::SupportsDirection => "¿Apoya la nueva dirección?",
            Self::LeadershipTrust => "Del 1 al 5, ¿cuánto confía en el liderazgo?",
            Self::Transparency => "¿Siente que la comunicación ha sido transparente?",
            Self::Confidence => "¿Tiene confianza en el nuevo equipo pastoral?",
        }
    }
}

/// Scoring schema a template has been bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateSchema {
    NewMembers,
    Transition,
}

impl TemplateSchema {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NewMembers => "New Members",
            Self::Transition => "Transition",
        }
    }

    fn required_codes(self) -> Vec<(QuestionCode, &'static str)> {
        match self {
            Self::NewMembers => NewMemberQuestion::ordered()
                .into_iter()
                .map(|question| (question.code(), question.prompt()))
                .collect(),
            Self::Transition => TransitionQuestion::ordered()
                .into_iter()
                .map(|question| (question.code(), question.prompt()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("template '{template_id}' does not declare {code} ({prompt}) required by the {schema:?} schema")]
    MissingQuestion {
        template_id: TemplateId,
        schema: TemplateSchema,
        code: QuestionCode,
        prompt: &'static str,
    },
    #[error("template '{template_id}' is version {found}; the engine scores version {expected}")]
    UnsupportedVersion {
        template_id: TemplateId,
        found: u16,
        expected: u16,
    },
}

/// Resolves a template's scoring schema and checks every code the schema reads is declared.
///
/// Templates outside the scored categories bind to `None` and are ignored by the engine.
pub fn bind_template(template: &SurveyTemplate) -> Result<Option<TemplateSchema>, TemplateError> {
    let schema = match template.category {
        TemplateCategory::NewMembers => TemplateSchema::NewMembers,
        TemplateCategory::Transition => TemplateSchema::Transition,
        TemplateCategory::General => return Ok(None),
    };

    if template.version != SCHEMA_VERSION {
        return Err(TemplateError::UnsupportedVersion {
            template_id: template.id.clone(),
            found: template.version,
            expected: SCHEMA_VERSION,
        });
    }

    for (code, prompt) in schema.required_codes() {
        if !template.declares(code) {
            return Err(TemplateError::MissingQuestion {
                template_id: template.id.clone(),
                schema,
                code,
                prompt,
            });
        }
    }

    Ok(Some(schema))
}
