use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Stable numeric identifier of one question within a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionCode(pub u16);

impl fmt::Display for QuestionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

/// Identifier wrapper for survey templates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub String);

impl TemplateId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for completed questionnaires.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseId(pub String);

impl fmt::Display for ResponseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for congregation members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub String);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Minimal person record handed to the report generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub display_name: String,
}

/// Which scoring schema a template is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateCategory {
    NewMembers,
    Transition,
    #[serde(other)]
    General,
}

impl TemplateCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NewMembers => "New Members",
            Self::Transition => "Transition",
            Self::General => "General",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateQuestion {
    pub code: QuestionCode,
    pub prompt: String,
}

/// Questionnaire definition as authored by the survey feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyTemplate {
    pub id: TemplateId,
    pub title: String,
    pub category: TemplateCategory,
    #[serde(default = "default_template_version")]
    pub version: u16,
    pub questions: Vec<TemplateQuestion>,
}

fn default_template_version() -> u16 {
    1
}

impl SurveyTemplate {
    pub fn declares(&self, code: QuestionCode) -> bool {
        self.questions.iter().any(|question| question.code == code)
    }
}

/// One answer to one question. Values arrive as free text, labels, booleans, numbers, or
/// multi-select lists and are coerced to text before matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub question_code: QuestionCode,
    #[serde(default)]
    pub value: Value,
}

impl Answer {
    pub fn new(question_code: QuestionCode, value: impl Into<Value>) -> Self {
        Self {
            question_code,
            value: value.into(),
        }
    }

    pub fn text(&self) -> String {
        coerce_text(&self.value)
    }
}

fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(items) => items
            .iter()
            .map(coerce_text)
            .filter(|item| !item.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}

/// A completed questionnaire for one person against one template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub id: ResponseId,
    pub person_id: PersonId,
    pub template_id: TemplateId,
    #[serde(default)]
    pub answers: Vec<Answer>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl SurveyResponse {
    /// First answer recorded for `code`; templates allow one answer per code.
    pub fn answer(&self, code: QuestionCode) -> Option<&Answer> {
        self.answers
            .iter()
            .find(|answer| answer.question_code == code)
    }
}
