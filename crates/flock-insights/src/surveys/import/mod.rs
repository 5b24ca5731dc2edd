mod parser;

use super::domain::{
    Answer, Person, PersonId, QuestionCode, ResponseId, SurveyResponse, TemplateId,
};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ResponseImportError {
    #[error("failed to read response export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid response CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("response {response_id} has an unreadable timestamp '{value}'")]
    InvalidTimestamp { response_id: String, value: String },
    #[error("response {0} has no timestamp on any row")]
    MissingTimestamp(String),
    #[error("response {response_id} has a non-numeric question code '{value}'")]
    InvalidQuestionCode { response_id: String, value: String },
    #[error("response {response_id} spans templates '{first}' and '{second}'")]
    InconsistentTemplate {
        response_id: String,
        first: String,
        second: String,
    },
}

/// People and responses recovered from an export, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct ImportedDataset {
    pub people: Vec<Person>,
    pub responses: Vec<SurveyResponse>,
}

pub struct ResponseImporter;

impl ResponseImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ImportedDataset, ResponseImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ImportedDataset, ResponseImportError> {
        let mut builder = DatasetBuilder::default();
        for row in parser::parse_rows(reader)? {
            builder.apply(row)?;
        }

        let dataset = builder.finish()?;
        info!(
            people = dataset.people.len(),
            responses = dataset.responses.len(),
            "imported survey responses"
        );
        Ok(dataset)
    }
}

struct PendingResponse {
    id: ResponseId,
    person_id: PersonId,
    template_id: TemplateId,
    answers: Vec<Answer>,
    updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Default)]
struct DatasetBuilder {
    people: Vec<Person>,
    person_index: HashMap<String, usize>,
    responses: Vec<PendingResponse>,
    response_index: HashMap<String, usize>,
}

impl DatasetBuilder {
    fn apply(&mut self, row: parser::ResponseRow) -> Result<(), ResponseImportError> {
        self.record_person(&row.person_id, row.person_name.as_deref());

        let position = match self.response_index.get(&row.response_id) {
            Some(position) => *position,
            None => {
                self.responses.push(PendingResponse {
                    id: ResponseId(row.response_id.clone()),
                    person_id: PersonId(row.person_id.clone()),
                    template_id: TemplateId(row.template_id.clone()),
                    answers: Vec::new(),
                    updated_at: None,
                });
                self.response_index
                    .insert(row.response_id.clone(), self.responses.len() - 1);
                self.responses.len() - 1
            }
        };
        let pending = &mut self.responses[position];

        if pending.template_id.as_str() != row.template_id {
            return Err(ResponseImportError::InconsistentTemplate {
                response_id: row.response_id,
                first: pending.template_id.0.clone(),
                second: row.template_id,
            });
        }

        if let Some(raw) = row.updated_at.as_deref() {
            let parsed = parser::parse_datetime(raw).ok_or_else(|| {
                ResponseImportError::InvalidTimestamp {
                    response_id: row.response_id.clone(),
                    value: raw.to_string(),
                }
            })?;
            pending.updated_at = Some(match pending.updated_at {
                Some(existing) if existing > parsed => existing,
                _ => parsed,
            });
        }

        if let Some(raw_code) = row.question_code.as_deref() {
            let code = raw_code.parse::<u16>().map_err(|_| {
                ResponseImportError::InvalidQuestionCode {
                    response_id: row.response_id.clone(),
                    value: raw_code.to_string(),
                }
            })?;
            let code = QuestionCode(code);
            if pending
                .answers
                .iter()
                .all(|answer| answer.question_code != code)
            {
                pending.answers.push(Answer {
                    question_code: code,
                    value: parser::answer_value(row.answer.as_deref()),
                });
            }
        }

        Ok(())
    }

    fn record_person(&mut self, person_id: &str, name: Option<&str>) {
        match self.person_index.get(person_id) {
            Some(position) => {
                let person = &mut self.people[*position];
                if person.display_name == person.id.0 {
                    if let Some(name) = name {
                        person.display_name = name.to_string();
                    }
                }
            }
            None => {
                self.people.push(Person {
                    id: PersonId(person_id.to_string()),
                    display_name: name.unwrap_or(person_id).to_string(),
                });
                self.person_index
                    .insert(person_id.to_string(), self.people.len() - 1);
            }
        }
    }

    fn finish(self) -> Result<ImportedDataset, ResponseImportError> {
        let responses = self
            .responses
            .into_iter()
            .map(|pending| {
                let updated_at = pending
                    .updated_at
                    .ok_or_else(|| ResponseImportError::MissingTimestamp(pending.id.0.clone()))?;
                Ok(SurveyResponse {
                    id: pending.id,
                    person_id: pending.person_id,
                    template_id: pending.template_id,
                    answers: pending.answers,
                    updated_at,
                    score: None,
                })
            })
            .collect::<Result<Vec<_>, ResponseImportError>>()?;

        Ok(ImportedDataset {
            people: self.people,
            responses,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    const HEADER: &str =
        "Response ID,Person ID,Person Name,Template ID,Updated At,Question Code,Answer\n";

    #[test]
    fn importer_groups_rows_into_responses() {
        let csv = format!(
            "{HEADER}\
r-1,p-1,Ana Gómez,new-members-initial,2025-03-02T10:00:00Z,4,true\n\
r-1,p-1,,new-members-initial,2025-03-02T10:05:00Z,10,Trabajo|Distancia\n\
r-2,p-2,Luis,transition,2025-03-03,5,4\n"
        );

        let dataset = ResponseImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(dataset.people.len(), 2);
        assert_eq!(dataset.people[0].display_name, "Ana Gómez");
        assert_eq!(dataset.responses.len(), 2);

        let first = &dataset.responses[0];
        assert_eq!(first.answers.len(), 2);
        assert_eq!(
            first.answer(QuestionCode(10)).expect("obstacles").value,
            json!(["Trabajo", "Distancia"])
        );
        assert_eq!(
            first.updated_at.to_rfc3339(),
            "2025-03-02T10:05:00+00:00"
        );
    }

    #[test]
    fn importer_keeps_first_answer_for_repeated_codes() {
        let csv = format!(
            "{HEADER}\
r-1,p-1,Ana,new-members-initial,2025-03-02,5,Casi todos los días\n\
r-1,p-1,Ana,new-members-initial,2025-03-02,5,Ocasionalmente\n"
        );

        let dataset = ResponseImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        let response = &dataset.responses[0];
        assert_eq!(response.answers.len(), 1);
        assert_eq!(response.answers[0].text(), "Casi todos los días");
    }

    #[test]
    fn importer_rejects_bad_question_codes() {
        let csv = format!("{HEADER}r-1,p-1,Ana,new-members-initial,2025-03-02,Q5,Sí\n");
        let error = ResponseImporter::from_reader(Cursor::new(csv)).expect_err("bad code");
        match error {
            ResponseImportError::InvalidQuestionCode { value, .. } => assert_eq!(value, "Q5"),
            other => panic!("expected invalid question code, got {other:?}"),
        }
    }

    #[test]
    fn importer_requires_a_timestamp() {
        let csv = format!("{HEADER}r-1,p-1,Ana,new-members-initial,,5,Sí\n");
        let error = ResponseImporter::from_reader(Cursor::new(csv)).expect_err("no timestamp");
        assert!(matches!(error, ResponseImportError::MissingTimestamp(id) if id == "r-1"));
    }

    #[test]
    fn importer_rejects_responses_spanning_templates() {
        let csv = format!(
            "{HEADER}\
r-1,p-1,Ana,new-members-initial,2025-03-02,5,Sí\n\
r-1,p-1,Ana,transition,2025-03-02,1,true\n"
        );
        let error = ResponseImporter::from_reader(Cursor::new(csv)).expect_err("mixed");
        assert!(matches!(
            error,
            ResponseImportError::InconsistentTemplate { .. }
        ));
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        let error =
            ResponseImporter::from_path("./does-not-exist.csv").expect_err("expected io error");
        assert!(matches!(error, ResponseImportError::Io(_)));
    }
}
