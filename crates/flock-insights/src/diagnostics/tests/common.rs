use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use crate::diagnostics::questions::{NewMemberQuestion, TransitionQuestion};
use crate::diagnostics::store::{InMemoryResponseStore, ResponseStore, StoreError};
use crate::diagnostics::{DiagnosticEngine, DiagnosticsService};
use crate::surveys::{
    Answer, ImportedDataset, Person, PersonId, ResponseId, SurveyResponse, TemplateId,
    NEW_MEMBERS_TEMPLATE_ID, TRANSITION_TEMPLATE_ID,
};

pub(super) fn engine() -> DiagnosticEngine {
    DiagnosticEngine::standard().expect("built-in templates bind")
}

pub(super) fn completed_on(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, 10, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn person(id: &str, name: &str) -> Person {
    Person {
        id: PersonId(id.to_string()),
        display_name: name.to_string(),
    }
}

pub(super) fn new_member_response(
    id: &str,
    person_id: &str,
    answers: Vec<(NewMemberQuestion, Value)>,
) -> SurveyResponse {
    SurveyResponse {
        id: ResponseId(id.to_string()),
        person_id: PersonId(person_id.to_string()),
        template_id: TemplateId::new(NEW_MEMBERS_TEMPLATE_ID),
        answers: answers
            .into_iter()
            .map(|(question, value)| Answer::new(question.code(), value))
            .collect(),
        updated_at: completed_on(2),
        score: None,
    }
}

pub(super) fn transition_response(
    id: &str,
    person_id: &str,
    answers: Vec<(TransitionQuestion, Value)>,
) -> SurveyResponse {
    SurveyResponse {
        id: ResponseId(id.to_string()),
        person_id: PersonId(person_id.to_string()),
        template_id: TemplateId::new(TRANSITION_TEMPLATE_ID),
        answers: answers
            .into_iter()
            .map(|(question, value)| Answer::new(question.code(), value))
            .collect(),
        updated_at: completed_on(9),
        score: None,
    }
}

/// Growing, praying daily, baptized. Foundation (75 + 100 + 100 + 100) / 4 = 94.
pub(super) fn thirsty_answers() -> Vec<(NewMemberQuestion, Value)> {
    vec![
        (NewMemberQuestion::PriorExperience, json!("Asistía a otra iglesia")),
        (NewMemberQuestion::ArrivalChannel, json!("Redes sociales")),
        (NewMemberQuestion::LifeChanges, json!("Sí")),
        (NewMemberQuestion::GrowthFeeling, json!(true)),
        (NewMemberQuestion::DevotionalLife, json!("Casi todos los días")),
        (NewMemberQuestion::BiblicalUnderstanding, json!("Entiendo la mayor parte")),
        (NewMemberQuestion::Baptism, json!("Ya fui bautizado")),
        (NewMemberQuestion::Participation, json!("Sí")),
        (NewMemberQuestion::CurrentNeeds, json!("Crecer en la fe")),
        (NewMemberQuestion::Obstacles, json!("Ninguno")),
        (NewMemberQuestion::NextStep, json!("Quiero iniciar discipulado")),
    ]
}

/// Looking for help, invited by a friend. Foundation (0 + 50 + 0 + 25) / 4 = 19.
pub(super) fn crisis_answers() -> Vec<(NewMemberQuestion, Value)> {
    vec![
        (NewMemberQuestion::PriorExperience, json!("Nunca había ido")),
        (NewMemberQuestion::ArrivalChannel, json!("Me invitó un amigo")),
        (NewMemberQuestion::LifeChanges, json!("No")),
        (NewMemberQuestion::GrowthFeeling, json!("No sé")),
        (NewMemberQuestion::DevotionalLife, json!("No sé orar")),
        (NewMemberQuestion::BiblicalUnderstanding, json!("Me cuesta entenderla")),
        (NewMemberQuestion::Baptism, json!("No")),
        (NewMemberQuestion::Participation, json!("No")),
        (NewMemberQuestion::CurrentNeeds, json!("Apoyo espiritual")),
        (NewMemberQuestion::Obstacles, json!(["Trabajo", "Distancia"])),
        (NewMemberQuestion::NextStep, json!("Necesito más tiempo")),
    ]
}

/// Came with a friend, weak foundation. Foundation (25 + 50 + 50 + 25) / 4 = 38.
pub(super) fn relational_answers() -> Vec<(NewMemberQuestion, Value)> {
    vec![
        (NewMemberQuestion::PriorExperience, json!("Un poco")),
        (NewMemberQuestion::ArrivalChannel, json!("Vine con una amiga")),
        (NewMemberQuestion::LifeChanges, json!("No")),
        (NewMemberQuestion::GrowthFeeling, json!("No sé")),
        (NewMemberQuestion::DevotionalLife, json!("Ocasionalmente")),
        (NewMemberQuestion::BiblicalUnderstanding, json!("Me cuesta")),
        (NewMemberQuestion::Baptism, json!("Todavía no")),
        (NewMemberQuestion::Participation, json!("No")),
        (NewMemberQuestion::CurrentNeeds, json!("Entender la Biblia")),
        (NewMemberQuestion::Obstacles, json!("")),
        (NewMemberQuestion::NextStep, json!("")),
    ]
}

/// Interested but no life change reported. Foundation (50 + 100 + 75 + 75) / 4 = 75.
pub(super) fn explorer_answers() -> Vec<(NewMemberQuestion, Value)> {
    vec![
        (NewMemberQuestion::PriorExperience, json!("Solía leer la Biblia")),
        (NewMemberQuestion::ArrivalChannel, json!("Pasaba por aquí")),
        (NewMemberQuestion::LifeChanges, json!("No")),
        (NewMemberQuestion::GrowthFeeling, json!("TRUE")),
        (NewMemberQuestion::DevotionalLife, json!("Algunos días")),
        (NewMemberQuestion::BiblicalUnderstanding, json!("Entiendo una parte")),
        (NewMemberQuestion::Baptism, json!("Todavía no")),
        (NewMemberQuestion::Participation, json!("Sí")),
        (NewMemberQuestion::NextStep, json!("Quiero servir")),
    ]
}

/// Hope 50, change 100, trust 40 * 4/5 + 30 = 62.
pub(super) fn transition_answers() -> Vec<(TransitionQuestion, Value)> {
    vec![
        (TransitionQuestion::Optimism, json!("Sí")),
        (TransitionQuestion::ThingsWillBeFine, json!("No")),
        (TransitionQuestion::UnderstandsReasons, json!("Sí")),
        (TransitionQuestion::SupportsDirection, json!(true)),
        (TransitionQuestion::LeadershipTrust, json!("4 - De acuerdo")),
        (TransitionQuestion::Transparency, json!("Sí")),
        (TransitionQuestion::Confidence, json!("No")),
    ]
}

pub(super) fn cohort_responses() -> Vec<SurveyResponse> {
    vec![
        new_member_response("r-thirsty", "p-ana", thirsty_answers()),
        new_member_response("r-crisis", "p-luis", crisis_answers()),
        new_member_response("r-relational", "p-marta", relational_answers()),
    ]
}

pub(super) fn seeded_store() -> InMemoryResponseStore {
    let mut responses = cohort_responses();
    responses.push(transition_response("r-transition", "p-ana", transition_answers()));

    InMemoryResponseStore::from_dataset(ImportedDataset {
        people: vec![
            person("p-ana", "Ana Torres"),
            person("p-luis", "Luis Pérez"),
            person("p-marta", "Marta Gómez"),
            person("p-nadia", "Nadia Ruiz"),
        ],
        responses,
    })
}

pub(super) fn build_service() -> Arc<DiagnosticsService<InMemoryResponseStore>> {
    Arc::new(DiagnosticsService::new(
        Arc::new(engine()),
        Arc::new(seeded_store()),
    ))
}

#[derive(Default)]
pub(super) struct UnavailableStore;

impl ResponseStore for UnavailableStore {
    fn responses(&self) -> Result<Vec<SurveyResponse>, StoreError> {
        Err(StoreError::Unavailable("database offline".into()))
    }

    fn response(&self, _id: &ResponseId) -> Result<Option<SurveyResponse>, StoreError> {
        Err(StoreError::Unavailable("database offline".into()))
    }

    fn person(&self, _id: &PersonId) -> Result<Option<Person>, StoreError> {
        Err(StoreError::Unavailable("database offline".into()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
