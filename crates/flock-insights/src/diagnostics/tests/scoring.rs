use super::common::*;
use serde_json::json;

use crate::diagnostics::questions::NewMemberQuestion;
use crate::diagnostics::{BarrierKind, DiagnosticError, ProfileLabel, TemplateSchema, WindowKind};
use crate::surveys::{SurveyTemplate, TemplateCategory, TemplateId, TemplateQuestion};

#[test]
fn thirsty_member_is_classified_a() {
    let engine = engine();
    let profile = engine
        .diagnose(&new_member_response("r-1", "p-1", thirsty_answers()))
        .expect("new-members response diagnoses");

    assert_eq!(profile.sub_scores.experience, 75);
    assert_eq!(profile.sub_scores.growth_feeling, 100);
    assert_eq!(profile.sub_scores.devotional_life, 100);
    assert_eq!(profile.sub_scores.biblical_understanding, 100);
    assert_eq!(profile.foundation_index, 94);
    assert_eq!(profile.commitment_index, 100);
    assert_eq!(profile.profile_label, ProfileLabel::A);
    assert!(profile.has_window(WindowKind::ReadyForDiscipleship));
    assert!(profile.barriers.is_empty());
    assert_eq!(profile.table_version, engine.table_version());
}

#[test]
fn crisis_member_is_classified_c_even_when_relational() {
    let profile = engine()
        .diagnose(&new_member_response("r-2", "p-2", crisis_answers()))
        .expect("diagnoses");

    assert!(profile.is_crisis_seeker);
    assert!(profile.is_relationally_driven);
    assert!(profile.foundation_index < 50);
    assert_eq!(profile.foundation_index, 19);
    assert_eq!(profile.sub_scores.devotional_life, 0);
    assert_eq!(profile.profile_label, ProfileLabel::C);
    for barrier in [
        BarrierKind::CannotPrayOrRead,
        BarrierKind::NeedsSupport,
        BarrierKind::WorkConflict,
        BarrierKind::DistanceConflict,
    ] {
        assert!(profile.has_barrier(barrier), "missing {barrier:?}");
    }
    assert!(profile.has_window(WindowKind::NeedsMoreTime));
}

#[test]
fn relational_member_with_weak_foundation_is_classified_d() {
    let profile = engine()
        .diagnose(&new_member_response("r-3", "p-3", relational_answers()))
        .expect("diagnoses");

    assert_eq!(profile.foundation_index, 38);
    assert_eq!(profile.profile_label, ProfileLabel::D);
    assert!(profile.has_barrier(BarrierKind::NeedsBibleHelp));
}

#[test]
fn explorer_without_life_change_falls_back_to_b() {
    let profile = engine()
        .diagnose(&new_member_response("r-4", "p-4", explorer_answers()))
        .expect("diagnoses");

    assert_eq!(profile.foundation_index, 75);
    assert_eq!(profile.commitment_index, 60);
    assert_eq!(profile.profile_label, ProfileLabel::B);
    assert!(profile.has_window(WindowKind::ReadyForService));
}

#[test]
fn thirsty_answers_win_over_a_crisis_request() {
    let mut answers = thirsty_answers();
    answers.retain(|(question, _)| *question != NewMemberQuestion::CurrentNeeds);
    answers.push((NewMemberQuestion::CurrentNeeds, json!("Apoyo espiritual")));

    let profile = engine()
        .diagnose(&new_member_response("r-5", "p-5", answers))
        .expect("diagnoses");

    assert!(profile.is_crisis_seeker);
    assert_eq!(profile.profile_label, ProfileLabel::A);
}

#[test]
fn diagnosis_is_deterministic() {
    let engine = engine();
    let response = new_member_response("r-6", "p-6", crisis_answers());

    let first = engine.diagnose(&response).expect("diagnoses");
    let second = engine.diagnose(&response).expect("diagnoses");
    assert_eq!(first, second);
    assert_eq!(
        engine.classify(&response).expect("classifies"),
        first.profile_label
    );
    assert_eq!(
        engine.foundation_index(&response).expect("scores"),
        first.foundation_index
    );
}

#[test]
fn empty_response_scores_zero_without_failing() {
    let profile = engine()
        .diagnose(&new_member_response("r-7", "p-7", Vec::new()))
        .expect("missing answers are tolerated");

    assert_eq!(profile.foundation_index, 0);
    assert_eq!(profile.commitment_index, 0);
    assert_eq!(profile.profile_label, ProfileLabel::B);
    assert!(profile.barriers.is_empty());
    assert!(profile.windows.is_empty());
}

#[test]
fn transition_response_is_rejected_by_the_new_member_scorer() {
    let engine = engine();
    let response = transition_response("r-8", "p-8", transition_answers());

    match engine.diagnose(&response) {
        Err(DiagnosticError::WrongSchema {
            expected, found, ..
        }) => {
            assert_eq!(expected, TemplateSchema::NewMembers);
            assert_eq!(found, TemplateSchema::Transition);
        }
        other => panic!("expected wrong schema, got {other:?}"),
    }
}

#[test]
fn transition_indices_follow_fixed_weights() {
    let profile = engine()
        .transition(&transition_response("r-9", "p-9", transition_answers()))
        .expect("transition response scores");

    assert_eq!(profile.indices.hope_index, 50);
    assert_eq!(profile.indices.change_index, 100);
    assert_eq!(profile.indices.trust_index, 62);
}

#[test]
fn unregistered_template_is_reported() {
    let mut response = new_member_response("r-10", "p-10", thirsty_answers());
    response.template_id = TemplateId::new("youth-retreat");

    assert_eq!(
        engine().diagnose(&response),
        Err(DiagnosticError::UnknownTemplate(TemplateId::new(
            "youth-retreat"
        )))
    );
}

#[test]
fn engine_rejects_new_members_template_missing_a_scored_question() {
    let template = SurveyTemplate {
        id: TemplateId::new("new-members-2026"),
        title: "Nuevos miembros 2026".to_string(),
        category: TemplateCategory::NewMembers,
        version: 1,
        questions: NewMemberQuestion::ordered()
            .into_iter()
            .filter(|question| *question != NewMemberQuestion::DevotionalLife)
            .map(|question| TemplateQuestion {
                code: question.code(),
                prompt: question.prompt().to_string(),
            })
            .collect(),
    };

    assert!(crate::diagnostics::DiagnosticEngine::new([&template]).is_err());
}
