use super::answers::AnswerSheet;
use super::classifier::{classify, ClassificationSignals, ProfileLabel};
use super::indices::{commitment_index, foundation_index, transition_indices, TransitionIndices};
use super::questions::NewMemberQuestion;
use super::signals::{
    baptism_intent_or_done, detect_barriers, detect_windows, is_crisis_seeker,
    is_relationally_driven, BarrierKind, WindowKind,
};
use super::subscores::{SubScoreTable, SubScores};
use crate::surveys::{PersonId, ResponseId, SurveyResponse, TemplateId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Per-response diagnosis for the new-members questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticProfile {
    pub response_id: ResponseId,
    pub person_id: PersonId,
    pub template_id: TemplateId,
    pub table_version: u16,
    pub sub_scores: SubScores,
    pub foundation_index: u8,
    pub commitment_index: u8,
    pub changes_since_prior_life: bool,
    pub baptism_intent_or_done: bool,
    pub active_prayer_life: bool,
    pub active_participation: bool,
    pub is_crisis_seeker: bool,
    pub is_relationally_driven: bool,
    pub profile_label: ProfileLabel,
    pub barriers: BTreeSet<BarrierKind>,
    pub windows: BTreeSet<WindowKind>,
}

impl DiagnosticProfile {
    pub fn has_barrier(&self, barrier: BarrierKind) -> bool {
        self.barriers.contains(&barrier)
    }

    pub fn has_window(&self, window: WindowKind) -> bool {
        self.windows.contains(&window)
    }
}

pub(crate) fn diagnose_new_member(
    response: &SurveyResponse,
    table: &SubScoreTable,
) -> DiagnosticProfile {
    let sheet = AnswerSheet::new(response);
    let sub_scores = table.score_response(&sheet);
    let foundation_index = foundation_index(&sub_scores);

    let changes_since_prior_life = sheet.is_yes(NewMemberQuestion::LifeChanges.code());
    let baptism_intent_or_done = baptism_intent_or_done(&sheet);
    let active_participation = sheet.is_yes(NewMemberQuestion::Participation.code());
    let active_prayer_life = sub_scores.devotional_life >= 75;
    let is_crisis_seeker = is_crisis_seeker(&sheet);
    let is_relationally_driven = is_relationally_driven(&sheet);

    let profile_label = classify(&ClassificationSignals {
        growth_feeling: sub_scores.growth_feeling,
        devotional_life: sub_scores.devotional_life,
        foundation_index,
        changes_since_prior_life,
        baptism_intent_or_done,
        is_crisis_seeker,
        is_relationally_driven,
    });

    DiagnosticProfile {
        response_id: response.id.clone(),
        person_id: response.person_id.clone(),
        template_id: response.template_id.clone(),
        table_version: table.version(),
        sub_scores,
        foundation_index,
        commitment_index: commitment_index(
            baptism_intent_or_done,
            active_participation,
            sub_scores.devotional_life,
        ),
        changes_since_prior_life,
        baptism_intent_or_done,
        active_prayer_life,
        active_participation,
        is_crisis_seeker,
        is_relationally_driven,
        profile_label,
        barriers: detect_barriers(&sheet),
        windows: detect_windows(&sheet),
    }
}

/// Per-response indices for the transition questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionProfile {
    pub response_id: ResponseId,
    pub person_id: PersonId,
    pub template_id: TemplateId,
    #[serde(flatten)]
    pub indices: TransitionIndices,
}

pub(crate) fn diagnose_transition(response: &SurveyResponse) -> TransitionProfile {
    TransitionProfile {
        response_id: response.id.clone(),
        person_id: response.person_id.clone(),
        template_id: response.template_id.clone(),
        indices: transition_indices(&AnswerSheet::new(response)),
    }
}
