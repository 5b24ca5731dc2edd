use super::answers::AnswerSheet;
use super::questions::NewMemberQuestion;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Detected obstacle to spiritual growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarrierKind {
    CannotPrayOrRead,
    NeedsSupport,
    NeedsBibleHelp,
    WorkConflict,
    DistanceConflict,
    FeelsUncomfortable,
}

impl BarrierKind {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::CannotPrayOrRead,
            Self::NeedsSupport,
            Self::NeedsBibleHelp,
            Self::WorkConflict,
            Self::DistanceConflict,
            Self::FeelsUncomfortable,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::CannotPrayOrRead => "Cannot pray or read the Bible",
            Self::NeedsSupport => "Needs pastoral support",
            Self::NeedsBibleHelp => "Needs help understanding the Bible",
            Self::WorkConflict => "Work or schedule conflict",
            Self::DistanceConflict => "Distance or transport",
            Self::FeelsUncomfortable => "Feels uncomfortable",
        }
    }
}

/// Detected readiness signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    ReadyForDiscipleship,
    ReadyForService,
    NeedsMoreTime,
}

impl WindowKind {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::ReadyForDiscipleship,
            Self::ReadyForService,
            Self::NeedsMoreTime,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ReadyForDiscipleship => "Ready for discipleship",
            Self::ReadyForService => "Ready to serve",
            Self::NeedsMoreTime => "Needs more time",
        }
    }
}

struct KeywordRule<K> {
    kind: K,
    question: NewMemberQuestion,
    keywords: &'static [&'static str],
}

const BARRIER_RULES: &[KeywordRule<BarrierKind>] = &[
    KeywordRule {
        kind: BarrierKind::CannotPrayOrRead,
        question: NewMemberQuestion::DevotionalLife,
        keywords: &["NO SE ORAR", "NO SE LEER"],
    },
    KeywordRule {
        kind: BarrierKind::CannotPrayOrRead,
        question: NewMemberQuestion::Obstacles,
        keywords: &["NO SE ORAR", "NO SE LEER"],
    },
    KeywordRule {
        kind: BarrierKind::NeedsSupport,
        question: NewMemberQuestion::CurrentNeeds,
        keywords: &["APOYO", "ACOMPANAMIENTO"],
    },
    KeywordRule {
        kind: BarrierKind::NeedsBibleHelp,
        question: NewMemberQuestion::CurrentNeeds,
        keywords: &["ENTENDER LA BIBLIA"],
    },
    KeywordRule {
        kind: BarrierKind::NeedsBibleHelp,
        question: NewMemberQuestion::BiblicalUnderstanding,
        keywords: &["NECESITO AYUDA"],
    },
    KeywordRule {
        kind: BarrierKind::WorkConflict,
        question: NewMemberQuestion::Obstacles,
        keywords: &["TRABAJO", "HORARIO"],
    },
    KeywordRule {
        kind: BarrierKind::DistanceConflict,
        question: NewMemberQuestion::Obstacles,
        keywords: &["DISTANCIA", "LEJOS", "TRANSPORTE"],
    },
    KeywordRule {
        kind: BarrierKind::FeelsUncomfortable,
        question: NewMemberQuestion::Obstacles,
        keywords: &["INCOMOD", "NO ME SIENTO PARTE"],
    },
];

const WINDOW_RULES: &[KeywordRule<WindowKind>] = &[
    KeywordRule {
        kind: WindowKind::ReadyForDiscipleship,
        question: NewMemberQuestion::NextStep,
        keywords: &["DISCIPULADO"],
    },
    KeywordRule {
        kind: WindowKind::ReadyForService,
        question: NewMemberQuestion::NextStep,
        keywords: &["SERVIR", "MINISTERIO"],
    },
    KeywordRule {
        kind: WindowKind::NeedsMoreTime,
        question: NewMemberQuestion::NextStep,
        keywords: &["MAS TIEMPO"],
    },
];

const CRISIS_KEYWORDS: &[&str] = &["APOYO ESPIRITUAL", "CRISIS"];
const PEER_KEYWORDS: &[&str] = &["AMIGO", "AMIGA", "COMPANER"];
const BAPTISM_KEYWORDS: &[&str] = &["YA FUI", "QUIERO BAUTIZARME", "DESEO BAUTIZARME"];

fn detect<K: Copy + Ord>(sheet: &AnswerSheet<'_>, rules: &[KeywordRule<K>]) -> BTreeSet<K> {
    rules
        .iter()
        .filter(|rule| sheet.has_any_option(rule.question.code(), rule.keywords))
        .map(|rule| rule.kind)
        .collect()
}

pub fn detect_barriers(sheet: &AnswerSheet<'_>) -> BTreeSet<BarrierKind> {
    detect(sheet, BARRIER_RULES)
}

pub fn detect_windows(sheet: &AnswerSheet<'_>) -> BTreeSet<WindowKind> {
    detect(sheet, WINDOW_RULES)
}

/// Expressed need for spiritual support or an explicit crisis.
pub fn is_crisis_seeker(sheet: &AnswerSheet<'_>) -> bool {
    sheet.has_any_option(NewMemberQuestion::CurrentNeeds.code(), CRISIS_KEYWORDS)
}

/// Invited by a friend or brought by a peer.
pub fn is_relationally_driven(sheet: &AnswerSheet<'_>) -> bool {
    sheet.has_any_option(NewMemberQuestion::ArrivalChannel.code(), PEER_KEYWORDS)
}

pub fn baptism_intent_or_done(sheet: &AnswerSheet<'_>) -> bool {
    let code = NewMemberQuestion::Baptism.code();
    sheet.is_yes(code) || sheet.has_any_option(code, BAPTISM_KEYWORDS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surveys::{Answer, PersonId, ResponseId, SurveyResponse, TemplateId};
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};

    fn response(answers: Vec<(NewMemberQuestion, Value)>) -> SurveyResponse {
        SurveyResponse {
            id: ResponseId("r-1".to_string()),
            person_id: PersonId("p-1".to_string()),
            template_id: TemplateId::new("new-members-initial"),
            answers: answers
                .into_iter()
                .map(|(question, value)| Answer::new(question.code(), value))
                .collect(),
            updated_at: Utc.with_ymd_and_hms(2025, 3, 2, 10, 0, 0).unwrap(),
            score: None,
        }
    }

    #[test]
    fn cannot_pray_is_detected_on_the_devotional_question() {
        let response = response(vec![(NewMemberQuestion::DevotionalLife, json!("No sé orar"))]);
        let barriers = detect_barriers(&AnswerSheet::new(&response));
        assert_eq!(barriers, BTreeSet::from([BarrierKind::CannotPrayOrRead]));
    }

    #[test]
    fn multi_select_obstacles_raise_several_barriers() {
        let response = response(vec![
            (
                NewMemberQuestion::Obstacles,
                json!(["Mi horario de trabajo", "Vivo lejos", "Me siento incómodo"]),
            ),
            (
                NewMemberQuestion::CurrentNeeds,
                json!(["Ayuda para entender la Biblia"]),
            ),
        ]);
        let barriers = detect_barriers(&AnswerSheet::new(&response));
        assert_eq!(
            barriers,
            BTreeSet::from([
                BarrierKind::NeedsBibleHelp,
                BarrierKind::WorkConflict,
                BarrierKind::DistanceConflict,
                BarrierKind::FeelsUncomfortable,
            ])
        );
    }

    #[test]
    fn windows_come_from_the_next_step_question() {
        let response = response(vec![(
            NewMemberQuestion::NextStep,
            json!(["Iniciar un discipulado", "Servir en un ministerio"]),
        )]);
        let windows = detect_windows(&AnswerSheet::new(&response));
        assert_eq!(
            windows,
            BTreeSet::from([WindowKind::ReadyForDiscipleship, WindowKind::ReadyForService])
        );
        assert!(detect_barriers(&AnswerSheet::new(&response)).is_empty());
    }

    #[test]
    fn crisis_and_peer_flags() {
        let response = response(vec![
            (NewMemberQuestion::CurrentNeeds, json!("Acompañamiento en una crisis")),
            (NewMemberQuestion::ArrivalChannel, json!("Me invitó una compañera")),
        ]);
        let sheet = AnswerSheet::new(&response);
        assert!(is_crisis_seeker(&sheet));
        assert!(is_relationally_driven(&sheet));
        assert!(detect_barriers(&sheet).contains(&BarrierKind::NeedsSupport));
    }

    #[test]
    fn baptism_accepts_done_or_intended() {
        for answer in ["Ya fui bautizado", "Quiero bautizarme", "true"] {
            let response = response(vec![(NewMemberQuestion::Baptism, json!(answer))]);
            assert!(baptism_intent_or_done(&AnswerSheet::new(&response)), "{answer}");
        }
        let response = response(vec![(NewMemberQuestion::Baptism, json!("Todavía no"))]);
        assert!(!baptism_intent_or_done(&AnswerSheet::new(&response)));
    }
}
