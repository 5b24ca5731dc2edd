use super::answers::AnswerSheet;
use super::questions::TransitionQuestion;
use super::subscores::SubScores;
use serde::{Deserialize, Serialize};

/// Mean of the four foundation sub-scores, rounded half away from zero.
pub fn foundation_index(scores: &SubScores) -> u8 {
    let values = scores.values();
    let total: u32 = values.iter().map(|value| u32::from(*value)).sum();
    rounded(f64::from(total) / values.len() as f64)
}

/// 40 for baptism intent, 30 for active participation, 30 for a devotional sub-score of 75+.
pub fn commitment_index(
    baptism_intent_or_done: bool,
    active_participation: bool,
    devotional_life: u8,
) -> u8 {
    let mut index = 0;
    if baptism_intent_or_done {
        index += 40;
    }
    if active_participation {
        index += 30;
    }
    if devotional_life >= 75 {
        index += 30;
    }
    index
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransitionIndices {
    pub hope_index: u8,
    pub change_index: u8,
    pub trust_index: u8,
}

const HOPE_WEIGHTS: [(TransitionQuestion, f64); 2] = [
    (TransitionQuestion::Optimism, 50.0),
    (TransitionQuestion::ThingsWillBeFine, 50.0),
];

const CHANGE_WEIGHTS: [(TransitionQuestion, f64); 2] = [
    (TransitionQuestion::UnderstandsReasons, 50.0),
    (TransitionQuestion::SupportsDirection, 50.0),
];

const TRUST_LIKERT_WEIGHT: f64 = 40.0;
const TRUST_WEIGHTS: [(TransitionQuestion, f64); 2] = [
    (TransitionQuestion::Transparency, 30.0),
    (TransitionQuestion::Confidence, 30.0),
];

pub fn transition_indices(sheet: &AnswerSheet<'_>) -> TransitionIndices {
    let hope = weighted_yes(sheet, &HOPE_WEIGHTS);
    let change = weighted_yes(sheet, &CHANGE_WEIGHTS);

    let likert = likert_score(&sheet.answer(TransitionQuestion::LeadershipTrust.code()));
    let trust = TRUST_LIKERT_WEIGHT * (f64::from(likert) / 5.0) + weighted_yes(sheet, &TRUST_WEIGHTS);

    TransitionIndices {
        hope_index: rounded(hope),
        change_index: rounded(change),
        trust_index: rounded(trust),
    }
}

fn weighted_yes(sheet: &AnswerSheet<'_>, weights: &[(TransitionQuestion, f64)]) -> f64 {
    weights
        .iter()
        .filter(|(question, _)| sheet.is_yes(question.code()))
        .map(|(_, weight)| weight)
        .sum()
}

/// Leading 1–5 rating of a Likert answer ("4", "4 - De acuerdo"); anything else is 0.
fn likert_score(answer: &str) -> u8 {
    answer
        .trim()
        .chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .filter(|digit| (1..=5).contains(digit))
        .map(|digit| digit as u8)
        .unwrap_or(0)
}

/// Cohort mean of per-response indices; `None` when there is nothing to average.
pub fn mean_index<I>(values: I) -> Option<u8>
where
    I: IntoIterator<Item = u8>,
{
    let (count, total) = values
        .into_iter()
        .fold((0u32, 0u64), |(count, total), value| {
            (count + 1, total + u64::from(value))
        });
    mean_from_totals(total, count as usize)
}

pub(crate) fn mean_from_totals(total: u64, count: usize) -> Option<u8> {
    if count == 0 {
        None
    } else {
        Some(rounded(total as f64 / count as f64))
    }
}

fn rounded(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
