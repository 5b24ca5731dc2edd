//! The single versioned sub-score table shared by every caller.

use super::answers::{contains_phrase, normalize, AnswerSheet};
use super::questions::NewMemberQuestion;
use crate::surveys::QuestionCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubScoreKind {
    Experience,
    GrowthFeeling,
    DevotionalLife,
    BiblicalUnderstanding,
}

impl SubScoreKind {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Experience,
            Self::GrowthFeeling,
            Self::DevotionalLife,
            Self::BiblicalUnderstanding,
        ]
    }

    pub const fn question(self) -> NewMemberQuestion {
        match self {
            Self::Experience => NewMemberQuestion::PriorExperience,
            Self::GrowthFeeling => NewMemberQuestion::GrowthFeeling,
            Self::DevotionalLife => NewMemberQuestion::DevotionalLife,
            Self::BiblicalUnderstanding => NewMemberQuestion::BiblicalUnderstanding,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Experience => "Prior Experience",
            Self::GrowthFeeling => "Growth Feeling",
            Self::DevotionalLife => "Devotional Life",
            Self::BiblicalUnderstanding => "Biblical Understanding",
        }
    }
}

/// Pattern compared against the normalized answer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPattern {
    Exact(&'static str),
    /// Whole words or phrases only; "NO SE" does not match "NO SENTI".
    Phrase(&'static str),
}

impl MatchPattern {
    fn matches(self, normalized: &str) -> bool {
        match self {
            MatchPattern::Exact(expected) => normalized == expected,
            MatchPattern::Phrase(needle) => contains_phrase(normalized, needle),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Band {
    pub pattern: MatchPattern,
    pub value: u8,
}

#[derive(Debug)]
pub struct SubScoreRule {
    pub kind: SubScoreKind,
    pub bands: &'static [Band],
}

/// Ordered bands per question; evaluated top to bottom, first match wins, default 0.
#[derive(Debug)]
pub struct SubScoreTable {
    version: u16,
    rules: &'static [SubScoreRule],
}

pub static SUB_SCORE_TABLE_V1: SubScoreTable = SubScoreTable {
    version: 1,
    rules: &[
        SubScoreRule {
            kind: SubScoreKind::Experience,
            bands: &[
                Band {
                    pattern: MatchPattern::Phrase("ASISTIA"),
                    value: 75,
                },
                Band {
                    pattern: MatchPattern::Phrase("SOLIA LEER"),
                    value: 50,
                },
                Band {
                    pattern: MatchPattern::Phrase("UN POCO"),
                    value: 25,
                },
            ],
        },
        SubScoreRule {
            kind: SubScoreKind::GrowthFeeling,
            bands: &[
                Band {
                    pattern: MatchPattern::Exact("TRUE"),
                    value: 100,
                },
                Band {
                    pattern: MatchPattern::Phrase("NO SE"),
                    value: 50,
                },
            ],
        },
        SubScoreRule {
            kind: SubScoreKind::DevotionalLife,
            bands: &[
                Band {
                    pattern: MatchPattern::Phrase("CASI TODOS LOS DIAS"),
                    value: 100,
                },
                Band {
                    pattern: MatchPattern::Phrase("ALGUNOS DIAS"),
                    value: 75,
                },
                Band {
                    pattern: MatchPattern::Phrase("OCASIONALMENTE"),
                    value: 50,
                },
                Band {
                    pattern: MatchPattern::Phrase("SOLO"),
                    value: 25,
                },
            ],
        },
        SubScoreRule {
            kind: SubScoreKind::BiblicalUnderstanding,
            bands: &[
                Band {
                    pattern: MatchPattern::Phrase("LA MAYOR PARTE"),
                    value: 100,
                },
                Band {
                    pattern: MatchPattern::Phrase("UNA PARTE"),
                    value: 75,
                },
                Band {
                    pattern: MatchPattern::Phrase("ME CUESTA"),
                    value: 25,
                },
            ],
        },
    ],
};

impl SubScoreTable {
    pub fn current() -> &'static SubScoreTable {
        &SUB_SCORE_TABLE_V1
    }

    pub fn version(&self) -> u16 {
        self.version
    }

    /// Sub-score for one answer; codes without a rule score 0.
    pub fn score(&self, code: QuestionCode, answer_text: &str) -> u8 {
        let Some(rule) = self
            .rules
            .iter()
            .find(|rule| rule.kind.question().code() == code)
        else {
            return 0;
        };

        let normalized = normalize(answer_text);
        rule.bands
            .iter()
            .find(|band| band.pattern.matches(&normalized))
            .map(|band| band.value)
            .unwrap_or(0)
    }

    pub fn score_kind(&self, kind: SubScoreKind, sheet: &AnswerSheet<'_>) -> u8 {
        let code = kind.question().code();
        self.score(code, &sheet.answer(code))
    }

    pub fn score_response(&self, sheet: &AnswerSheet<'_>) -> SubScores {
        SubScores {
            experience: self.score_kind(SubScoreKind::Experience, sheet),
            growth_feeling: self.score_kind(SubScoreKind::GrowthFeeling, sheet),
            devotional_life: self.score_kind(SubScoreKind::DevotionalLife, sheet),
            biblical_understanding: self.score_kind(SubScoreKind::BiblicalUnderstanding, sheet),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubScores {
    pub experience: u8,
    pub growth_feeling: u8,
    pub devotional_life: u8,
    pub biblical_understanding: u8,
}

impl SubScores {
    pub fn get(&self, kind: SubScoreKind) -> u8 {
        match kind {
            SubScoreKind::Experience => self.experience,
            SubScoreKind::GrowthFeeling => self.growth_feeling,
            SubScoreKind::DevotionalLife => self.devotional_life,
            SubScoreKind::BiblicalUnderstanding => self.biblical_understanding,
        }
    }

    pub fn values(&self) -> [u8; 4] {
        SubScoreKind::ordered().map(|kind| self.get(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(question: NewMemberQuestion, answer: &str) -> u8 {
        SubScoreTable::current().score(question.code(), answer)
    }

    #[test]
    fn prior_experience_bands() {
        let q = NewMemberQuestion::PriorExperience;
        assert_eq!(score(q, "Sí, asistía a otra iglesia"), 75);
        assert_eq!(score(q, "Solía leer la Biblia"), 50);
        assert_eq!(score(q, "Un poco"), 25);
        assert_eq!(score(q, "Nunca"), 0);
    }

    #[test]
    fn growth_feeling_requires_exact_true() {
        let q = NewMemberQuestion::GrowthFeeling;
        assert_eq!(score(q, "true"), 100);
        assert_eq!(score(q, "true, creo"), 0);
        assert_eq!(score(q, "No sé"), 50);
        assert_eq!(score(q, "No sé todavía"), 50);
        assert_eq!(score(q, "No sentí cambios"), 0);
        assert_eq!(score(q, "No sentí ningún cambio"), 0);
        assert_eq!(score(q, "false"), 0);
    }

    #[test]
    fn devotional_life_bands_are_first_match_wins() {
        let q = NewMemberQuestion::DevotionalLife;
        assert_eq!(score(q, "Casi todos los días"), 100);
        assert_eq!(score(q, "Algunos días de la semana"), 75);
        assert_eq!(score(q, "Ocasionalmente"), 50);
        assert_eq!(score(q, "Solo los domingos"), 25);
        assert_eq!(score(q, "No sé orar"), 0);
    }

    #[test]
    fn biblical_understanding_bands() {
        let q = NewMemberQuestion::BiblicalUnderstanding;
        assert_eq!(score(q, "Entiendo la mayor parte"), 100);
        assert_eq!(score(q, "Entiendo una parte"), 75);
        assert_eq!(score(q, "Me cuesta entenderla"), 25);
        assert_eq!(score(q, ""), 0);
    }

    #[test]
    fn unscored_codes_default_to_zero() {
        assert_eq!(
            SubScoreTable::current().score(NewMemberQuestion::Baptism.code(), "Casi todos los días"),
            0
        );
        assert_eq!(SubScoreTable::current().score(QuestionCode(999), "true"), 0);
    }
}
