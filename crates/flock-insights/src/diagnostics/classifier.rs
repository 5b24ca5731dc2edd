use serde::{Deserialize, Serialize};

/// Discipleship-readiness profile. Exactly one label is assigned per response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProfileLabel {
    A,
    B,
    C,
    D,
}

impl ProfileLabel {
    pub const fn ordered() -> [Self; 4] {
        [Self::A, Self::B, Self::C, Self::D]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "Spiritually Thirsty",
            Self::B => "Cautious Explorer",
            Self::C => "Crisis Seeker",
            Self::D => "Relationally Driven",
        }
    }
}

/// Signals the classifier reads from one diagnosed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationSignals {
    pub growth_feeling: u8,
    pub devotional_life: u8,
    pub foundation_index: u8,
    pub changes_since_prior_life: bool,
    pub baptism_intent_or_done: bool,
    pub is_crisis_seeker: bool,
    pub is_relationally_driven: bool,
}

/// Applies the profile rules in fixed precedence: A, then C, then D, falling back to B.
///
/// A response can satisfy several predicates at once; the order decides which label wins and
/// must not change.
pub fn classify(signals: &ClassificationSignals) -> ProfileLabel {
    if signals.growth_feeling == 100
        && signals.changes_since_prior_life
        && signals.devotional_life >= 75
        && signals.baptism_intent_or_done
    {
        return ProfileLabel::A;
    }

    if signals.is_crisis_seeker {
        return ProfileLabel::C;
    }

    if signals.is_relationally_driven && signals.foundation_index < 50 {
        return ProfileLabel::D;
    }

    ProfileLabel::B
}
