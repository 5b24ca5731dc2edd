use super::classifier::ProfileLabel;
use super::profile::DiagnosticProfile;
use super::signals::{BarrierKind, WindowKind};
use super::thresholds::HealthStatus;
use crate::surveys::Person;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Human-facing title, description, and icon for a profile label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfileCard {
    pub label: ProfileLabel,
    pub title: &'static str,
    pub description: &'static str,
    pub icon_key: &'static str,
}

impl ProfileLabel {
    pub const fn card(self) -> ProfileCard {
        match self {
            Self::A => ProfileCard {
                label: self,
                title: "Spiritually Thirsty",
                description: "Growing, praying often, and committed to baptism. Ready to be \
                              discipled intentionally.",
                icon_key: "droplet",
            },
            Self::B => ProfileCard {
                label: self,
                title: "Cautious Explorer",
                description: "Interested but still observing. Responds best to patient, \
                              low-pressure follow-up.",
                icon_key: "compass",
            },
            Self::C => ProfileCard {
                label: self,
                title: "Crisis Seeker",
                description: "Arrived looking for help in a difficult season. Needs pastoral \
                              care before a growth plan.",
                icon_key: "lifebuoy",
            },
            Self::D => ProfileCard {
                label: self,
                title: "Relationally Driven",
                description: "Came through a friend and has a weak foundation yet. Grows best \
                              inside a relationship.",
                icon_key: "users",
            },
        }
    }

    const fn primary_actions(self) -> &'static [&'static str] {
        match self {
            Self::A => &[
                "Assign a discipleship mentor within two weeks",
                "Confirm a date for the next baptism class",
            ],
            Self::B => &[
                "Send welcome material and invite to the newcomers' lunch",
                "Follow up monthly without pressure",
            ],
            Self::C => &[
                "Schedule a pastoral care visit this week",
                "Add to the prayer team's follow-up list",
            ],
            Self::D => &[
                "Invite to a small group together with the friend who invited them",
                "Enroll in the foundations course",
            ],
        }
    }
}

impl BarrierKind {
    const fn action(self) -> &'static str {
        match self {
            Self::CannotPrayOrRead => "Teach a guided prayer and Bible reading plan",
            Self::NeedsSupport => "Pair with a care leader for regular check-ins",
            Self::NeedsBibleHelp => "Enroll in the introductory Bible study",
            Self::WorkConflict => "Offer an online or alternative-schedule group",
            Self::DistanceConflict => "Connect with a home group near where they live",
            Self::FeelsUncomfortable => "Assign a welcome host for the next few services",
        }
    }
}

impl WindowKind {
    const fn action(self) -> &'static str {
        match self {
            Self::ReadyForDiscipleship => "Open a one-on-one discipleship track",
            Self::ReadyForService => "Introduce them to ministry leaders to explore serving",
            Self::NeedsMoreTime => "Respect their pace and revisit in 60 days",
        }
    }
}

/// Ordered, de-duplicated follow-up actions for one diagnosed person.
pub fn recommended_actions(profile: &DiagnosticProfile) -> Vec<String> {
    let mut actions: Vec<String> = Vec::new();
    let mut push = |action: &str| {
        if !actions.iter().any(|existing| existing == action) {
            actions.push(action.to_string());
        }
    };

    for action in profile.profile_label.primary_actions() {
        push(*action);
    }
    for barrier in &profile.barriers {
        push(barrier.action());
    }
    for window in &profile.windows {
        push(window.action());
    }

    actions
}

/// Printable report for one person. `has_data` is false when the person has no scored
/// response; every derived field is then empty rather than zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndividualReport {
    pub person: Person,
    pub has_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<DiagnosticProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<ProfileCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foundation_health: Option<HealthStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommended_actions: Vec<String>,
}

impl IndividualReport {
    pub fn no_data(person: Person) -> Self {
        Self {
            person,
            has_data: false,
            completed_at: None,
            profile: None,
            card: None,
            foundation_health: None,
            observations: vec!["Insufficient data: no completed new-members survey".to_string()],
            recommended_actions: Vec::new(),
        }
    }

    pub(crate) fn from_profile(
        person: Person,
        completed_at: DateTime<Utc>,
        profile: DiagnosticProfile,
    ) -> Self {
        let foundation_health = HealthStatus::from_index(profile.foundation_index);
        let observations = observations(&profile, foundation_health);
        let recommended_actions = recommended_actions(&profile);

        Self {
            person,
            has_data: true,
            completed_at: Some(completed_at),
            card: Some(profile.profile_label.card()),
            foundation_health: Some(foundation_health),
            profile: Some(profile),
            observations,
            recommended_actions,
        }
    }
}

fn observations(profile: &DiagnosticProfile, health: HealthStatus) -> Vec<String> {
    let mut observations = vec![format!(
        "Foundation index {} ({})",
        profile.foundation_index,
        health.label()
    )];

    observations.push(format!("Commitment index {}", profile.commitment_index));

    if profile.changes_since_prior_life {
        observations.push("Reports changes since their previous way of life".to_string());
    }
    if profile.active_prayer_life {
        observations.push("Prays or reads the Bible most days".to_string());
    }
    if !profile.barriers.is_empty() {
        let labels: Vec<&str> = profile.barriers.iter().map(|barrier| barrier.label()).collect();
        observations.push(format!("Barriers: {}", labels.join(", ")));
    }
    if !profile.windows.is_empty() {
        let labels: Vec<&str> = profile.windows.iter().map(|window| window.label()).collect();
        observations.push(format!("Open windows: {}", labels.join(", ")));
    }

    observations
}
