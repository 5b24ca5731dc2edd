use super::alerts::CohortAlert;
use crate::diagnostics::classifier::ProfileLabel;
use crate::diagnostics::signals::{BarrierKind, WindowKind};
use crate::diagnostics::thresholds::HealthStatus;
use crate::surveys::TemplateId;
use serde::Serialize;

/// Count and share of a cohort carrying one label, barrier, or window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareEntry<K> {
    pub key: K,
    pub label: &'static str,
    pub count: usize,
    pub pct: Option<u8>,
}

/// Aggregates over the new-members responses of a cohort. Every `Option` is `None` when the
/// cohort holds no such responses, which is distinct from a computed 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMemberCohort {
    pub responses: usize,
    pub foundation_index: Option<u8>,
    pub foundation_health: Option<HealthStatus>,
    pub foundation_solid_pct: Option<u8>,
    pub commitment_index: Option<u8>,
    pub changes_since_prior_life_pct: Option<u8>,
    pub baptism_intent_or_done_pct: Option<u8>,
    pub active_prayer_life_pct: Option<u8>,
    pub active_participation_pct: Option<u8>,
    pub crisis_seeker_pct: Option<u8>,
    pub relationally_driven_pct: Option<u8>,
    pub profiles: Vec<ShareEntry<ProfileLabel>>,
    pub barriers: Vec<ShareEntry<BarrierKind>>,
    pub windows: Vec<ShareEntry<WindowKind>>,
}

impl NewMemberCohort {
    pub fn profile(&self, label: ProfileLabel) -> Option<&ShareEntry<ProfileLabel>> {
        self.profiles.iter().find(|entry| entry.key == label)
    }

    pub fn barrier(&self, barrier: BarrierKind) -> Option<&ShareEntry<BarrierKind>> {
        self.barriers.iter().find(|entry| entry.key == barrier)
    }

    pub fn window(&self, window: WindowKind) -> Option<&ShareEntry<WindowKind>> {
        self.windows.iter().find(|entry| entry.key == window)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionCohort {
    pub responses: usize,
    pub hope_index: Option<u8>,
    pub change_index: Option<u8>,
    pub trust_index: Option<u8>,
    pub trust_health: Option<HealthStatus>,
}

/// Dashboard-facing statistics for one template filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CohortSummary {
    /// Empty when the filter covers every template.
    pub template_ids: Vec<TemplateId>,
    pub has_data: bool,
    pub total_responses: usize,
    pub new_members: NewMemberCohort,
    pub transition: TransitionCohort,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alerts: Vec<CohortAlert>,
}
