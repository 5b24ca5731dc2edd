use super::alerts::cohort_alerts;
use super::views::{CohortSummary, NewMemberCohort, ShareEntry, TransitionCohort};
use super::TemplateFilter;
use crate::diagnostics::classifier::ProfileLabel;
use crate::diagnostics::indices::mean_from_totals;
use crate::diagnostics::profile::{DiagnosticProfile, TransitionProfile};
use crate::diagnostics::signals::{BarrierKind, WindowKind};
use crate::diagnostics::thresholds::{HealthStatus, HEALTHY_INDEX};
use std::collections::BTreeMap;

/// `round(100 * matching / total)`, or `None` when there is nothing to divide by.
pub fn percentage(matching: usize, total: usize) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let pct = (matching as f64 * 100.0 / total as f64).round();
    Some(pct.clamp(0.0, 100.0) as u8)
}

/// Running counts and sums. Only commutative updates are applied, so the resulting summary
/// does not depend on the order responses are folded in.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct CohortTally {
    new_members: usize,
    foundation_total: u64,
    foundation_solid: usize,
    commitment_total: u64,
    changes_since_prior_life: usize,
    baptism_intent_or_done: usize,
    active_prayer_life: usize,
    active_participation: usize,
    crisis_seekers: usize,
    relationally_driven: usize,
    profiles: BTreeMap<ProfileLabel, usize>,
    barriers: BTreeMap<BarrierKind, usize>,
    windows: BTreeMap<WindowKind, usize>,
    transitions: usize,
    hope_total: u64,
    change_total: u64,
    trust_total: u64,
}

impl CohortTally {
    pub(crate) fn add_profile(&mut self, profile: &DiagnosticProfile) {
        self.new_members += 1;
        self.foundation_total += u64::from(profile.foundation_index);
        self.commitment_total += u64::from(profile.commitment_index);
        if profile.foundation_index >= HEALTHY_INDEX {
            self.foundation_solid += 1;
        }

        let flags = [
            (profile.changes_since_prior_life, &mut self.changes_since_prior_life),
            (profile.baptism_intent_or_done, &mut self.baptism_intent_or_done),
            (profile.active_prayer_life, &mut self.active_prayer_life),
            (profile.active_participation, &mut self.active_participation),
            (profile.is_crisis_seeker, &mut self.crisis_seekers),
            (profile.is_relationally_driven, &mut self.relationally_driven),
        ];
        for (set, counter) in flags {
            if set {
                *counter += 1;
            }
        }

        *self.profiles.entry(profile.profile_label).or_default() += 1;
        for barrier in &profile.barriers {
            *self.barriers.entry(*barrier).or_default() += 1;
        }
        for window in &profile.windows {
            *self.windows.entry(*window).or_default() += 1;
        }
    }

    pub(crate) fn add_transition(&mut self, profile: &TransitionProfile) {
        self.transitions += 1;
        self.hope_total += u64::from(profile.indices.hope_index);
        self.change_total += u64::from(profile.indices.change_index);
        self.trust_total += u64::from(profile.indices.trust_index);
    }

    pub(crate) fn total_responses(&self) -> usize {
        self.new_members + self.transitions
    }

    pub(crate) fn into_summary(self, filter: &TemplateFilter) -> CohortSummary {
        let total = self.new_members;
        let share = |count: usize| percentage(count, total);

        let foundation_index = mean_from_totals(self.foundation_total, total);
        let new_members = NewMemberCohort {
            responses: total,
            foundation_index,
            foundation_health: foundation_index.map(HealthStatus::from_index),
            foundation_solid_pct: share(self.foundation_solid),
            commitment_index: mean_from_totals(self.commitment_total, total),
            changes_since_prior_life_pct: share(self.changes_since_prior_life),
            baptism_intent_or_done_pct: share(self.baptism_intent_or_done),
            active_prayer_life_pct: share(self.active_prayer_life),
            active_participation_pct: share(self.active_participation),
            crisis_seeker_pct: share(self.crisis_seekers),
            relationally_driven_pct: share(self.relationally_driven),
            profiles: share_entries(&self.profiles, ProfileLabel::ordered(), ProfileLabel::label, total),
            barriers: share_entries(&self.barriers, BarrierKind::ordered(), BarrierKind::label, total),
            windows: share_entries(&self.windows, WindowKind::ordered(), WindowKind::label, total),
        };

        let trust_index = mean_from_totals(self.trust_total, self.transitions);
        let transition = TransitionCohort {
            responses: self.transitions,
            hope_index: mean_from_totals(self.hope_total, self.transitions),
            change_index: mean_from_totals(self.change_total, self.transitions),
            trust_index,
            trust_health: trust_index.map(HealthStatus::from_index),
        };

        let alerts = cohort_alerts(&new_members, &transition);
        let total_responses = new_members.responses + transition.responses;

        CohortSummary {
            template_ids: filter.template_ids(),
            has_data: total_responses > 0,
            total_responses,
            new_members,
            transition,
            alerts,
        }
    }
}

fn share_entries<K, const N: usize>(
    counts: &BTreeMap<K, usize>,
    ordered: [K; N],
    label: fn(K) -> &'static str,
    total: usize,
) -> Vec<ShareEntry<K>>
where
    K: Copy + Ord,
{
    ordered
        .into_iter()
        .map(|key| {
            let count = counts.get(&key).copied().unwrap_or(0);
            ShareEntry {
                key,
                label: label(key),
                count,
                pct: percentage(count, total),
            }
        })
        .collect()
}
