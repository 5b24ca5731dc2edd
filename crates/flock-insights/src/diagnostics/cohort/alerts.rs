use super::views::{NewMemberCohort, TransitionCohort};
use crate::diagnostics::signals::BarrierKind;
use crate::diagnostics::thresholds::{
    HealthStatus, BARRIER_ALERT_PCT, CRISIS_SEEKER_ALERT_PCT,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Warning,
    Critical,
}

impl AlertSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "barrier")]
pub enum AlertKind {
    WeakFoundation,
    CrisisSeekers,
    Barrier(BarrierKind),
    LowTrust,
    LowHope,
}

/// Banner shown above the dashboard when a cohort crosses a published threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CohortAlert {
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub severity_label: &'static str,
    pub message: String,
}

impl CohortAlert {
    fn new(kind: AlertKind, severity: AlertSeverity, message: String) -> Self {
        Self {
            kind,
            severity,
            severity_label: severity.label(),
            message,
        }
    }
}

pub(crate) fn cohort_alerts(
    new_members: &NewMemberCohort,
    transition: &TransitionCohort,
) -> Vec<CohortAlert> {
    let mut alerts = Vec::new();

    if let (Some(index), Some(health)) = (new_members.foundation_index, new_members.foundation_health)
    {
        match health {
            HealthStatus::Crisis => alerts.push(CohortAlert::new(
                AlertKind::WeakFoundation,
                AlertSeverity::Critical,
                format!("Foundation index {index} is in crisis; prioritize basic discipleship"),
            )),
            HealthStatus::Attention => alerts.push(CohortAlert::new(
                AlertKind::WeakFoundation,
                AlertSeverity::Warning,
                format!("Foundation index {index} needs attention"),
            )),
            HealthStatus::Healthy => {}
        }
    }

    if let Some(pct) = new_members.crisis_seeker_pct {
        if pct >= CRISIS_SEEKER_ALERT_PCT {
            alerts.push(CohortAlert::new(
                AlertKind::CrisisSeekers,
                AlertSeverity::Warning,
                format!("{pct}% of new members are asking for crisis or spiritual support"),
            ));
        }
    }

    for entry in &new_members.barriers {
        if let Some(pct) = entry.pct {
            if pct >= BARRIER_ALERT_PCT {
                alerts.push(CohortAlert::new(
                    AlertKind::Barrier(entry.key),
                    AlertSeverity::Warning,
                    format!("{pct}% report barrier: {}", entry.label),
                ));
            }
        }
    }

    if let (Some(index), Some(health)) = (transition.trust_index, transition.trust_health) {
        match health {
            HealthStatus::Crisis => alerts.push(CohortAlert::new(
                AlertKind::LowTrust,
                AlertSeverity::Critical,
                format!("Trust index {index} is in crisis during the transition"),
            )),
            HealthStatus::Attention => alerts.push(CohortAlert::new(
                AlertKind::LowTrust,
                AlertSeverity::Warning,
                format!("Trust index {index} needs attention during the transition"),
            )),
            HealthStatus::Healthy => {}
        }
    }

    if let Some(index) = transition.hope_index {
        if HealthStatus::from_index(index) == HealthStatus::Crisis {
            alerts.push(CohortAlert::new(
                AlertKind::LowHope,
                AlertSeverity::Critical,
                format!("Hope index {index} is below the crisis threshold"),
            ));
        }
    }

    alerts
}
