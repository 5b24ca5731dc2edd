//! Health thresholds shared by the dashboard banners and printable reports.

use serde::{Deserialize, Serialize};

/// Index at or above which a cohort or person is considered healthy.
pub const HEALTHY_INDEX: u8 = 75;
/// Index below which a cohort or person is in crisis.
pub const CRISIS_INDEX: u8 = 50;
/// Share of a cohort reporting one barrier that raises an alert.
pub const BARRIER_ALERT_PCT: u8 = 30;
/// Share of crisis seekers that raises a pastoral-care alert.
pub const CRISIS_SEEKER_ALERT_PCT: u8 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Attention,
    Crisis,
}

impl HealthStatus {
    pub const fn from_index(index: u8) -> Self {
        if index >= HEALTHY_INDEX {
            Self::Healthy
        } else if index < CRISIS_INDEX {
            Self::Crisis
        } else {
            Self::Attention
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Attention => "Needs Attention",
            Self::Crisis => "Crisis",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_follow_published_thresholds() {
        assert_eq!(HealthStatus::from_index(75), HealthStatus::Healthy);
        assert_eq!(HealthStatus::from_index(74), HealthStatus::Attention);
        assert_eq!(HealthStatus::from_index(50), HealthStatus::Attention);
        assert_eq!(HealthStatus::from_index(49), HealthStatus::Crisis);
    }
}
