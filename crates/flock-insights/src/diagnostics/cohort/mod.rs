mod alerts;
mod summary;
pub mod views;

pub use alerts::{AlertKind, AlertSeverity, CohortAlert};
pub use summary::percentage;
pub use views::{CohortSummary, NewMemberCohort, ShareEntry, TransitionCohort};

pub(crate) use summary::CohortTally;

use crate::surveys::TemplateId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which templates a cohort is drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "scope", content = "template_ids")]
pub enum TemplateFilter {
    All,
    Templates(BTreeSet<TemplateId>),
}

impl TemplateFilter {
    pub fn only(template_id: TemplateId) -> Self {
        Self::Templates(BTreeSet::from([template_id]))
    }

    /// An empty id list means every template.
    pub fn any_of(template_ids: impl IntoIterator<Item = TemplateId>) -> Self {
        let ids: BTreeSet<TemplateId> = template_ids.into_iter().collect();
        if ids.is_empty() {
            Self::All
        } else {
            Self::Templates(ids)
        }
    }

    pub fn matches(&self, template_id: &TemplateId) -> bool {
        match self {
            Self::All => true,
            Self::Templates(ids) => ids.contains(template_id),
        }
    }

    pub fn template_ids(&self) -> Vec<TemplateId> {
        match self {
            Self::All => Vec::new(),
            Self::Templates(ids) => ids.iter().cloned().collect(),
        }
    }
}
