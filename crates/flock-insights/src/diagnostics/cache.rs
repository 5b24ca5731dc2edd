use super::cohort::{CohortSummary, TemplateFilter};
use crate::surveys::SurveyResponse;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

const DEFAULT_CAPACITY: usize = 32;

/// Order-independent identity of a response collection plus filter.
///
/// Every field the engine reads is hashed, so a response replaced in place (same id and
/// `updated_at`, different answers) produces a different key.
pub fn fingerprint(responses: &[SurveyResponse], filter: &TemplateFilter) -> u64 {
    let mut digests: Vec<(&str, u64)> = responses
        .iter()
        .map(|response| (response.id.0.as_str(), response_digest(response)))
        .collect();
    digests.sort_unstable();

    let mut hasher = DefaultHasher::new();
    digests.hash(&mut hasher);
    filter.hash(&mut hasher);
    hasher.finish()
}

fn response_digest(response: &SurveyResponse) -> u64 {
    let mut hasher = DefaultHasher::new();
    response.id.hash(&mut hasher);
    response.person_id.hash(&mut hasher);
    response.template_id.hash(&mut hasher);
    response
        .updated_at
        .timestamp_nanos_opt()
        .unwrap_or(i64::MAX)
        .hash(&mut hasher);
    for answer in &response.answers {
        answer.question_code.hash(&mut hasher);
        answer.value.to_string().hash(&mut hasher);
    }
    hasher.finish()
}

/// Memoizes cohort summaries so unrelated dashboard refreshes do not recompute them.
#[derive(Debug)]
pub struct SummaryCache {
    entries: Mutex<HashMap<u64, CohortSummary>>,
    capacity: usize,
}

impl Default for SummaryCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl SummaryCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn get_or_compute<F>(
        &self,
        responses: &[SurveyResponse],
        filter: &TemplateFilter,
        compute: F,
    ) -> CohortSummary
    where
        F: FnOnce() -> CohortSummary,
    {
        let key = fingerprint(responses, filter);
        if let Some(summary) = self.lock().get(&key) {
            debug!(key, "cohort summary cache hit");
            return summary.clone();
        }

        let summary = compute();
        let mut entries = self.lock();
        if entries.len() >= self.capacity {
            entries.clear();
        }
        entries.insert(key, summary.clone());
        summary
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<u64, CohortSummary>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
