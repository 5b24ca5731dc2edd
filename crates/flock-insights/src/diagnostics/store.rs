use crate::surveys::{ImportedDataset, Person, PersonId, ResponseId, SurveyResponse};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Read access to survey responses and people owned by the persistence layer.
pub trait ResponseStore: Send + Sync {
    fn responses(&self) -> Result<Vec<SurveyResponse>, StoreError>;
    fn response(&self, id: &ResponseId) -> Result<Option<SurveyResponse>, StoreError>;
    fn person(&self, id: &PersonId) -> Result<Option<Person>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("response store unavailable: {0}")]
    Unavailable(String),
}

/// Store backed by an imported dataset held in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryResponseStore {
    inner: Arc<RwLock<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    people: HashMap<PersonId, Person>,
    responses: Vec<SurveyResponse>,
}

impl InMemoryResponseStore {
    pub fn from_dataset(dataset: ImportedDataset) -> Self {
        let store = Self::default();
        store.load(dataset);
        store
    }

    /// Adds people and responses; a response with an existing id replaces the stored one.
    pub fn load(&self, dataset: ImportedDataset) {
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        for person in dataset.people {
            state.people.insert(person.id.clone(), person);
        }
        for response in dataset.responses {
            match state
                .responses
                .iter_mut()
                .find(|existing| existing.id == response.id)
            {
                Some(existing) => *existing = response,
                None => state.responses.push(response),
            }
        }
    }
}

impl ResponseStore for InMemoryResponseStore {
    fn responses(&self) -> Result<Vec<SurveyResponse>, StoreError> {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(state.responses.clone())
    }

    fn response(&self, id: &ResponseId) -> Result<Option<SurveyResponse>, StoreError> {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(state
            .responses
            .iter()
            .find(|response| &response.id == id)
            .cloned())
    }

    fn person(&self, id: &PersonId) -> Result<Option<Person>, StoreError> {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(state.people.get(id).cloned())
    }
}
