use std::sync::Arc;

use crate::identity::LocalIdentityProvider;
use crate::inflight::InFlight;
use crate::llm_client::Inference;
use crate::recommendations::domain_filter::InstitutionFilter;
use crate::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model backend. `LlmClient` in production, scripted in tests.
    pub llm: Arc<dyn Inference>,
    pub store: ProfileStore,
    pub identity: Arc<LocalIdentityProvider>,
    pub inflight: InFlight,
    pub filter: Arc<InstitutionFilter>,
}

impl AppState {
    pub fn new(llm: Arc<dyn Inference>, store: ProfileStore) -> Self {
        Self {
            llm,
            identity: Arc::new(LocalIdentityProvider::new(store.clone())),
            store,
            inflight: InFlight::default(),
            filter: Arc::new(InstitutionFilter::default()),
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use crate::llm_client::testing::ScriptedInference;
    use crate::store::backend::MemoryBackend;

    /// State over an in-memory store, plus a handle to the scripted model.
    pub fn test_state(llm: ScriptedInference) -> (AppState, Arc<ScriptedInference>) {
        let llm = Arc::new(llm);
        let store = ProfileStore::new(Arc::new(MemoryBackend::default()), "router-test");
        (AppState::new(llm.clone(), store), llm)
    }
}
