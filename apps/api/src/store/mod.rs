// Store: per-profile guidance state persisted as versioned snapshots.
//
// Every write for a profile runs under that profile's async mutex:
// load → reduce → save. Model calls are never made while the lock is held;
// handlers load, release, call the flow, then update.

pub mod backend;
pub mod handlers;
pub mod snapshot;
pub mod state;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::OwnedMutexGuard;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use backend::SnapshotBackend;
use state::{Action, GuidanceState};

type ProfileLocks = Arc<Mutex<HashMap<Uuid, Arc<tokio::sync::Mutex<()>>>>>;

#[derive(Clone)]
pub struct ProfileStore {
    backend: Arc<dyn SnapshotBackend>,
    namespace: String,
    locks: ProfileLocks,
}

/// Holds a profile's write lock. On drop the map entry is removed once no other
/// writer holds or waits on it.
struct ProfileLease {
    locks: ProfileLocks,
    profile_id: Uuid,
    lock: Arc<tokio::sync::Mutex<()>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for ProfileLease {
    fn drop(&mut self) {
        self.guard.take();
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        // One reference in the map, one here.
        if Arc::strong_count(&self.lock) == 2 {
            locks.remove(&self.profile_id);
        }
    }
}

impl ProfileStore {
    pub fn new(backend: Arc<dyn SnapshotBackend>, namespace: impl Into<String>) -> Self {
        Self {
            backend,
            namespace: namespace.into(),
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn key(&self, profile_id: Uuid) -> String {
        format!("{}:{}", self.namespace, profile_id)
    }

    async fn lease(&self, profile_id: Uuid) -> ProfileLease {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            locks.entry(profile_id).or_default().clone()
        };
        // Built before waiting so a cancelled wait still prunes the entry.
        let mut lease = ProfileLease {
            locks: self.locks.clone(),
            profile_id,
            lock,
            guard: None,
        };
        lease.guard = Some(lease.lock.clone().lock_owned().await);
        lease
    }

    /// Current state of a profile. Unknown profiles start fresh; snapshots that cannot
    /// be decoded or come from a newer version are logged and treated as fresh.
    pub async fn load(&self, profile_id: Uuid) -> Result<GuidanceState, AppError> {
        let key = self.key(profile_id);
        let Some(raw) = self.backend.load(&key).await? else {
            return Ok(GuidanceState::default());
        };

        match snapshot::decode(&raw) {
            Ok(state) => Ok(state),
            Err(e) => {
                warn!(%profile_id, "discarding unreadable snapshot: {e}");
                Ok(GuidanceState::default())
            }
        }
    }

    /// Applies `f` to the latest state and persists the result.
    /// If `f` fails nothing is written.
    pub async fn update<F>(&self, profile_id: Uuid, f: F) -> Result<GuidanceState, AppError>
    where
        F: FnOnce(GuidanceState) -> Result<GuidanceState, AppError> + Send,
    {
        let _lease = self.lease(profile_id).await;

        let next = f(self.load(profile_id).await?)?;
        let encoded = snapshot::encode(&next).map_err(|e| AppError::Store(e.to_string()))?;
        self.backend.save(&self.key(profile_id), encoded).await?;
        Ok(next)
    }

    pub async fn dispatch(&self, profile_id: Uuid, action: Action) -> Result<GuidanceState, AppError> {
        self.update(profile_id, |state| Ok(state.reduce(action))).await
    }

    /// Applies several actions as one write.
    pub async fn dispatch_all(
        &self,
        profile_id: Uuid,
        actions: Vec<Action>,
    ) -> Result<GuidanceState, AppError> {
        self.update(profile_id, |state| {
            Ok(actions.into_iter().fold(state, GuidanceState::reduce))
        })
        .await
    }
}
