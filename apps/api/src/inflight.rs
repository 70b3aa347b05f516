use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::errors::AppError;

type Key = (Uuid, &'static str);

/// Tracks model-backed actions currently running per profile.
/// A second request for the same action on the same profile is rejected until the
/// first finishes (or its future is dropped).
#[derive(Clone, Default)]
pub struct InFlight {
    active: Arc<Mutex<HashSet<Key>>>,
}

/// Releases the action when dropped.
#[must_use]
pub struct InFlightGuard {
    active: Arc<Mutex<HashSet<Key>>>,
    key: Key,
}

impl InFlight {
    pub fn begin(&self, profile_id: Uuid, action: &'static str) -> Result<InFlightGuard, AppError> {
        let key = (profile_id, action);
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        if !active.insert(key) {
            return Err(AppError::Conflict(format!(
                "{action} is already running for this profile"
            )));
        }
        Ok(InFlightGuard {
            active: self.active.clone(),
            key,
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        active.remove(&self.key);
    }
}
