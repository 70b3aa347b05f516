//! Identity: who is signed in on a profile.
//!
//! Only the local, unauthenticated login exists: the username and email the student
//! typed in. No password is checked. Consumers that need to react to sign-in or
//! sign-out subscribe through `on_identity_change`.

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::UserData;
use crate::store::ProfileStore;

const CHANGE_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub display_name: String,
}

impl From<&UserData> for Identity {
    fn from(user: &UserData) -> Self {
        Self {
            id: user.email.trim().to_lowercase(),
            display_name: user.username.trim().to_string(),
        }
    }
}

/// A sign-in (`Some`) or sign-out (`None`) on a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityChange {
    pub profile_id: Uuid,
    pub identity: Option<Identity>,
}

pub type IdentityCallback = Box<dyn Fn(IdentityChange) + Send + Sync>;

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_identity(&self, profile_id: Uuid) -> Result<Option<Identity>, AppError>;

    /// Runs `callback` for every change published after this call returns.
    fn on_identity_change(&self, callback: IdentityCallback) -> JoinHandle<()>;
}

/// Identity read from the profile's stored login.
pub struct LocalIdentityProvider {
    store: ProfileStore,
    changes: broadcast::Sender<IdentityChange>,
}

impl LocalIdentityProvider {
    pub fn new(store: ProfileStore) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self { store, changes }
    }

    pub fn publish(&self, profile_id: Uuid, identity: Option<Identity>) {
        // Err only means nobody is listening.
        if self.changes.send(IdentityChange { profile_id, identity }).is_err() {
            debug!(%profile_id, "identity change with no subscribers");
        }
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn current_identity(&self, profile_id: Uuid) -> Result<Option<Identity>, AppError> {
        let state = self.store.load(profile_id).await?;
        if !state.is_authenticated {
            return Ok(None);
        }
        Ok(state.user.as_ref().map(Identity::from))
    }

    fn on_identity_change(&self, callback: IdentityCallback) -> JoinHandle<()> {
        let mut rx = self.changes.subscribe();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(change) => callback(change),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "identity subscriber fell behind");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}
