//! SessionRegistry - Lifecycle of intake sessions on top of a SessionStore.
//!
//! Adds inactivity expiry and lock-aware sweeping to the plain keyed store.
//! Callers serialize access per identity through [`SessionRegistry::locks`].

use std::sync::Arc;

use chrono::Duration;

use crate::domain::foundation::{Identity, Timestamp};
use crate::domain::intake::IntakeSession;
use crate::ports::{SessionStore, SessionStoreError};

use super::identity_locks::IdentityLocks;

/// How `get_or_create` obtained the session it returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    /// An active stored session.
    Resumed,
    /// No session was stored.
    Created,
    /// The stored session was idle past the threshold and was replaced.
    Expired,
    /// The stored session could not be read back and was replaced.
    Discarded,
}

pub struct SessionRegistry {
    store: Arc<dyn SessionStore>,
    locks: IdentityLocks,
    inactivity_timeout: Duration,
}

impl SessionRegistry {
    pub fn new(store: Arc<dyn SessionStore>, inactivity_timeout: Duration) -> Self {
        Self {
            store,
            locks: IdentityLocks::new(),
            inactivity_timeout,
        }
    }

    pub fn locks(&self) -> &IdentityLocks {
        &self.locks
    }

    pub fn inactivity_timeout(&self) -> Duration {
        self.inactivity_timeout
    }

    /// Loads the active session for `identity` or starts a fresh one.
    ///
    /// An expired or unreadable session is deleted before its replacement
    /// is returned. The fresh session is not stored until [`SessionRegistry::save`].
    pub async fn get_or_create(
        &self,
        identity: &Identity,
        now: Timestamp,
    ) -> Result<(IntakeSession, SessionOrigin), SessionStoreError> {
        let stored = match self.store.load(identity).await {
            Ok(stored) => stored,
            Err(SessionStoreError::DeserializationFailed(reason)) => {
                tracing::warn!(identity = %identity, reason = %reason, "Discarding unreadable session");
                self.store.delete(identity).await?;
                return Ok((
                    IntakeSession::new(identity.clone(), now),
                    SessionOrigin::Discarded,
                ));
            }
            Err(e) => return Err(e),
        };

        match stored {
            Some(session) => match session.ensure_active(now, self.inactivity_timeout) {
                Ok(()) => Ok((session, SessionOrigin::Resumed)),
                Err(_) => {
                    self.store.delete(identity).await?;
                    Ok((
                        IntakeSession::new(identity.clone(), now),
                        SessionOrigin::Expired,
                    ))
                }
            },
            None => Ok((
                IntakeSession::new(identity.clone(), now),
                SessionOrigin::Created,
            )),
        }
    }

    pub async fn save(&self, session: &IntakeSession) -> Result<(), SessionStoreError> {
        self.store.store(session).await
    }

    pub async fn delete(&self, identity: &Identity) -> Result<(), SessionStoreError> {
        self.store.delete(identity).await
    }

    /// Deletes every session idle for at least `threshold`, and every
    /// session that can no longer be read back.
    ///
    /// Identities whose lock is held are skipped; a step is in flight and
    /// will refresh the session's activity. Returns the number removed.
    pub async fn sweep_expired(
        &self,
        now: Timestamp,
        threshold: Duration,
    ) -> Result<usize, SessionStoreError> {
        let mut removed = 0;

        for identity in self.store.identities().await? {
            let Some(_guard) = self.locks.try_acquire(&identity) else {
                tracing::debug!(identity = %identity, "Skipping locked session during sweep");
                continue;
            };

            match self.store.load(&identity).await {
                Ok(Some(session)) if session.is_expired(now, threshold) => {
                    self.store.delete(&identity).await?;
                    removed += 1;
                }
                Ok(_) => {}
                Err(SessionStoreError::DeserializationFailed(reason)) => {
                    tracing::warn!(identity = %identity, reason = %reason, "Sweeping unreadable session");
                    self.store.delete(&identity).await?;
                    removed += 1;
                }
                Err(e) => {
                    tracing::warn!(identity = %identity, error = %e, "Failed to load session during sweep");
                }
            }
        }

        Ok(removed)
    }
}
