//! In-Memory Session Store Adapter
//!
//! Keeps session snapshots in a process-local map. Sessions are lost on
//! restart, which matches the inactivity semantics of the dialogue.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::Identity;
use crate::domain::intake::IntakeSession;
use crate::ports::{SessionStore, SessionStoreError};

/// In-memory storage for intake sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<Identity, IntakeSession>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Clear all stored sessions (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, identity: &Identity) -> Result<Option<IntakeSession>, SessionStoreError> {
        Ok(self.sessions.read().await.get(identity).cloned())
    }

    async fn store(&self, session: &IntakeSession) -> Result<(), SessionStoreError> {
        self.sessions
            .write()
            .await
            .insert(session.identity().clone(), session.clone());
        Ok(())
    }

    async fn delete(&self, identity: &Identity) -> Result<(), SessionStoreError> {
        self.sessions.write().await.remove(identity);
        Ok(())
    }

    async fn identities(&self) -> Result<Vec<Identity>, SessionStoreError> {
        let mut identities: Vec<Identity> = self.sessions.read().await.keys().cloned().collect();
        identities.sort();
        Ok(identities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    fn session(raw: &str) -> IntakeSession {
        IntakeSession::new(Identity::new(raw).unwrap(), Timestamp::from_unix_secs(0))
    }

    #[tokio::test]
    async fn test_store_and_load() {
        let store = InMemorySessionStore::new();
        let s = session("user-a");

        store.store(&s).await.unwrap();
        let loaded = store.load(s.identity()).await.unwrap();

        assert_eq!(loaded, Some(s));
    }

    #[tokio::test]
    async fn test_load_missing_is_none() {
        let store = InMemorySessionStore::new();
        let missing = Identity::new("nobody").unwrap();
        assert_eq!(store.load(&missing).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_replaces_snapshot() {
        let store = InMemorySessionStore::new();
        let mut s = session("user-a");
        store.store(&s).await.unwrap();

        s.begin().unwrap();
        store.store(&s).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(store.load(s.identity()).await.unwrap(), Some(s));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = InMemorySessionStore::new();
        let s = session("user-a");
        store.store(&s).await.unwrap();

        store.delete(s.identity()).await.unwrap();
        store.delete(s.identity()).await.unwrap();

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_identities_are_sorted() {
        let store = InMemorySessionStore::new();
        store.store(&session("b")).await.unwrap();
        store.store(&session("a")).await.unwrap();

        let ids = store.identities().await.unwrap();
        assert_eq!(
            ids,
            vec![Identity::new("a").unwrap(), Identity::new("b").unwrap()]
        );
    }
}
