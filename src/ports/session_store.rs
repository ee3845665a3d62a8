//! Session Store Port - Interface for persisting intake sessions.
//!
//! Sessions are keyed by the sender identity. Implementations only store
//! snapshots; expiry and locking live in the application layer.

use async_trait::async_trait;

use crate::domain::foundation::Identity;
use crate::domain::intake::IntakeSession;

/// Errors that can occur during session storage operations
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Failed to serialize session: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize session: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Port for keyed session snapshots
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the session stored for `identity`, if any.
    async fn load(&self, identity: &Identity) -> Result<Option<IntakeSession>, SessionStoreError>;

    /// Store a session, replacing any previous snapshot for its identity.
    async fn store(&self, session: &IntakeSession) -> Result<(), SessionStoreError>;

    /// Delete the session for `identity`. Deleting a missing session is not an error.
    async fn delete(&self, identity: &Identity) -> Result<(), SessionStoreError>;

    /// Identities that currently have a stored session.
    async fn identities(&self) -> Result<Vec<Identity>, SessionStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_store_error_serialization() {
        let err = SessionStoreError::SerializationFailed("bad json".to_string());
        assert!(err.to_string().contains("serialize"));
    }

    #[test]
    fn test_session_store_error_unavailable() {
        let err = SessionStoreError::Unavailable("connection refused".to_string());
        assert_eq!(err.to_string(), "Storage unavailable: connection refused");
    }
}
