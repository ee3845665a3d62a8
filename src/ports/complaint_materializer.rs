//! Complaint materializer port.
//!
//! Turns a finished [`Complaint`] into a durable record and returns the id
//! it was registered under.

use async_trait::async_trait;

use crate::domain::complaint::Complaint;
use crate::domain::foundation::{ComplaintId, DomainError};

#[derive(Debug, thiserror::Error)]
pub enum MaterializeError {
    #[error("Complaint storage rejected the record: {0}")]
    Rejected(String),

    #[error("Complaint storage unavailable: {0}")]
    Unavailable(String),
}

impl From<DomainError> for MaterializeError {
    fn from(err: DomainError) -> Self {
        MaterializeError::Unavailable(err.to_string())
    }
}

/// Port for registering finished complaints.
///
/// Called at most once per session lifetime; implementations do not need
/// to deduplicate.
#[async_trait]
pub trait ComplaintMaterializer: Send + Sync {
    /// Persist the complaint.
    ///
    /// # Errors
    ///
    /// - `Rejected` if the record cannot be stored as given
    /// - `Unavailable` on storage failure
    async fn materialize(&self, complaint: &Complaint) -> Result<ComplaintId, MaterializeError>;
}
