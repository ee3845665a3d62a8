//! Document delivery port.
//!
//! Renders a registered complaint and hands it to the user. Layout and
//! transport are the adapter's concern.

use async_trait::async_trait;

use crate::domain::complaint::Complaint;
use crate::domain::foundation::ComplaintId;

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("Failed to render complaint document: {0}")]
    RenderFailed(String),

    #[error("Failed to deliver complaint document: {0}")]
    DeliveryFailed(String),
}

/// Port for sending the complaint document.
#[async_trait]
pub trait DocumentDelivery: Send + Sync {
    /// Deliver the document for a complaint that is already materialized.
    ///
    /// A failure here never un-registers the complaint.
    async fn deliver(&self, id: ComplaintId, complaint: &Complaint) -> Result<(), DeliveryError>;
}
