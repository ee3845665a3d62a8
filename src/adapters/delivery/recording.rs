//! Recording document delivery.
//!
//! Keeps every delivered document in memory instead of sending it.
//! Useful for testing and development.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::complaint::Complaint;
use crate::domain::foundation::ComplaintId;
use crate::ports::{DeliveryError, DocumentDelivery};

use super::form::render_complaint_form;

/// One recorded delivery.
#[derive(Debug, Clone)]
pub struct DeliveredDocument {
    pub id: ComplaintId,
    pub complaint: Complaint,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingDocumentDelivery {
    delivered: Arc<Mutex<Vec<DeliveredDocument>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingDocumentDelivery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following delivery fail until reset.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn delivered(&self) -> Vec<DeliveredDocument> {
        self.delivered
            .lock()
            .map(|d| d.clone())
            .unwrap_or_default()
    }

    pub fn delivery_count(&self) -> usize {
        self.delivered.lock().map(|d| d.len()).unwrap_or(0)
    }
}

#[async_trait]
impl DocumentDelivery for RecordingDocumentDelivery {
    async fn deliver(&self, id: ComplaintId, complaint: &Complaint) -> Result<(), DeliveryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DeliveryError::DeliveryFailed(
                "recording delivery marked failing".to_string(),
            ));
        }

        let document = DeliveredDocument {
            id,
            complaint: complaint.clone(),
            content: render_complaint_form(&id, complaint),
        };
        self.delivered
            .lock()
            .map_err(|e| DeliveryError::DeliveryFailed(e.to_string()))?
            .push(document);
        Ok(())
    }
}
