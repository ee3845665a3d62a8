//! In-memory complaint materializer.
//!
//! Registers complaints in a process-local map. Used when no database is
//! configured and in tests, where [`InMemoryComplaintMaterializer::set_unavailable`]
//! simulates a storage outage.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::complaint::{Complaint, ComplaintRecord, ComplaintStatus};
use crate::domain::foundation::ComplaintId;
use crate::ports::{ComplaintMaterializer, MaterializeError};

#[derive(Debug, Clone, Default)]
pub struct InMemoryComplaintMaterializer {
    records: Arc<RwLock<HashMap<ComplaintId, ComplaintRecord>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryComplaintMaterializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following `materialize` call fail until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn find_by_id(&self, id: &ComplaintId) -> Option<ComplaintRecord> {
        self.records.read().await.get(id).cloned()
    }

    /// All registered complaints, oldest first.
    pub async fn records(&self) -> Vec<ComplaintRecord> {
        let mut records: Vec<ComplaintRecord> =
            self.records.read().await.values().cloned().collect();
        records.sort_by_key(|r| r.complaint.submitted_at);
        records
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl ComplaintMaterializer for InMemoryComplaintMaterializer {
    async fn materialize(&self, complaint: &Complaint) -> Result<ComplaintId, MaterializeError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(MaterializeError::Unavailable(
                "in-memory store marked unavailable".to_string(),
            ));
        }

        let id = ComplaintId::new();
        let record = ComplaintRecord {
            id,
            status: ComplaintStatus::Pending,
            complaint: complaint.clone(),
        };
        self.records.write().await.insert(id, record);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::complaint::test_support::sample_complaint;

    #[tokio::test]
    async fn test_materialize_registers_pending_record() {
        let materializer = InMemoryComplaintMaterializer::new();
        let complaint = sample_complaint();

        let id = materializer.materialize(&complaint).await.unwrap();

        let record = materializer.find_by_id(&id).await.unwrap();
        assert_eq!(record.status, ComplaintStatus::Pending);
        assert_eq!(record.complaint, complaint);
    }

    #[tokio::test]
    async fn test_each_call_gets_a_new_id() {
        let materializer = InMemoryComplaintMaterializer::new();
        let complaint = sample_complaint();

        let first = materializer.materialize(&complaint).await.unwrap();
        let second = materializer.materialize(&complaint).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(materializer.count().await, 2);
    }

    #[tokio::test]
    async fn test_unavailable_stores_nothing() {
        let materializer = InMemoryComplaintMaterializer::new();
        materializer.set_unavailable(true);

        let result = materializer.materialize(&sample_complaint()).await;

        assert!(matches!(result, Err(MaterializeError::Unavailable(_))));
        assert_eq!(materializer.count().await, 0);

        materializer.set_unavailable(false);
        assert!(materializer.materialize(&sample_complaint()).await.is_ok());
    }
}
