//! Local filesystem document delivery.
//!
//! Writes the rendered complaint form to `{output_dir}/complaint_{id}.md`.
//!
//! # Atomic Writes
//!
//! 1. Write content to `complaint_{id}.md.tmp`
//! 2. Sync to disk
//! 3. Rename to `complaint_{id}.md`

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::complaint::Complaint;
use crate::domain::foundation::ComplaintId;
use crate::ports::{DeliveryError, DocumentDelivery};

use super::form::render_complaint_form;

#[derive(Debug, Clone)]
pub struct LocalFileDocumentDelivery {
    output_dir: PathBuf,
}

impl LocalFileDocumentDelivery {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Path the document for `id` is written to.
    pub fn document_path(&self, id: &ComplaintId) -> PathBuf {
        self.output_dir.join(format!("complaint_{}.md", id))
    }

    fn temp_path(&self, id: &ComplaintId) -> PathBuf {
        self.output_dir.join(format!("complaint_{}.md.tmp", id))
    }
}

#[async_trait]
impl DocumentDelivery for LocalFileDocumentDelivery {
    async fn deliver(&self, id: ComplaintId, complaint: &Complaint) -> Result<(), DeliveryError> {
        let content = render_complaint_form(&id, complaint);

        fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            DeliveryError::DeliveryFailed(format!(
                "Failed to create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        let temp_path = self.temp_path(&id);
        let final_path = self.document_path(&id);

        let mut file = fs::File::create(&temp_path).await.map_err(|e| {
            DeliveryError::DeliveryFailed(format!(
                "Failed to create temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.write_all(content.as_bytes()).await.map_err(|e| {
            DeliveryError::DeliveryFailed(format!(
                "Failed to write to temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            DeliveryError::DeliveryFailed(format!(
                "Failed to sync temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        fs::rename(&temp_path, &final_path).await.map_err(|e| {
            DeliveryError::DeliveryFailed(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            ))
        })?;

        tracing::debug!(complaint_id = %id, path = %final_path.display(), "Complaint form written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::complaint::test_support::sample_complaint;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_deliver_writes_rendered_form() {
        let temp_dir = TempDir::new().unwrap();
        let delivery = LocalFileDocumentDelivery::new(temp_dir.path().join("complaints"));
        let id = ComplaintId::new();

        delivery.deliver(id, &sample_complaint()).await.unwrap();

        let written = std::fs::read_to_string(delivery.document_path(&id)).unwrap();
        assert!(written.starts_with("# CYBER CRIME COMPLAINT FORM"));
        assert!(written.contains(&id.to_string()));
    }

    #[tokio::test]
    async fn test_deliver_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let delivery = LocalFileDocumentDelivery::new(temp_dir.path());
        let id = ComplaintId::new();

        delivery.deliver(id, &sample_complaint()).await.unwrap();

        assert!(!delivery.temp_path(&id).exists());
        let entries: Vec<_> = std::fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_unwritable_output_dir_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();
        let delivery = LocalFileDocumentDelivery::new(&blocker);

        let result = delivery.deliver(ComplaintId::new(), &sample_complaint()).await;

        assert!(matches!(result, Err(DeliveryError::DeliveryFailed(_))));
    }
}
