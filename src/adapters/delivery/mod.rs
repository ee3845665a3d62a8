//! Document delivery adapters.
//!
//! - **LocalFileDocumentDelivery** - Writes the complaint form to disk
//! - **RecordingDocumentDelivery** - Keeps documents in memory (testing/development)

mod form;
mod local_file;
mod recording;

pub use form::render_complaint_form;
pub use local_file::LocalFileDocumentDelivery;
pub use recording::{DeliveredDocument, RecordingDocumentDelivery};
