//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionStore` - Keyed storage of in-progress intake sessions
//! - `ComplaintMaterializer` - Registers finished complaints
//! - `DocumentDelivery` - Sends the complaint document to the user

mod complaint_materializer;
mod document_delivery;
mod session_store;

pub use complaint_materializer::{ComplaintMaterializer, MaterializeError};
pub use document_delivery::{DeliveryError, DocumentDelivery};
pub use session_store::{SessionStore, SessionStoreError};
