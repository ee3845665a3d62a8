//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Session stores (in-memory, file)
//! - `complaint` - In-memory complaint materializer
//! - `postgres` - PostgreSQL complaint repository
//! - `delivery` - Complaint document delivery
//! - `http` - axum routes for the messaging channel

pub mod complaint;
pub mod delivery;
pub mod http;
pub mod postgres;
pub mod storage;

pub use complaint::InMemoryComplaintMaterializer;
pub use delivery::{LocalFileDocumentDelivery, RecordingDocumentDelivery};
pub use http::{intake_routes, IntakeAppState};
pub use postgres::PostgresComplaintRepository;
pub use storage::{FileSessionStore, InMemorySessionStore};
