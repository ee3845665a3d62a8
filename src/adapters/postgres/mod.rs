//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresComplaintRepository` - Registers complaints and reads them back

mod complaint_repository;

pub use complaint_repository::PostgresComplaintRepository;
