//! Complaint materializer adapters that need no external service.

mod in_memory_materializer;

pub use in_memory_materializer::InMemoryComplaintMaterializer;
