//! Storage Adapters
//!
//! Implementations of the SessionStore port for in-progress intake sessions.
//!
//! ## Available Adapters
//!
//! - **FileSessionStore** - One JSON file per session, survives restarts
//! - **InMemorySessionStore** - Process-local map (default, testing)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileSessionStore, InMemorySessionStore};
//!
//! let store = FileSessionStore::new("./data/sessions");
//! let store = InMemorySessionStore::new();
//! ```

mod file_session_store;
mod in_memory_session_store;

pub use file_session_store::FileSessionStore;
pub use in_memory_session_store::InMemorySessionStore;
