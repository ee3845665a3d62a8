//! Intake handlers.
//!
//! - **InboundMessageHandler** - One inbound message through one dialogue step
//! - **SessionRegistry** - Session lifecycle with inactivity expiry
//! - **SessionSweeper** - Background removal of idle sessions
//! - **IdentityLocks** - Per-identity serialization

mod handle_inbound_message;
mod identity_locks;
mod session_registry;
mod session_sweeper;

pub use handle_inbound_message::{
    InboundMessage, InboundMessageHandler, InboundReply, IntakeHandlerError,
};
pub use identity_locks::{IdentityGuard, IdentityLocks};
pub use session_registry::{SessionOrigin, SessionRegistry};
pub use session_sweeper::SessionSweeper;
