//! Application handlers.
//!
//! Handlers that orchestrate domain operations over the ports.

pub mod intake;

pub use intake::{
    IdentityGuard, IdentityLocks, InboundMessage, InboundMessageHandler, InboundReply,
    IntakeHandlerError, SessionOrigin, SessionRegistry, SessionSweeper,
};
