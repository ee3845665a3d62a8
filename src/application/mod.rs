//! Application layer - Handlers and background services.
//!
//! This layer drives the intake domain and coordinates between ports.

pub mod handlers;

pub use handlers::{
    InboundMessage, InboundMessageHandler, InboundReply, IntakeHandlerError, SessionRegistry,
    SessionSweeper,
};
