//! HTTP adapter for intake endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, MessageRequest, MessageResponse, WebhookForm};
pub use handlers::IntakeAppState;
pub use routes::intake_routes;
