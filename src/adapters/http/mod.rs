//! HTTP adapters - REST and webhook endpoints.

pub mod intake;

pub use intake::{intake_routes, IntakeAppState};
