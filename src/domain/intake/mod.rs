//! Intake dialogue.
//!
//! Field schema, the per-user session aggregate, serial addresses for edits
//! and the conversation engine that drives a session one message at a time.

mod address;
mod collected;
mod engine;
mod errors;
mod field;
pub mod prompts;
mod session;
mod state;

pub use address::{EditCommand, SerialAddress};
pub use collected::{CollectedData, TransactionRecord};
pub use engine::{ConversationEngine, EngineKeywords, StepEffect, StepOutcome};
pub use errors::IntakeError;
pub use field::{
    FieldDescriptor, PersonalField, TransactionField, PERSONAL_FIELDS, PERSONAL_FIELD_COUNT,
    TRANSACTION_FIELDS, TRANSACTION_FIELD_COUNT,
};
pub use session::{ExpectedField, IntakeSession, Progress};
pub use state::DialogueState;

#[cfg(test)]
pub(crate) use session::test_support;
