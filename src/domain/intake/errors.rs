//! Errors raised while driving an intake dialogue.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::domain::validation::Rejection;

/// Intake dialogue errors.
///
/// None of these leave a session half-mutated: every operation that returns
/// one has checked its preconditions before writing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    /// A validator refused the user's input.
    #[error("{0}")]
    ValidationRejected(#[from] Rejection),

    /// An edit command named a serial address that does not exist.
    #[error("Unknown field {address}: {reason}")]
    UnknownAddress { address: String, reason: String },

    /// An edit command was not of the form `<serial> = <value>`.
    #[error("Malformed edit command: {0}")]
    MalformedEditCommand(String),

    /// The session was idle longer than the inactivity threshold.
    #[error("Session expired due to inactivity")]
    SessionExpired,

    /// The complaint could not be persisted.
    #[error("Failed to register complaint: {0}")]
    MaterializeFailed(String),

    /// A required field is still missing from the draft.
    #[error("Draft is missing required field: {0}")]
    IncompleteDraft(&'static str),

    /// The requested state change is not a legal transition.
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// The session already produced a complaint.
    #[error("Complaint already registered for this session")]
    AlreadyFinalized,
}

impl IntakeError {
    pub fn unknown_address(address: impl Into<String>, reason: impl Into<String>) -> Self {
        IntakeError::UnknownAddress {
            address: address.into(),
            reason: reason.into(),
        }
    }

    /// Error code for logs and error mapping.
    pub fn code(&self) -> ErrorCode {
        match self {
            IntakeError::ValidationRejected(_)
            | IntakeError::MalformedEditCommand(_)
            | IntakeError::IncompleteDraft(_) => ErrorCode::ValidationFailed,
            IntakeError::UnknownAddress { .. } => ErrorCode::InvalidFormat,
            IntakeError::SessionExpired => ErrorCode::SessionNotFound,
            IntakeError::MaterializeFailed(_) => ErrorCode::StorageError,
            IntakeError::InvalidTransition(_) | IntakeError::AlreadyFinalized => {
                ErrorCode::InvalidStateTransition
            }
        }
    }
}

impl From<ValidationError> for IntakeError {
    fn from(err: ValidationError) -> Self {
        IntakeError::InvalidTransition(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_displays_reason_only() {
        let err = IntakeError::from(Rejection::new("Name should contain only alphabets"));
        assert_eq!(err.to_string(), "Name should contain only alphabets");
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[test]
    fn unknown_address_names_the_address() {
        let err = IntakeError::unknown_address("2.9.1", "transaction 9 does not exist");
        assert_eq!(
            err.to_string(),
            "Unknown field 2.9.1: transaction 9 does not exist"
        );
        assert_eq!(err.code(), ErrorCode::InvalidFormat);
    }

    #[test]
    fn state_machine_errors_become_invalid_transition() {
        let err: IntakeError = ValidationError::invalid_format("state", "nope").into();
        assert!(matches!(err, IntakeError::InvalidTransition(_)));
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
    }
}
