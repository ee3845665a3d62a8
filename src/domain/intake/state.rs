//! Dialogue state machine.
//!
//! The position of a session in the intake dialogue. Data-collecting states
//! are paired with the session's field and transaction cursors; the rest are
//! non-collecting steps (the opening question, the count, confirm, edit, done).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    /// Fresh session, nothing asked yet.
    #[default]
    Start,

    /// Asked whether the user lost money to cyber crime.
    AwaitingMoneyLossConfirmation,

    /// Collecting name through PIN code; see the field cursor.
    PersonalInfo,

    /// Asked how many fraudulent transactions there were.
    AwaitingTransactionCount,

    /// Collecting the six fields of the current transaction.
    TransactionDetails,

    /// Summary shown, waiting for yes (generate) or no (edit).
    Confirm,

    /// Accepting `<serial> = <value>` edits.
    Edit,

    /// Complaint materialized; nothing more to collect.
    Done,
}

impl DialogueState {
    /// Returns true if inbound text is validated against a field.
    pub fn is_collecting(&self) -> bool {
        matches!(self, Self::PersonalInfo | Self::TransactionDetails)
    }

    /// Stable snake_case name used in logs and APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::AwaitingMoneyLossConfirmation => "awaiting_money_loss_confirmation",
            Self::PersonalInfo => "personal_info",
            Self::AwaitingTransactionCount => "awaiting_transaction_count",
            Self::TransactionDetails => "transaction_details",
            Self::Confirm => "confirm",
            Self::Edit => "edit",
            Self::Done => "done",
        }
    }
}

impl StateMachine for DialogueState {
    fn valid_transitions(&self) -> Vec<Self> {
        use DialogueState::*;
        match self {
            Start => vec![AwaitingMoneyLossConfirmation],
            AwaitingMoneyLossConfirmation => vec![PersonalInfo],
            PersonalInfo => vec![AwaitingTransactionCount],
            AwaitingTransactionCount => vec![TransactionDetails],
            TransactionDetails => vec![Confirm],
            Confirm => vec![Edit, Done],
            Edit => vec![Confirm],
            Done => vec![],
        }
    }
}
