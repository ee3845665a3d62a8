//! Intake session aggregate.
//!
//! One session per user identity. It holds the dialogue state, the draft
//! complaint and the cursors that pick the next expected field.
//!
//! # Invariants
//!
//! - `state` plus the cursors identify at most one expected field
//! - `current_transaction_index < pending_transaction_count` while collecting
//!   transactions
//! - `complaint_id` is set at most once, together with the move to `Done`
//! - every mutating method checks its preconditions before writing

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ComplaintId, Identity, StateMachine, Timestamp};

use super::address::SerialAddress;
use super::collected::CollectedData;
use super::errors::IntakeError;
use super::field::{
    FieldDescriptor, PersonalField, TransactionField, PERSONAL_FIELD_COUNT,
    TRANSACTION_FIELD_COUNT,
};
use super::state::DialogueState;

/// The field the next inbound message is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedField {
    Personal(PersonalField),
    Transaction {
        /// 0-based transaction index.
        index: usize,
        field: TransactionField,
    },
}

impl ExpectedField {
    pub fn descriptor(&self) -> &'static FieldDescriptor {
        match self {
            ExpectedField::Personal(field) => field.descriptor(),
            ExpectedField::Transaction { field, .. } => field.descriptor(),
        }
    }

    /// Field name for logs.
    pub fn key(&self) -> &'static str {
        self.descriptor().key
    }
}

/// What accepting a value did to the cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Another field of the same block is next.
    NextField,
    /// Personal block finished; the transaction count is next.
    PersonalComplete,
    /// A transaction finished and the next one (1-based `number`) begins.
    NextTransaction { number: usize },
    /// The last transaction finished; the session is now in `Confirm`.
    TransactionsComplete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeSession {
    identity: Identity,
    state: DialogueState,
    collected: CollectedData,
    pending_transaction_count: usize,
    current_transaction_index: usize,
    current_field_index: usize,
    started_at: Timestamp,
    last_activity: Timestamp,
    complaint_id: Option<ComplaintId>,
}

impl IntakeSession {
    /// Creates a fresh session in `Start`.
    pub fn new(identity: Identity, now: Timestamp) -> Self {
        Self {
            identity,
            state: DialogueState::Start,
            collected: CollectedData::new(),
            pending_transaction_count: 0,
            current_transaction_index: 0,
            current_field_index: 0,
            started_at: now,
            last_activity: now,
            complaint_id: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn state(&self) -> DialogueState {
        self.state
    }

    pub fn collected(&self) -> &CollectedData {
        &self.collected
    }

    pub fn pending_transaction_count(&self) -> usize {
        self.pending_transaction_count
    }

    /// 0-based index of the transaction being collected.
    pub fn current_transaction_index(&self) -> usize {
        self.current_transaction_index
    }

    pub fn current_field_index(&self) -> usize {
        self.current_field_index
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    pub fn last_activity(&self) -> &Timestamp {
        &self.last_activity
    }

    pub fn complaint_id(&self) -> Option<&ComplaintId> {
        self.complaint_id.as_ref()
    }

    pub fn is_finalized(&self) -> bool {
        self.complaint_id.is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Activity
    // ─────────────────────────────────────────────────────────────────────────

    /// Records inbound activity.
    pub fn touch(&mut self, now: Timestamp) {
        self.last_activity = now;
    }

    /// True when idle for at least `threshold`.
    pub fn is_expired(&self, now: Timestamp, threshold: Duration) -> bool {
        now.duration_since(&self.last_activity) >= threshold
    }

    /// # Errors
    ///
    /// - `SessionExpired` if idle for at least `threshold`
    pub fn ensure_active(&self, now: Timestamp, threshold: Duration) -> Result<(), IntakeError> {
        if self.is_expired(now, threshold) {
            Err(IntakeError::SessionExpired)
        } else {
            Ok(())
        }
    }

    /// Drops everything collected and returns to `Start`.
    ///
    /// This is a reset, not a state transition; the identity and the
    /// activity clock carry over.
    pub fn restart(&mut self) {
        let last_activity = self.last_activity;
        *self = Self::new(self.identity.clone(), last_activity);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dialogue steps
    // ─────────────────────────────────────────────────────────────────────────

    /// The greeting has been sent; wait for the money-loss answer.
    pub fn begin(&mut self) -> Result<(), IntakeError> {
        self.transition(DialogueState::AwaitingMoneyLossConfirmation)
    }

    /// Money loss confirmed; start collecting personal details.
    pub fn start_personal_info(&mut self) -> Result<(), IntakeError> {
        self.transition(DialogueState::PersonalInfo)?;
        self.current_field_index = 0;
        Ok(())
    }

    /// The field the next message is validated against, if any.
    pub fn expected_field(&self) -> Option<ExpectedField> {
        match self.state {
            DialogueState::PersonalInfo => {
                PersonalField::from_index(self.current_field_index).map(ExpectedField::Personal)
            }
            DialogueState::TransactionDetails
                if self.current_transaction_index < self.pending_transaction_count =>
            {
                TransactionField::from_index(self.current_field_index).map(|field| {
                    ExpectedField::Transaction {
                        index: self.current_transaction_index,
                        field,
                    }
                })
            }
            _ => None,
        }
    }

    /// Stores an already validated value for the expected field and advances
    /// exactly one cursor step.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if no field is expected in the current state
    pub fn accept_value(&mut self, value: String) -> Result<Progress, IntakeError> {
        let expected = self.expected_field().ok_or_else(|| {
            IntakeError::InvalidTransition(format!(
                "no field is expected in state {}",
                self.state.as_str()
            ))
        })?;

        match expected {
            ExpectedField::Personal(field) => {
                let last = self.current_field_index + 1 == PERSONAL_FIELD_COUNT;
                let next_state = if last {
                    Some(self.state.transition_to(DialogueState::AwaitingTransactionCount)?)
                } else {
                    None
                };

                self.collected.set_personal(field, value);
                match next_state {
                    Some(state) => {
                        self.state = state;
                        self.current_field_index = 0;
                        Ok(Progress::PersonalComplete)
                    }
                    None => {
                        self.current_field_index += 1;
                        Ok(Progress::NextField)
                    }
                }
            }
            ExpectedField::Transaction { index, field } => {
                let last_field = self.current_field_index + 1 == TRANSACTION_FIELD_COUNT;
                let last_transaction = index + 1 >= self.pending_transaction_count;
                let next_state = if last_field && last_transaction {
                    Some(self.state.transition_to(DialogueState::Confirm)?)
                } else {
                    None
                };

                if !self.collected.set_transaction_value(index, field, value) {
                    return Err(IntakeError::InvalidTransition(format!(
                        "transaction {} is out of sequence",
                        index + 1
                    )));
                }

                if !last_field {
                    self.current_field_index += 1;
                    return Ok(Progress::NextField);
                }

                self.current_field_index = 0;
                match next_state {
                    Some(state) => {
                        self.state = state;
                        Ok(Progress::TransactionsComplete)
                    }
                    None => {
                        self.current_transaction_index += 1;
                        Ok(Progress::NextTransaction {
                            number: self.current_transaction_index + 1,
                        })
                    }
                }
            }
        }
    }

    /// Sets the declared number of transactions and enters the loop.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` outside `AwaitingTransactionCount` or for zero
    pub fn set_transaction_count(&mut self, count: usize) -> Result<(), IntakeError> {
        if count == 0 {
            return Err(IntakeError::InvalidTransition(
                "transaction count must be positive".to_string(),
            ));
        }
        self.transition(DialogueState::TransactionDetails)?;
        self.collected.clear_transactions();
        self.pending_transaction_count = count;
        self.current_transaction_index = 0;
        self.current_field_index = 0;
        Ok(())
    }

    pub fn open_editor(&mut self) -> Result<(), IntakeError> {
        self.transition(DialogueState::Edit)
    }

    pub fn close_editor(&mut self) -> Result<(), IntakeError> {
        self.transition(DialogueState::Confirm)
    }

    /// Replaces one stored value. Only allowed while editing.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` outside `Edit`
    /// - `UnknownAddress` if the address holds no value
    pub fn overwrite(&mut self, address: &SerialAddress, value: String) -> Result<(), IntakeError> {
        if self.state != DialogueState::Edit {
            return Err(IntakeError::InvalidTransition(format!(
                "cannot edit in state {}",
                self.state.as_str()
            )));
        }
        address.resolve(&self.collected)?;

        match *address {
            SerialAddress::Personal(field) => self.collected.set_personal(field, value),
            SerialAddress::Transaction { transaction, field } => {
                self.collected
                    .set_transaction_value(transaction - 1, field, value);
            }
        }
        Ok(())
    }

    /// Marks the session finalized with the id of its materialized complaint.
    ///
    /// # Errors
    ///
    /// - `AlreadyFinalized` if a complaint id is already recorded
    /// - `InvalidTransition` outside `Confirm`
    pub fn complete(&mut self, complaint_id: ComplaintId) -> Result<(), IntakeError> {
        if self.complaint_id.is_some() {
            return Err(IntakeError::AlreadyFinalized);
        }
        self.transition(DialogueState::Done)?;
        self.complaint_id = Some(complaint_id);
        Ok(())
    }

    fn transition(&mut self, target: DialogueState) -> Result<(), IntakeError> {
        self.state = self.state.transition_to(target)?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    mod construction {
        use super::*;

        #[test]
        fn new_session_starts_empty() {
            let session = IntakeSession::new(identity(), at(0));
            assert_eq!(session.state(), DialogueState::Start);
            assert_eq!(session.collected().value_count(), 0);
            assert_eq!(session.expected_field(), None);
            assert!(!session.is_finalized());
        }

        #[test]
        fn restart_keeps_identity_and_drops_data() {
            let mut session = with_personal_info();
            session.touch(at(5));
            session.restart();
            assert_eq!(session.state(), DialogueState::Start);
            assert_eq!(session.identity(), &identity());
            assert_eq!(session.collected().value_count(), 0);
            assert_eq!(session.last_activity(), &at(5));
        }

        #[test]
        fn round_trips_through_json() {
            let session = at_confirm(1);
            let json = serde_json::to_string(&session).unwrap();
            let back: IntakeSession = serde_json::from_str(&json).unwrap();
            assert_eq!(back, session);
        }
    }

    mod expiry {
        use super::*;

        #[test]
        fn expires_at_threshold() {
            let session = IntakeSession::new(identity(), at(0));
            let threshold = Duration::minutes(30);
            assert!(session.ensure_active(at(29), threshold).is_ok());
            assert_eq!(
                session.ensure_active(at(30), threshold),
                Err(IntakeError::SessionExpired)
            );
        }

        #[test]
        fn touch_resets_idle_clock() {
            let mut session = IntakeSession::new(identity(), at(0));
            session.touch(at(25));
            assert!(!session.is_expired(at(50), Duration::minutes(30)));
        }
    }

    mod collection {
        use super::*;

        #[test]
        fn personal_block_walks_fields_in_order() {
            let mut session = IntakeSession::new(identity(), at(0));
            session.begin().unwrap();
            session.start_personal_info().unwrap();

            for (i, field) in PersonalField::ALL.iter().enumerate() {
                assert_eq!(session.expected_field(), Some(ExpectedField::Personal(*field)));
                let progress = session.accept_value(format!("v{i}")).unwrap();
                if i + 1 < PERSONAL_FIELD_COUNT {
                    assert_eq!(progress, Progress::NextField);
                } else {
                    assert_eq!(progress, Progress::PersonalComplete);
                }
            }
            assert_eq!(session.state(), DialogueState::AwaitingTransactionCount);
        }

        #[test]
        fn transaction_loop_collects_count_times_six_values() {
            let session = at_confirm(3);
            assert_eq!(session.state(), DialogueState::Confirm);
            assert_eq!(session.collected().transactions().len(), 3);
            assert!(session
                .collected()
                .transactions()
                .iter()
                .all(|t| t.is_complete()));
            assert_eq!(
                session.collected().value_count(),
                PERSONAL_FIELD_COUNT + 3 * TRANSACTION_FIELD_COUNT
            );
        }

        #[test]
        fn transaction_index_increments_by_one() {
            let mut session = with_personal_info();
            session.set_transaction_count(2).unwrap();
            for _ in 0..5 {
                session.accept_value("x".into()).unwrap();
            }
            assert_eq!(session.current_transaction_index(), 0);
            assert_eq!(
                session.accept_value("x".into()).unwrap(),
                Progress::NextTransaction { number: 2 }
            );
            assert_eq!(session.current_transaction_index(), 1);
            assert_eq!(session.current_field_index(), 0);
        }

        #[test]
        fn accept_outside_collection_leaves_session_untouched() {
            let mut session = at_confirm(1);
            let before = session.clone();
            assert!(matches!(
                session.accept_value("x".into()),
                Err(IntakeError::InvalidTransition(_))
            ));
            assert_eq!(session, before);
        }

        #[test]
        fn zero_transactions_rejected() {
            let mut session = with_personal_info();
            assert!(session.set_transaction_count(0).is_err());
            assert_eq!(session.state(), DialogueState::AwaitingTransactionCount);
        }
    }

    mod editing {
        use super::*;

        #[test]
        fn overwrite_touches_only_the_addressed_value() {
            let mut session = at_confirm(2);
            session.open_editor().unwrap();
            let address = SerialAddress::parse("2.2.5").unwrap();
            let before = session.collected().clone();

            session.overwrite(&address, "₹999.00".into()).unwrap();

            assert_eq!(address.resolve(session.collected()), Ok("₹999.00"));
            let first = SerialAddress::parse("2.1.5").unwrap();
            assert_eq!(
                first.resolve(session.collected()),
                first.resolve(&before)
            );
            assert_eq!(session.collected().value_count(), before.value_count());
        }

        #[test]
        fn overwrite_requires_edit_mode() {
            let mut session = at_confirm(1);
            let address = SerialAddress::parse("1").unwrap();
            assert!(session.overwrite(&address, "New Name".into()).is_err());
        }

        #[test]
        fn overwrite_of_missing_transaction_is_unknown() {
            let mut session = at_confirm(1);
            session.open_editor().unwrap();
            let address = SerialAddress::parse("2.2.1").unwrap();
            assert!(matches!(
                session.overwrite(&address, "01-01-2025".into()),
                Err(IntakeError::UnknownAddress { .. })
            ));
        }
    }

    mod finalization {
        use super::*;

        #[test]
        fn complete_is_one_shot() {
            let mut session = at_confirm(1);
            let id = ComplaintId::new();
            session.complete(id).unwrap();
            assert_eq!(session.state(), DialogueState::Done);
            assert_eq!(session.complaint_id(), Some(&id));
            assert_eq!(
                session.complete(ComplaintId::new()),
                Err(IntakeError::AlreadyFinalized)
            );
            assert_eq!(session.complaint_id(), Some(&id));
        }

        #[test]
        fn complete_requires_confirm() {
            let mut session = with_personal_info();
            assert!(matches!(
                session.complete(ComplaintId::new()),
                Err(IntakeError::InvalidTransition(_))
            ));
            assert!(!session.is_finalized());
        }
    }
}
