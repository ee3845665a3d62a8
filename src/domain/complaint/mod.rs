//! Complaint records.
//!
//! A [`Complaint`] is the immutable result of a finished dialogue. It is
//! built from a session's collected data only when every required field is
//! present, and from then on belongs to the storage collaborator.

mod record;

pub use record::{ComplaintRecord, ComplaintStatus};

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Identity, Timestamp};
use crate::domain::intake::{
    CollectedData, IntakeError, PersonalField, TransactionField, TransactionRecord,
};

/// One fraudulent transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: String,
    pub time: String,
    pub bank_name: String,
    pub account_no: String,
    pub amount: String,
    pub transaction_id: String,
}

impl Transaction {
    fn from_record(record: &TransactionRecord) -> Result<Self, IntakeError> {
        let take = |field: TransactionField| {
            record
                .get(field)
                .map(str::to_string)
                .ok_or(IntakeError::IncompleteDraft(field.descriptor().key))
        };
        Ok(Self {
            date: take(TransactionField::Date)?,
            time: take(TransactionField::Time)?,
            bank_name: take(TransactionField::BankName)?,
            account_no: take(TransactionField::AccountNumber)?,
            amount: take(TransactionField::Amount)?,
            transaction_id: take(TransactionField::TransactionId)?,
        })
    }
}

/// A complete, validated complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
    pub identity: Identity,
    pub name: String,
    pub mobile_no: String,
    pub dob: String,
    pub father_name: String,
    pub district: String,
    pub pin_code: String,
    pub transactions: Vec<Transaction>,
    pub submitted_at: Timestamp,
}

impl Complaint {
    /// Builds the record from a draft.
    ///
    /// # Errors
    ///
    /// - `IncompleteDraft` naming the first missing field
    pub fn from_draft(
        identity: Identity,
        draft: &CollectedData,
        submitted_at: Timestamp,
    ) -> Result<Self, IntakeError> {
        let take = |field: PersonalField| {
            draft
                .personal(field)
                .map(str::to_string)
                .ok_or(IntakeError::IncompleteDraft(field.descriptor().key))
        };

        let name = take(PersonalField::Name)?;
        let mobile_no = take(PersonalField::Mobile)?;
        let dob = take(PersonalField::Dob)?;
        let father_name = take(PersonalField::FatherName)?;
        let district = take(PersonalField::District)?;
        let pin_code = take(PersonalField::PinCode)?;

        if draft.transactions().is_empty() {
            return Err(IntakeError::IncompleteDraft("transactions"));
        }
        let transactions = draft
            .transactions()
            .iter()
            .map(Transaction::from_record)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            identity,
            name,
            mobile_no,
            dob,
            father_name,
            district,
            pin_code,
            transactions,
            submitted_at,
        })
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}
