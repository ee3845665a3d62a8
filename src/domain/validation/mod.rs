//! Validator set.
//!
//! One pure function per collectible field. Every validator takes the raw
//! message text plus a [`ValidationContext`] and either returns the
//! normalized value to store or a [`Rejection`] whose reason is shown to
//! the user verbatim.

mod banking;
mod dates;
mod personal;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::Timestamp;

pub use banking::{
    classify_account_number, classify_transaction_id, validate_account_number, validate_amount,
    validate_bank_name, validate_transaction_count, validate_transaction_id, AccountFormat,
    TransactionIdFormat, MAX_AMOUNT_RUPEES, MAX_TRANSACTION_COUNT,
};
pub use dates::{validate_dob, validate_transaction_date, validate_transaction_time};
pub use personal::{validate_district, validate_mobile, validate_name, validate_pin_code};

/// Reason a raw input was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{reason}")]
pub struct Rejection {
    reason: String,
}

impl Rejection {
    /// Creates a rejection with a user-facing reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The user-facing reason.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Outcome of a single validator call.
pub type FieldResult = Result<String, Rejection>;

/// Signature shared by every field validator.
pub type Validator = fn(&str, &ValidationContext) -> FieldResult;

/// Inputs a validator may depend on besides the raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    /// Calendar date used for age and recency rules.
    pub today: NaiveDate,
}

impl ValidationContext {
    /// Context evaluated on the given date.
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Context evaluated on the calendar date of `at`.
    pub fn at(at: Timestamp) -> Self {
        Self { today: at.date() }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_displays_reason_verbatim() {
        let rejection = Rejection::new("PIN code cannot start with 0");
        assert_eq!(rejection.to_string(), "PIN code cannot start with 0");
        assert_eq!(rejection.reason(), "PIN code cannot start with 0");
    }

    #[test]
    fn context_at_uses_utc_date() {
        // 2024-01-15T00:00:00Z
        let ctx = ValidationContext::at(Timestamp::from_unix_secs(1705276800));
        assert_eq!(ctx.today, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }
}
