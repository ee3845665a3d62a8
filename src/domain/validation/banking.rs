//! Validators for transaction and banking details.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{FieldResult, Rejection, ValidationContext};

/// Largest amount accepted for one transaction: one crore rupees.
pub const MAX_AMOUNT_RUPEES: i64 = 10_000_000;

/// Largest number of transactions one complaint may declare.
pub const MAX_TRANSACTION_COUNT: usize = 100;

static BANK_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9 ]+$").expect("bank name pattern is valid"));

static ACCOUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{9,18}$").expect("account pattern is valid"));

static SBI_ACCOUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0{1,6}[0-9]{11,16}$").expect("sbi pattern is valid"));

static TRANSACTION_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{8,50}$").expect("transaction id pattern is valid"));

static UPI_REFERENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{12}$").expect("upi pattern is valid"));

static PREFIXED_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{3,}[0-9]{6,}$").expect("prefixed pattern is valid"));

/// Bank-specific account number conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountFormat {
    /// State Bank of India: 17 digits padded with leading zeros.
    Sbi,
    /// ICICI Bank: exactly 12 digits.
    Icici,
    /// Any other 9–18 digit account number.
    Generic,
}

impl fmt::Display for AccountFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AccountFormat::Sbi => "SBI",
            AccountFormat::Icici => "ICICI",
            AccountFormat::Generic => "generic",
        };
        write!(f, "{}", s)
    }
}

/// Recognised shapes of transaction references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionIdFormat {
    /// 12-digit UPI reference number (RRN).
    UpiReference,
    /// Purely numeric reference.
    Numeric,
    /// Letters followed by digits, e.g. `TXN1234567890`.
    Prefixed,
    /// Mixed letters and digits, e.g. `1234ABCD5678EFGH`.
    Alphanumeric,
    /// Alphanumeric with dashes or underscores.
    Extended,
}

/// Classifies an already-cleaned account number, `None` if it is not one.
pub fn classify_account_number(digits: &str) -> Option<AccountFormat> {
    if !ACCOUNT_PATTERN.is_match(digits) {
        return None;
    }
    if digits.len() == 17 && SBI_ACCOUNT_PATTERN.is_match(digits) {
        Some(AccountFormat::Sbi)
    } else if digits.len() == 12 {
        Some(AccountFormat::Icici)
    } else {
        Some(AccountFormat::Generic)
    }
}

/// Classifies an already-cleaned transaction reference.
pub fn classify_transaction_id(id: &str) -> Option<TransactionIdFormat> {
    if !TRANSACTION_ID_PATTERN.is_match(id) {
        return None;
    }
    let format = if UPI_REFERENCE_PATTERN.is_match(id) {
        TransactionIdFormat::UpiReference
    } else if id.chars().all(|c| c.is_ascii_digit()) {
        TransactionIdFormat::Numeric
    } else if PREFIXED_ID_PATTERN.is_match(id) {
        TransactionIdFormat::Prefixed
    } else if id.chars().all(|c| c.is_ascii_alphanumeric()) {
        TransactionIdFormat::Alphanumeric
    } else {
        TransactionIdFormat::Extended
    };
    Some(format)
}

/// Number of fraudulent transactions, 1 to 100.
pub fn validate_transaction_count(raw: &str, _ctx: &ValidationContext) -> FieldResult {
    let count: i64 = raw.trim().parse().map_err(|_| {
        Rejection::new("Please enter a valid number for Transaction count")
    })?;
    if count <= 0 {
        return Err(Rejection::new("Transaction count must be a positive number"));
    }
    if count > MAX_TRANSACTION_COUNT as i64 {
        return Err(Rejection::new(
            "Transaction count seems too large. Please enter a valid number",
        ));
    }
    Ok(count.to_string())
}

/// Bank name: 2–100 characters of letters, digits and spaces, upper-cased.
pub fn validate_bank_name(raw: &str, _ctx: &ValidationContext) -> FieldResult {
    let name = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let len = name.chars().count();
    if len < 2 {
        return Err(Rejection::new("Bank name must be at least 2 characters long"));
    }
    if len > 100 {
        return Err(Rejection::new("Bank name must not exceed 100 characters"));
    }
    if !BANK_NAME_PATTERN.is_match(&name) {
        return Err(Rejection::new(
            "Bank name should contain only alphabets, digits, and spaces",
        ));
    }
    Ok(name.to_uppercase())
}

/// Bank account number: 9–18 digits, whitespace ignored.
pub fn validate_account_number(raw: &str, _ctx: &ValidationContext) -> FieldResult {
    let digits: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    match classify_account_number(&digits) {
        Some(_) => Ok(digits),
        None => Err(Rejection::new(
            "Invalid account number. Formats:\n\
             • Generic: 9-18 digits\n\
             • SBI: 17 digits with leading zeros\n\
             • ICICI: 12 digits",
        )),
    }
}

/// Amount debited in rupees: greater than 0 and at most one crore.
///
/// A `₹`/`Rs`/`INR` prefix, thousands separators and spaces are ignored.
/// The stored value is `₹` followed by two decimal places.
pub fn validate_amount(raw: &str, _ctx: &ValidationContext) -> FieldResult {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();
    let without_symbol = if let Some(rest) = trimmed.strip_prefix('₹') {
        rest
    } else if lower.starts_with("inr") {
        &trimmed[3..]
    } else if lower.starts_with("rs.") {
        &trimmed[3..]
    } else if lower.starts_with("rs") {
        &trimmed[2..]
    } else {
        trimmed
    };
    let cleaned: String = without_symbol
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    let amount = Decimal::from_str(&cleaned)
        .map_err(|_| Rejection::new("Please enter a valid amount (numbers only)"))?;
    if amount > Decimal::from(MAX_AMOUNT_RUPEES) {
        return Err(Rejection::new(
            "Amount cannot exceed ₹1,00,00,000 (one crore). Please verify",
        ));
    }

    // Positivity applies to the stored, rounded value.
    let mut rounded = amount.round_dp(2);
    if rounded <= Decimal::ZERO {
        return Err(Rejection::new("Amount must be greater than 0"));
    }
    rounded.rescale(2);
    Ok(format!("₹{}", rounded))
}

/// Transaction ID or UTR/UPI reference: 8–50 characters, spaces ignored.
pub fn validate_transaction_id(raw: &str, _ctx: &ValidationContext) -> FieldResult {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if !(8..=50).contains(&len) {
        return Err(Rejection::new("Transaction ID must be between 8-50 characters"));
    }

    let cleaned: String = trimmed.chars().filter(|c| *c != ' ').collect();
    match classify_transaction_id(&cleaned) {
        Some(_) => Ok(cleaned.to_uppercase()),
        None => Err(Rejection::new(
            "Invalid transaction ID format. Examples:\n\
             • UPI reference: 412345678901 (12 digits)\n\
             • Transaction ID: TXN1234567890\n\
             • Alphanumeric: 1234ABCD5678EFGH",
        )),
    }
}
