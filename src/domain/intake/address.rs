//! Serial addresses and edit commands.
//!
//! Every collected value has exactly one serial address:
//!
//! ```text
//! address      := personal | transaction
//! personal     := ordinal                      ; 1..=6
//! transaction  := "2" "." ordinal "." ordinal  ; 2.<transaction>.<field>
//! ```
//!
//! Parsing checks the grammar and the static field ranges. Whether the
//! addressed transaction exists is only known against the collected data,
//! so that check happens in [`SerialAddress::resolve`].

use std::fmt;

use super::collected::CollectedData;
use super::errors::IntakeError;
use super::field::{FieldDescriptor, PersonalField, TransactionField};

const PERSONAL_BLOCK: &str = "1";
const TRANSACTION_BLOCK: &str = "2";

/// A parsed serial address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SerialAddress {
    Personal(PersonalField),
    Transaction {
        /// 1-based transaction number.
        transaction: usize,
        field: TransactionField,
    },
}

impl SerialAddress {
    pub fn parse(raw: &str) -> Result<Self, IntakeError> {
        let raw = raw.trim();
        let unknown = |reason: &str| IntakeError::unknown_address(raw, reason);

        let segments: Vec<&str> = raw.split('.').collect();
        if segments
            .iter()
            .any(|s| s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()))
        {
            return Err(unknown(
                "use N for personal info or 2.T.F for transactions",
            ));
        }

        match segments.as_slice() {
            [ordinal] => {
                let field = ordinal
                    .parse()
                    .ok()
                    .and_then(PersonalField::from_ordinal)
                    .ok_or_else(|| unknown("personal fields are numbered 1 to 6"))?;
                Ok(SerialAddress::Personal(field))
            }
            [block, transaction, ordinal] => {
                if *block != TRANSACTION_BLOCK {
                    return Err(unknown("transaction addresses start with 2"));
                }
                let transaction: usize = transaction
                    .parse()
                    .ok()
                    .filter(|n| *n >= 1)
                    .ok_or_else(|| unknown("transactions are numbered from 1"))?;
                let field = ordinal
                    .parse()
                    .ok()
                    .and_then(TransactionField::from_ordinal)
                    .ok_or_else(|| unknown("transaction fields are numbered 1 to 6"))?;
                Ok(SerialAddress::Transaction { transaction, field })
            }
            [PERSONAL_BLOCK, ordinal] => Err(unknown(&format!(
                "personal fields have no 1. prefix, send {} instead of 1.{}",
                ordinal, ordinal
            ))),
            _ => Err(unknown(
                "use N for personal info or 2.T.F for transactions",
            )),
        }
    }

    pub fn descriptor(&self) -> &'static FieldDescriptor {
        match self {
            SerialAddress::Personal(field) => field.descriptor(),
            SerialAddress::Transaction { field, .. } => field.descriptor(),
        }
    }

    /// The stored value this address points at.
    pub fn resolve<'a>(&self, data: &'a CollectedData) -> Result<&'a str, IntakeError> {
        match *self {
            SerialAddress::Personal(field) => data
                .personal(field)
                .ok_or_else(|| IntakeError::unknown_address(self.to_string(), "no value yet")),
            SerialAddress::Transaction { transaction, field } => {
                let record = transaction
                    .checked_sub(1)
                    .and_then(|index| data.transaction(index))
                    .ok_or_else(|| {
                        IntakeError::unknown_address(
                            self.to_string(),
                            format!("transaction {} does not exist", transaction),
                        )
                    })?;
                record
                    .get(field)
                    .ok_or_else(|| IntakeError::unknown_address(self.to_string(), "no value yet"))
            }
        }
    }
}

impl fmt::Display for SerialAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerialAddress::Personal(field) => write!(f, "{}", field.descriptor().ordinal),
            SerialAddress::Transaction { transaction, field } => write!(
                f,
                "{}.{}.{}",
                TRANSACTION_BLOCK,
                transaction,
                field.descriptor().ordinal
            ),
        }
    }
}

/// `<serial_address> = <new_value>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommand {
    pub address: SerialAddress,
    pub value: String,
}

impl EditCommand {
    pub fn parse(text: &str) -> Result<Self, IntakeError> {
        let (address, value) = text
            .split_once('=')
            .ok_or_else(|| IntakeError::MalformedEditCommand(text.trim().to_string()))?;

        let (address, value) = (address.trim(), value.trim());
        if address.is_empty() || value.is_empty() {
            return Err(IntakeError::MalformedEditCommand(text.trim().to_string()));
        }

        Ok(Self {
            address: SerialAddress::parse(address)?,
            value: value.to_string(),
        })
    }

    /// Cheap check used to route free text in confirm mode.
    pub fn looks_like(text: &str) -> bool {
        text.contains('=')
    }
}
