//! Field schema.
//!
//! Static declaration of every collectible field: its order, its storage key,
//! its label in summaries, its prompt and its validator. The tables are
//! indexed by the field enums, so dispatch never goes through a name lookup.

use serde::{Deserialize, Serialize};

use crate::domain::validation::{
    validate_account_number, validate_amount, validate_bank_name, validate_district,
    validate_dob, validate_mobile, validate_name, validate_pin_code, validate_transaction_date,
    validate_transaction_id, validate_transaction_time, Validator,
};

/// Number of fields in the personal-info block.
pub const PERSONAL_FIELD_COUNT: usize = 6;

/// Number of fields collected for every transaction.
pub const TRANSACTION_FIELD_COUNT: usize = 6;

/// Static description of one collectible field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Storage key, stable across releases.
    pub key: &'static str,
    /// Short label used in summaries and documents.
    pub label: &'static str,
    /// Question asked when this field is next.
    pub prompt: &'static str,
    /// Validator applied to raw input.
    pub validator: Validator,
    /// 1-based position inside its block; used for serial addresses.
    pub ordinal: usize,
}

/// Fields of the personal-info block, in collection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalField {
    Name,
    #[serde(rename = "mobile_no")]
    Mobile,
    Dob,
    FatherName,
    District,
    PinCode,
}

/// Fields of one transaction, in collection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionField {
    Date,
    Time,
    BankName,
    #[serde(rename = "account_no")]
    AccountNumber,
    Amount,
    TransactionId,
}

pub static PERSONAL_FIELDS: [FieldDescriptor; PERSONAL_FIELD_COUNT] = [
    FieldDescriptor {
        key: "name",
        label: "Name",
        prompt: "Please enter your *full name*:\n_Example: Rajesh Kumar or JEEVIKESH S or jeevikesh .S_",
        validator: validate_name,
        ordinal: 1,
    },
    FieldDescriptor {
        key: "mobile_no",
        label: "Mobile",
        prompt: "Please enter your *mobile number* (10 digits):",
        validator: validate_mobile,
        ordinal: 2,
    },
    FieldDescriptor {
        key: "dob",
        label: "DOB",
        prompt: "Please enter your *Date of Birth* (D-M-YYYY):\n_Examples: 2-3-2001 or 02-03-2001 or 2-03-2001_",
        validator: validate_dob,
        ordinal: 3,
    },
    FieldDescriptor {
        key: "father_name",
        label: "Father's Name",
        prompt: "Please enter your *Father's Name*:",
        validator: validate_name,
        ordinal: 4,
    },
    FieldDescriptor {
        key: "district",
        label: "District",
        prompt: "Please enter your *District*:",
        validator: validate_district,
        ordinal: 5,
    },
    FieldDescriptor {
        key: "pin_code",
        label: "PIN Code",
        prompt: "Please enter your *PIN Code* (6 digits):",
        validator: validate_pin_code,
        ordinal: 6,
    },
];

pub static TRANSACTION_FIELDS: [FieldDescriptor; TRANSACTION_FIELD_COUNT] = [
    FieldDescriptor {
        key: "date",
        label: "Date",
        prompt: "Enter *Transaction Date* (D-M-YYYY):\n_Examples: 25-10-2024 or 2-3-2024_",
        validator: validate_transaction_date,
        ordinal: 1,
    },
    FieldDescriptor {
        key: "time",
        label: "Time",
        prompt: "Enter *Transaction Time*:\n_Examples: 14:30, 2:30 PM, 02:03 pm, 2:3 PM_",
        validator: validate_transaction_time,
        ordinal: 2,
    },
    FieldDescriptor {
        key: "bank_name",
        label: "Bank",
        prompt: "Enter *Bank Name*:",
        validator: validate_bank_name,
        ordinal: 3,
    },
    FieldDescriptor {
        key: "account_no",
        label: "Account",
        prompt: "Enter *Bank Account Number*:\n_Formats:\n• Generic: 9-18 digits (123456789012)\n• SBI: 17 digits with leading zeros\n• ICICI: 12 digits (123456789012)_",
        validator: validate_account_number,
        ordinal: 4,
    },
    FieldDescriptor {
        key: "amount",
        label: "Amount",
        prompt: "Enter *Amount Debited* (in ₹):",
        validator: validate_amount,
        ordinal: 5,
    },
    FieldDescriptor {
        key: "transaction_id",
        label: "Trans ID",
        prompt: "Enter *Transaction ID / Reference Number*:\n_Formats:\n• UPI: 12-digit reference (412345678901)\n• Alphanumeric: 1234ABCD5678EFGH\n• Generic: TXN1234567890_",
        validator: validate_transaction_id,
        ordinal: 6,
    },
];

impl PersonalField {
    /// All personal fields in collection order.
    pub const ALL: [PersonalField; PERSONAL_FIELD_COUNT] = [
        PersonalField::Name,
        PersonalField::Mobile,
        PersonalField::Dob,
        PersonalField::FatherName,
        PersonalField::District,
        PersonalField::PinCode,
    ];

    pub fn descriptor(self) -> &'static FieldDescriptor {
        &PERSONAL_FIELDS[self.index()]
    }

    /// 0-based cursor position.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Field at a 1-based ordinal.
    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        ordinal.checked_sub(1).and_then(Self::from_index)
    }
}

impl TransactionField {
    /// All transaction fields in collection order.
    pub const ALL: [TransactionField; TRANSACTION_FIELD_COUNT] = [
        TransactionField::Date,
        TransactionField::Time,
        TransactionField::BankName,
        TransactionField::AccountNumber,
        TransactionField::Amount,
        TransactionField::TransactionId,
    ];

    pub fn descriptor(self) -> &'static FieldDescriptor {
        &TRANSACTION_FIELDS[self.index()]
    }

    /// 0-based cursor position.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Field at a 1-based ordinal.
    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        ordinal.checked_sub(1).and_then(Self::from_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn personal_descriptors_follow_enum_order() {
        for (i, field) in PersonalField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
            assert_eq!(field.descriptor().ordinal, i + 1);
        }
    }

    #[test]
    fn transaction_descriptors_follow_enum_order() {
        for (i, field) in TransactionField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
            assert_eq!(field.descriptor().ordinal, i + 1);
        }
    }

    #[test]
    fn descriptor_keys_match_serialized_names() {
        for field in PersonalField::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.descriptor().key));
        }
        for field in TransactionField::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.descriptor().key));
        }
    }

    #[test]
    fn ordinals_are_one_based() {
        assert_eq!(PersonalField::from_ordinal(1), Some(PersonalField::Name));
        assert_eq!(PersonalField::from_ordinal(6), Some(PersonalField::PinCode));
        assert_eq!(PersonalField::from_ordinal(0), None);
        assert_eq!(PersonalField::from_ordinal(7), None);
        assert_eq!(TransactionField::from_ordinal(4), Some(TransactionField::AccountNumber));
        assert_eq!(TransactionField::from_ordinal(7), None);
    }

    #[test]
    fn father_name_reuses_name_rules() {
        let ctx = crate::domain::validation::test_support::ctx();
        let validate = PersonalField::FatherName.descriptor().validator;
        assert!(validate("Ramesh Kumar", &ctx).is_ok());
        assert!(validate("Ramesh 2", &ctx).is_err());
    }
}
