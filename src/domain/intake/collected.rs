//! Values collected so far in a dialogue.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::field::{PersonalField, TransactionField, TRANSACTION_FIELD_COUNT};

/// Validated values of one transaction, keyed by field in collection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionRecord {
    values: BTreeMap<TransactionField, String>,
}

impl TransactionRecord {
    pub fn get(&self, field: TransactionField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn set(&mut self, field: TransactionField, value: String) {
        self.values.insert(field, value);
    }

    /// True once all six fields hold a value.
    pub fn is_complete(&self) -> bool {
        self.values.len() == TRANSACTION_FIELD_COUNT
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The draft complaint: personal details plus the ordered transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedData {
    personal: BTreeMap<PersonalField, String>,
    transactions: Vec<TransactionRecord>,
}

impl CollectedData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn personal(&self, field: PersonalField) -> Option<&str> {
        self.personal.get(&field).map(String::as_str)
    }

    pub fn set_personal(&mut self, field: PersonalField, value: String) {
        self.personal.insert(field, value);
    }

    pub fn transactions(&self) -> &[TransactionRecord] {
        &self.transactions
    }

    /// Transaction at a 0-based index.
    pub fn transaction(&self, index: usize) -> Option<&TransactionRecord> {
        self.transactions.get(index)
    }

    /// Stores a transaction value, opening the record when `index` is the
    /// next one in sequence. Returns `false` if `index` skips ahead.
    pub fn set_transaction_value(
        &mut self,
        index: usize,
        field: TransactionField,
        value: String,
    ) -> bool {
        if index == self.transactions.len() {
            self.transactions.push(TransactionRecord::default());
        }
        match self.transactions.get_mut(index) {
            Some(record) => {
                record.set(field, value);
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear_transactions(&mut self) {
        self.transactions.clear();
    }

    /// Total number of validated values held.
    pub fn value_count(&self) -> usize {
        self.personal.len() + self.transactions.iter().map(TransactionRecord::len).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_values_open_records_in_sequence() {
        let mut data = CollectedData::new();
        assert!(data.set_transaction_value(0, TransactionField::Date, "01-01-2024".into()));
        assert!(data.set_transaction_value(1, TransactionField::Date, "02-01-2024".into()));
        assert!(!data.set_transaction_value(3, TransactionField::Date, "03-01-2024".into()));

        assert_eq!(data.transactions().len(), 2);
        assert_eq!(
            data.transaction(1).and_then(|t| t.get(TransactionField::Date)),
            Some("02-01-2024")
        );
    }

    #[test]
    fn record_completes_after_six_fields() {
        let mut record = TransactionRecord::default();
        for field in TransactionField::ALL {
            assert!(!record.is_complete());
            record.set(field, "x".into());
        }
        assert!(record.is_complete());
    }

    #[test]
    fn serializes_with_stable_keys() {
        let mut data = CollectedData::new();
        data.set_personal(PersonalField::Mobile, "+919876543210".into());
        data.set_transaction_value(0, TransactionField::AccountNumber, "123456789012".into());

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["personal"]["mobile_no"], "+919876543210");
        assert_eq!(json["transactions"][0]["account_no"], "123456789012");

        let back: CollectedData = serde_json::from_value(json).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn value_count_spans_both_blocks() {
        let mut data = CollectedData::new();
        data.set_personal(PersonalField::Name, "Asha Rao".into());
        data.set_transaction_value(0, TransactionField::Date, "01-01-2024".into());
        data.set_transaction_value(0, TransactionField::Time, "10:00 AM".into());
        assert_eq!(data.value_count(), 3);
    }
}
