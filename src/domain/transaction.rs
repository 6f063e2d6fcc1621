use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Cents;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money entering the books
    Income,
    /// Money leaving the books
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single ledger row. Rows are immutable once appended; the ledger keeps
/// them in insertion order so a dataset serializes back with its original
/// rows first and appended rows at the end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub amount_cents: Cents,
    pub note: String,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        kind: TransactionKind,
        amount_cents: Cents,
        note: impl Into<String>,
    ) -> Self {
        Self {
            date,
            kind,
            amount_cents,
            note: note.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        for kind in [TransactionKind::Income, TransactionKind::Expense] {
            let s = kind.as_str();
            let parsed = TransactionKind::from_str(s).unwrap();
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn test_kind_parse_is_case_insensitive() {
        assert_eq!(
            TransactionKind::from_str("Income"),
            Some(TransactionKind::Income)
        );
        assert_eq!(
            TransactionKind::from_str("EXPENSE"),
            Some(TransactionKind::Expense)
        );
        assert_eq!(TransactionKind::from_str("transfer"), None);
    }

    #[test]
    fn test_create_transaction() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let tx = Transaction::new(date, TransactionKind::Income, 100000, "salary");

        assert_eq!(tx.date, date);
        assert_eq!(tx.kind, TransactionKind::Income);
        assert_eq!(tx.amount_cents, 100000);
        assert_eq!(tx.note, "salary");
    }
}
