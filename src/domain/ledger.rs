use serde::{Deserialize, Serialize};

use super::{Cents, Transaction, TransactionKind};

/// Aggregate totals derived from the current ledger rows.
/// Recomputed on every call, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub total_income: Cents,
    pub total_expense: Cents,
    /// total_income - total_expense
    pub balance: Cents,
}

/// Ordered collection of financial transactions. The ledger owns its rows
/// exclusively; the only mutation is appending a transaction at the end.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from already-parsed rows, preserving their order.
    pub fn from_rows(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Append a transaction at the end of the sequence.
    pub fn append(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Total income, total expense and their difference.
    /// An empty ledger summarizes to all zeros.
    pub fn summarize(&self) -> LedgerSummary {
        let mut total_income = 0;
        let mut total_expense = 0;

        for tx in &self.transactions {
            match tx.kind {
                TransactionKind::Income => total_income += tx.amount_cents,
                TransactionKind::Expense => total_expense += tx.amount_cents,
            }
        }

        LedgerSummary {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        }
    }
}
