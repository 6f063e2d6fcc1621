use serde::{Deserialize, Serialize};

use super::{Cents, Inventory, Ledger};

/// Outcome of comparing available balance against total stock valuation.
/// Derived from the current datasets on every call; never cached and never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub total_income: Cents,
    pub total_expense: Cents,
    pub balance: Cents,
    pub total_stock_value: Cents,
    /// True when the balance is strictly below the stock value.
    /// A balance that exactly covers the stock is not flagged.
    pub insufficient_funds: bool,
}

/// Compare the ledger balance against the inventory valuation.
/// Pure: no mutation, no io, deterministic for a given pair of datasets.
/// Building a warning message out of the flag is a presentation concern.
pub fn reconcile(ledger: &Ledger, inventory: &Inventory) -> ReconciliationReport {
    let summary = ledger.summarize();
    let total_stock_value = inventory.valuation();

    ReconciliationReport {
        total_income: summary.total_income,
        total_expense: summary.total_expense,
        balance: summary.balance,
        total_stock_value,
        insufficient_funds: summary.balance < total_stock_value,
    }
}
