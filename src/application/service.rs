use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{
    Cents, Inventory, Ledger, ReconciliationReport, StockItem, Transaction, TransactionKind,
    reconcile,
};
use crate::io::{load_inventory, load_ledger, save_inventory, save_ledger};

use super::{AppError, SessionPolicy};

pub type SessionId = Uuid;

/// Per-session handle over one ledger and one inventory dataset.
/// This is the primary interface for any client (CLI, API, TUI, etc.).
///
/// A session owns its datasets exclusively for its whole lifetime; callers
/// that share datasets across sessions must layer their own synchronization
/// on top.
#[derive(Debug)]
pub struct SessionService {
    id: SessionId,
    policy: SessionPolicy,
    ledger_path: PathBuf,
    inventory_path: PathBuf,
    ledger: Ledger,
    inventory: Inventory,
}

impl SessionService {
    /// Load both datasets from disk and start a session over them.
    pub fn open(
        ledger_path: &Path,
        inventory_path: &Path,
        policy: SessionPolicy,
    ) -> Result<Self, AppError> {
        let ledger = load_ledger(ledger_path)?;
        let inventory = load_inventory(inventory_path)?;

        Ok(Self {
            id: Uuid::new_v4(),
            policy,
            ledger_path: ledger_path.to_path_buf(),
            inventory_path: inventory_path.to_path_buf(),
            ledger,
            inventory,
        })
    }

    /// Create empty datasets (header rows only) at the given paths.
    pub fn init(ledger_path: &Path, inventory_path: &Path) -> Result<(), AppError> {
        save_ledger(ledger_path, &Ledger::new())?;
        save_inventory(inventory_path, &Inventory::new())?;
        Ok(())
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn policy(&self) -> SessionPolicy {
        self.policy
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Append a transaction to the ledger, subject to the session policy.
    pub fn add_transaction(
        &mut self,
        date: NaiveDate,
        kind: TransactionKind,
        amount_cents: Cents,
        note: impl Into<String>,
    ) -> Result<(), AppError> {
        if self.policy.reject_negative && amount_cents < 0 {
            return Err(AppError::NegativeAmount(amount_cents));
        }

        self.ledger
            .append(Transaction::new(date, kind, amount_cents, note));
        Ok(())
    }

    /// Append a stock item to the inventory, subject to the session policy.
    pub fn add_item(
        &mut self,
        code: impl Into<String>,
        name: impl Into<String>,
        quantity: i64,
        unit_price_cents: Cents,
    ) -> Result<(), AppError> {
        let code = code.into();

        if self.policy.reject_negative {
            if quantity < 0 {
                return Err(AppError::NegativeQuantity(quantity));
            }
            if unit_price_cents < 0 {
                return Err(AppError::NegativePrice(unit_price_cents));
            }
        }
        if self.policy.strict_codes && self.inventory.contains_code(&code) {
            return Err(AppError::DuplicateCode(code));
        }

        self.inventory
            .append(StockItem::new(code, name, quantity, unit_price_cents));
        Ok(())
    }

    /// Adjust the quantity of every stock row matching `code` by `delta`.
    /// Returns the number of rows touched: zero matches is a no-op under the
    /// permissive policy and an error under `strict_codes`.
    pub fn adjust_quantity(&mut self, code: &str, delta: i64) -> Result<usize, AppError> {
        if self.policy.strict_codes && !self.inventory.contains_code(code) {
            return Err(AppError::UnknownCode(code.to_string()));
        }

        if self.policy.reject_negative {
            let would_underflow = self
                .inventory
                .rows()
                .iter()
                .any(|item| item.code == code && item.quantity + delta < 0);
            if would_underflow {
                return Err(AppError::QuantityBelowZero {
                    code: code.to_string(),
                    delta,
                });
            }
        }

        Ok(self.inventory.adjust_quantity(code, delta))
    }

    /// Recompute the reconciliation report from the current state.
    pub fn report(&self) -> ReconciliationReport {
        reconcile(&self.ledger, &self.inventory)
    }

    /// Serialize both datasets back to their source paths: original rows
    /// unchanged in row order, appended rows at the end.
    pub fn save(&self) -> Result<(), AppError> {
        save_ledger(&self.ledger_path, &self.ledger)?;
        save_inventory(&self.inventory_path, &self.inventory)?;
        Ok(())
    }
}
