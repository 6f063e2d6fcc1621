use serde::{Deserialize, Serialize};

use super::Cents;

/// A single inventory row. `code` is the lookup key; the base design does
/// not enforce uniqueness, so adjustments touch every matching row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    pub code: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price_cents: Cents,
}

impl StockItem {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        quantity: i64,
        unit_price_cents: Cents,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            quantity,
            unit_price_cents,
        }
    }

    /// Value of this row: quantity x unit price.
    pub fn value(&self) -> Cents {
        self.quantity * self.unit_price_cents
    }
}

/// Ordered collection of stock items. The inventory owns its rows
/// exclusively; mutations are appending an item and adjusting quantities
/// by code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<StockItem>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an inventory from already-parsed rows, preserving their order.
    pub fn from_rows(items: Vec<StockItem>) -> Self {
        Self { items }
    }

    /// Append a stock item at the end of the sequence.
    pub fn append(&mut self, item: StockItem) {
        self.items.push(item);
    }

    pub fn rows(&self) -> &[StockItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.items.iter().any(|item| item.code == code)
    }

    /// Add `delta` to the quantity of every row whose code matches.
    /// Returns the number of rows touched; zero matches leaves the
    /// inventory unchanged.
    pub fn adjust_quantity(&mut self, code: &str, delta: i64) -> usize {
        let mut matched = 0;
        for item in &mut self.items {
            if item.code == code {
                item.quantity += delta;
                matched += 1;
            }
        }
        matched
    }

    /// Total stock value across all rows. An empty inventory values to zero.
    pub fn valuation(&self) -> Cents {
        self.items.iter().map(StockItem::value).sum()
    }
}
