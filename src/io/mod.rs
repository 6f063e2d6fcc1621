mod export;
mod import;

pub use export::*;
pub use import::*;

/// Column headers for the ledger dataset.
pub const LEDGER_HEADERS: [&str; 4] = ["date", "kind", "amount", "note"];

/// Column headers for the inventory dataset.
pub const INVENTORY_HEADERS: [&str; 4] = ["code", "name", "quantity", "unit_price"];
