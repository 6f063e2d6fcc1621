use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Inventory, Ledger, ReconciliationReport, format_cents};

use super::{INVENTORY_HEADERS, LEDGER_HEADERS};

/// Report snapshot for the JSON output surface. Monetary fields inside the
/// report are integer cents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSnapshot {
    pub version: String,
    pub as_of: DateTime<Utc>,
    pub report: ReconciliationReport,
}

/// Write a ledger dataset as CSV: original rows unchanged in row order,
/// appended rows at the end. Returns the number of rows written.
pub fn write_ledger<W: Write>(writer: W, ledger: &Ledger) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(LEDGER_HEADERS)?;

    let mut count = 0;
    for tx in ledger.rows() {
        csv_writer.write_record(&[
            tx.date.format("%Y-%m-%d").to_string(),
            tx.kind.as_str().to_string(),
            format_cents(tx.amount_cents),
            tx.note.clone(),
        ])?;
        count += 1;
    }

    csv_writer.flush()?;
    Ok(count)
}

/// Write an inventory dataset as CSV, with the same contract as
/// `write_ledger`.
pub fn write_inventory<W: Write>(writer: W, inventory: &Inventory) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(INVENTORY_HEADERS)?;

    let mut count = 0;
    for item in inventory.rows() {
        csv_writer.write_record(&[
            item.code.clone(),
            item.name.clone(),
            item.quantity.to_string(),
            format_cents(item.unit_price_cents),
        ])?;
        count += 1;
    }

    csv_writer.flush()?;
    Ok(count)
}

/// Save a ledger dataset to a CSV file.
pub fn save_ledger(path: &Path, ledger: &Ledger) -> Result<usize> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create ledger dataset: {}", path.display()))?;
    write_ledger(file, ledger)
        .with_context(|| format!("Failed to save ledger dataset: {}", path.display()))
}

/// Save an inventory dataset to a CSV file.
pub fn save_inventory(path: &Path, inventory: &Inventory) -> Result<usize> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create inventory dataset: {}", path.display()))?;
    write_inventory(file, inventory)
        .with_context(|| format!("Failed to save inventory dataset: {}", path.display()))
}

/// Write a reconciliation report as pretty-printed JSON.
pub fn write_report_json<W: Write>(
    mut writer: W,
    report: &ReconciliationReport,
) -> Result<ReportSnapshot> {
    let snapshot = ReportSnapshot {
        version: env!("CARGO_PKG_VERSION").to_string(),
        as_of: Utc::now(),
        report: *report,
    };

    let json = serde_json::to_string_pretty(&snapshot)?;
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{StockItem, Transaction, TransactionKind, reconcile};
    use crate::io::{read_inventory, read_ledger};

    #[test]
    fn test_ledger_roundtrip_preserves_rows() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let ledger = Ledger::from_rows(vec![
            Transaction::new(date, TransactionKind::Income, 100000, "salary"),
            Transaction::new(date, TransactionKind::Expense, 4050, "supplies"),
        ]);

        let mut buf = Vec::new();
        let count = write_ledger(&mut buf, &ledger).unwrap();
        assert_eq!(count, 2);

        let reloaded = read_ledger(buf.as_slice()).unwrap();
        assert_eq!(reloaded.rows(), ledger.rows());
    }

    #[test]
    fn test_inventory_roundtrip_preserves_rows() {
        let inventory = Inventory::from_rows(vec![
            StockItem::new("A1", "Widget", 10, 5000),
            StockItem::new("A1", "Widget (warehouse)", 2, 5000),
        ]);

        let mut buf = Vec::new();
        write_inventory(&mut buf, &inventory).unwrap();

        let reloaded = read_inventory(buf.as_slice()).unwrap();
        assert_eq!(reloaded.rows(), inventory.rows());
    }

    #[test]
    fn test_empty_datasets_write_header_only() {
        let mut buf = Vec::new();
        write_ledger(&mut buf, &Ledger::new()).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "date,kind,amount,note\n");

        let mut buf = Vec::new();
        write_inventory(&mut buf, &Inventory::new()).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "code,name,quantity,unit_price\n"
        );
    }

    #[test]
    fn test_report_json_contains_flag() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let ledger = Ledger::from_rows(vec![Transaction::new(
            date,
            TransactionKind::Income,
            6000,
            "",
        )]);
        let inventory = Inventory::from_rows(vec![StockItem::new("B1", "Gadget", 5, 3000)]);
        let report = reconcile(&ledger, &inventory);

        let mut buf = Vec::new();
        let snapshot = write_report_json(&mut buf, &report).unwrap();
        assert!(snapshot.report.insufficient_funds);

        let json = String::from_utf8(buf).unwrap();
        assert!(json.contains("\"insufficient_funds\": true"));
        assert!(json.contains("\"total_stock_value\": 15000"));
    }
}
