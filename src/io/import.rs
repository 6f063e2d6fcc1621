use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::{
    Inventory, Ledger, StockItem, Transaction, TransactionKind, parse_cents,
};

use super::{INVENTORY_HEADERS, LEDGER_HEADERS};

/// A row rejected at parse time. Malformed rows are never constructed as
/// domain records.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub field: &'static str,
    pub error: String,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.field, self.error)
    }
}

/// Read a ledger dataset from CSV. The header row must match
/// `LEDGER_HEADERS` exactly; any malformed row fails the whole load so a
/// later save cannot silently drop rows.
pub fn read_ledger<R: Read>(reader: R) -> Result<Ledger> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    check_headers(&mut csv_reader, &LEDGER_HEADERS)?;

    let mut rows = Vec::new();
    let mut errors = Vec::new();

    for (line_num, result) in csv_reader.records().enumerate() {
        let line = line_num + 2; // +2 for header and 0-indexing

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                errors.push(RowError {
                    line,
                    field: "row",
                    error: format!("CSV parse error: {}", e),
                });
                continue;
            }
        };

        match parse_ledger_row(&record, line) {
            Ok(tx) => rows.push(tx),
            Err(e) => errors.push(e),
        }
    }

    fail_on_row_errors("ledger", errors)?;
    Ok(Ledger::from_rows(rows))
}

/// Read an inventory dataset from CSV, with the same contract as
/// `read_ledger`.
pub fn read_inventory<R: Read>(reader: R) -> Result<Inventory> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    check_headers(&mut csv_reader, &INVENTORY_HEADERS)?;

    let mut rows = Vec::new();
    let mut errors = Vec::new();

    for (line_num, result) in csv_reader.records().enumerate() {
        let line = line_num + 2;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                errors.push(RowError {
                    line,
                    field: "row",
                    error: format!("CSV parse error: {}", e),
                });
                continue;
            }
        };

        match parse_inventory_row(&record, line) {
            Ok(item) => rows.push(item),
            Err(e) => errors.push(e),
        }
    }

    fail_on_row_errors("inventory", errors)?;
    Ok(Inventory::from_rows(rows))
}

/// Load a ledger dataset from a CSV file.
pub fn load_ledger(path: &Path) -> Result<Ledger> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open ledger dataset: {}", path.display()))?;
    read_ledger(file).with_context(|| format!("Failed to load ledger dataset: {}", path.display()))
}

/// Load an inventory dataset from a CSV file.
pub fn load_inventory(path: &Path) -> Result<Inventory> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open inventory dataset: {}", path.display()))?;
    read_inventory(file)
        .with_context(|| format!("Failed to load inventory dataset: {}", path.display()))
}

fn parse_ledger_row(record: &StringRecord, line: usize) -> Result<Transaction, RowError> {
    let date_str = field(record, 0, "date", line)?;
    let kind_str = field(record, 1, "kind", line)?;
    let amount_str = field(record, 2, "amount", line)?;
    let note = field(record, 3, "note", line)?;

    let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|e| RowError {
        line,
        field: "date",
        error: format!("Invalid date '{}': {}", date_str, e),
    })?;

    let kind = TransactionKind::from_str(kind_str.trim()).ok_or_else(|| RowError {
        line,
        field: "kind",
        error: format!("Unknown kind '{}' (expected income or expense)", kind_str),
    })?;

    let amount_cents = parse_cents(amount_str).map_err(|e| RowError {
        line,
        field: "amount",
        error: format!("Invalid amount '{}': {}", amount_str, e),
    })?;

    Ok(Transaction::new(date, kind, amount_cents, note))
}

fn parse_inventory_row(record: &StringRecord, line: usize) -> Result<StockItem, RowError> {
    let code = field(record, 0, "code", line)?;
    let name = field(record, 1, "name", line)?;
    let quantity_str = field(record, 2, "quantity", line)?;
    let price_str = field(record, 3, "unit_price", line)?;

    let quantity: i64 = quantity_str.trim().parse().map_err(|_| RowError {
        line,
        field: "quantity",
        error: format!("Invalid quantity '{}'", quantity_str),
    })?;

    let unit_price_cents = parse_cents(price_str).map_err(|e| RowError {
        line,
        field: "unit_price",
        error: format!("Invalid unit price '{}': {}", price_str, e),
    })?;

    Ok(StockItem::new(code, name, quantity, unit_price_cents))
}

fn field<'r>(
    record: &'r StringRecord,
    index: usize,
    name: &'static str,
    line: usize,
) -> Result<&'r str, RowError> {
    record.get(index).ok_or_else(|| RowError {
        line,
        field: name,
        error: "Missing field".to_string(),
    })
}

fn check_headers<R: Read>(csv_reader: &mut csv::Reader<R>, expected: &[&str]) -> Result<()> {
    let headers = csv_reader.headers().context("Failed to read CSV header")?;
    let actual: Vec<String> = headers
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    if actual != expected {
        anyhow::bail!(
            "Unexpected columns [{}] (expected [{}])",
            actual.join(", "),
            expected.join(", ")
        );
    }
    Ok(())
}

fn fail_on_row_errors(dataset: &str, errors: Vec<RowError>) -> Result<()> {
    if errors.is_empty() {
        return Ok(());
    }

    let detail: Vec<String> = errors.iter().map(RowError::to_string).collect();
    anyhow::bail!(
        "{} malformed row(s) in {} dataset:\n  {}",
        errors.len(),
        dataset,
        detail.join("\n  ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_ledger() {
        let csv = "date,kind,amount,note\n\
                   2024-01-01,income,1000,salary\n\
                   2024-01-02,expense,40.50,supplies\n";

        let ledger = read_ledger(csv.as_bytes()).unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.rows()[0].amount_cents, 100000);
        assert_eq!(ledger.rows()[1].kind, TransactionKind::Expense);
        assert_eq!(ledger.rows()[1].amount_cents, 4050);
    }

    #[test]
    fn test_read_ledger_rejects_malformed_rows() {
        let csv = "date,kind,amount,note\n\
                   2024-01-01,income,1000,salary\n\
                   2024-01-02,transfer,40,oops\n\
                   not-a-date,income,5,x\n";

        let err = read_ledger(csv.as_bytes()).unwrap_err();
        let message = format!("{}", err);
        assert!(message.contains("2 malformed row(s)"), "{}", message);
        assert!(message.contains("line 3: kind"), "{}", message);
        assert!(message.contains("line 4: date"), "{}", message);
    }

    #[test]
    fn test_read_ledger_rejects_unexpected_columns() {
        let csv = "date,type,amount,note\n";
        let err = read_ledger(csv.as_bytes()).unwrap_err();
        assert!(format!("{}", err).contains("Unexpected columns"));
    }

    #[test]
    fn test_read_inventory() {
        let csv = "code,name,quantity,unit_price\n\
                   A1,Widget,10,50\n\
                   B1,Gadget,5,30.25\n";

        let inventory = read_inventory(csv.as_bytes()).unwrap();
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.rows()[0].quantity, 10);
        assert_eq!(inventory.rows()[0].unit_price_cents, 5000);
        assert_eq!(inventory.rows()[1].unit_price_cents, 3025);
    }

    #[test]
    fn test_read_inventory_rejects_missing_field() {
        let csv = "code,name,quantity,unit_price\n\
                   A1,Widget,10\n";

        let err = read_inventory(csv.as_bytes()).unwrap_err();
        let message = format!("{}", err);
        assert!(message.contains("line 2"), "{}", message);
    }

    #[test]
    fn test_read_inventory_accepts_negative_quantity() {
        // Validation beyond well-formedness is the session policy's job
        let csv = "code,name,quantity,unit_price\n\
                   A1,Widget,-3,50\n";

        let inventory = read_inventory(csv.as_bytes()).unwrap();
        assert_eq!(inventory.rows()[0].quantity, -3);
    }
}
