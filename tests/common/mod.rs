// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use saldo::application::{SessionPolicy, SessionService};
use tempfile::TempDir;

pub const LEDGER_HEADER: &str = "date,kind,amount,note\n";
pub const INVENTORY_HEADER: &str = "code,name,quantity,unit_price\n";

/// Ledger and inventory CSV fixtures in a temporary directory.
pub struct Fixture {
    pub dir: TempDir,
    pub ledger_path: PathBuf,
    pub inventory_path: PathBuf,
}

impl Fixture {
    /// Write both datasets with the given CSV contents.
    pub fn write(ledger_csv: &str, inventory_csv: &str) -> Result<Self> {
        let dir = TempDir::new()?;
        let ledger_path = dir.path().join("ledger.csv");
        let inventory_path = dir.path().join("inventory.csv");
        fs::write(&ledger_path, ledger_csv)?;
        fs::write(&inventory_path, inventory_csv)?;
        Ok(Self {
            dir,
            ledger_path,
            inventory_path,
        })
    }

    /// Datasets with header rows only.
    pub fn empty() -> Result<Self> {
        Self::write(LEDGER_HEADER, INVENTORY_HEADER)
    }

    pub fn open(&self, policy: SessionPolicy) -> Result<SessionService> {
        Ok(SessionService::open(
            &self.ledger_path,
            &self.inventory_path,
            policy,
        )?)
    }

    pub fn open_permissive(&self) -> Result<SessionService> {
        self.open(SessionPolicy::permissive())
    }

    pub fn ledger_contents(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.ledger_path)?)
    }

    pub fn inventory_contents(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.inventory_path)?)
    }
}

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}
