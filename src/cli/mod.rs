use std::io::stdout;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};

use crate::application::{SessionPolicy, SessionService};
use crate::domain::{ReconciliationReport, TransactionKind, format_cents, parse_cents};
use crate::io::write_report_json;

/// Saldo - Ledger & Stock Reconciliation
#[derive(Parser)]
#[command(name = "saldo")]
#[command(about = "A local-first ledger and stock reconciliation tool")]
#[command(version)]
pub struct Cli {
    /// Ledger dataset path (CSV)
    #[arg(short, long, default_value = "ledger.csv")]
    pub ledger: String,

    /// Inventory dataset path (CSV)
    #[arg(short, long, default_value = "inventory.csv")]
    pub inventory: String,

    /// Reject negative values, duplicate stock codes and unknown codes
    #[arg(long, global = true)]
    pub strict: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create empty ledger and inventory datasets
    Init,

    /// Ledger commands
    #[command(subcommand)]
    Ledger(LedgerCommands),

    /// Stock commands
    #[command(subcommand)]
    Stock(StockCommands),

    /// Print the reconciliation report
    Report {
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Render the financial summary as a bar chart
    Chart {
        /// Maximum bar width in characters
        #[arg(long, default_value = "40")]
        width: usize,
    },
}

#[derive(Subcommand)]
pub enum LedgerCommands {
    /// Append a transaction
    Add {
        /// Transaction kind: income, expense
        kind: String,

        /// Amount (e.g., "50.00" or "50")
        amount: String,

        /// Date of the transaction (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Free-form note
        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// List all transactions
    List,
}

#[derive(Subcommand)]
pub enum StockCommands {
    /// Append a stock item
    Add {
        /// Stock code (lookup key)
        code: String,

        /// Item name
        name: String,

        /// Quantity on hand
        #[arg(short, long)]
        quantity: i64,

        /// Unit price (e.g., "12.50")
        #[arg(short, long)]
        price: String,
    },

    /// Adjust quantities for a stock code by a signed delta
    Adjust {
        /// Stock code
        code: String,

        /// Quantity delta (e.g., 5 or -3)
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },

    /// List all stock items
    List,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let Cli {
            ledger,
            inventory,
            strict,
            verbose,
            command,
        } = self;

        let ledger_path = Path::new(&ledger);
        let inventory_path = Path::new(&inventory);
        let policy = if strict {
            SessionPolicy::strict()
        } else {
            SessionPolicy::permissive()
        };

        match command {
            Commands::Init => {
                SessionService::init(ledger_path, inventory_path)?;
                println!("Datasets initialized: {}, {}", ledger, inventory);
            }

            Commands::Ledger(cmd) => {
                let mut session = open_session(ledger_path, inventory_path, policy, verbose)?;
                run_ledger_command(&mut session, cmd)?;
            }

            Commands::Stock(cmd) => {
                let mut session = open_session(ledger_path, inventory_path, policy, verbose)?;
                run_stock_command(&mut session, cmd)?;
            }

            Commands::Report { format } => {
                let session = open_session(ledger_path, inventory_path, policy, verbose)?;
                run_report_command(&session, &format)?;
            }

            Commands::Chart { width } => {
                let session = open_session(ledger_path, inventory_path, policy, verbose)?;
                print!("{}", render_chart(&session.report(), width));
            }
        }

        Ok(())
    }
}

fn open_session(
    ledger_path: &Path,
    inventory_path: &Path,
    policy: SessionPolicy,
    verbose: bool,
) -> Result<SessionService> {
    let session = SessionService::open(ledger_path, inventory_path, policy)?;
    if verbose {
        eprintln!(
            "[session {}] {} transaction(s), {} stock row(s)",
            session.id(),
            session.ledger().len(),
            session.inventory().len()
        );
    }
    Ok(session)
}

fn run_ledger_command(session: &mut SessionService, cmd: LedgerCommands) -> Result<()> {
    match cmd {
        LedgerCommands::Add {
            kind,
            amount,
            date,
            note,
        } => {
            let kind = TransactionKind::from_str(&kind).ok_or_else(|| {
                anyhow::anyhow!("Invalid kind '{}'. Valid kinds: income, expense", kind)
            })?;

            let amount_cents =
                parse_cents(&amount).context("Invalid amount format. Use '50.00' or '50'")?;

            let date = match date {
                Some(date_str) => parse_date(&date_str)?,
                None => Utc::now().date_naive(),
            };

            session.add_transaction(date, kind, amount_cents, note)?;
            session.save()?;

            println!(
                "Recorded transaction: {} {} ({})",
                kind,
                format_cents(amount_cents),
                date
            );
        }

        LedgerCommands::List => {
            let rows = session.ledger().rows();
            if rows.is_empty() {
                println!("No transactions found.");
            } else {
                println!("{:<12} {:<8} {:>12}  {}", "DATE", "KIND", "AMOUNT", "NOTE");
                println!("{}", "-".repeat(44));
                for tx in rows {
                    println!(
                        "{:<12} {:<8} {:>12}  {}",
                        tx.date.to_string(),
                        tx.kind.as_str(),
                        format_cents(tx.amount_cents),
                        tx.note
                    );
                }
            }
        }
    }
    Ok(())
}

fn run_stock_command(session: &mut SessionService, cmd: StockCommands) -> Result<()> {
    match cmd {
        StockCommands::Add {
            code,
            name,
            quantity,
            price,
        } => {
            let unit_price_cents =
                parse_cents(&price).context("Invalid price format. Use '12.50' or '12'")?;

            session.add_item(code.clone(), name.clone(), quantity, unit_price_cents)?;
            session.save()?;

            println!(
                "Added stock item: {} {} ({} x {})",
                code,
                name,
                quantity,
                format_cents(unit_price_cents)
            );
        }

        StockCommands::Adjust { code, delta } => {
            let matched = session.adjust_quantity(&code, delta)?;
            session.save()?;

            if matched == 0 {
                println!("No stock rows match code '{}'; inventory unchanged.", code);
            } else {
                println!("Adjusted {} row(s) for '{}' by {}.", matched, code, delta);
            }
        }

        StockCommands::List => {
            let rows = session.inventory().rows();
            if rows.is_empty() {
                println!("No stock items found.");
            } else {
                println!(
                    "{:<8} {:<20} {:>8} {:>12} {:>12}",
                    "CODE", "NAME", "QTY", "UNIT PRICE", "VALUE"
                );
                println!("{}", "-".repeat(64));
                for item in rows {
                    println!(
                        "{:<8} {:<20} {:>8} {:>12} {:>12}",
                        item.code,
                        item.name,
                        item.quantity,
                        format_cents(item.unit_price_cents),
                        format_cents(item.value())
                    );
                }
            }
        }
    }
    Ok(())
}

fn run_report_command(session: &SessionService, format: &str) -> Result<()> {
    let report = session.report();

    match format {
        "table" => {
            println!("Reconciliation Report");
            println!("  Total income:      {:>12}", format_cents(report.total_income));
            println!("  Total expense:     {:>12}", format_cents(report.total_expense));
            println!("  Balance:           {:>12}", format_cents(report.balance));
            println!(
                "  Total stock value: {:>12}",
                format_cents(report.total_stock_value)
            );
            if report.insufficient_funds {
                println!();
                println!("Warning: balance does not cover the total stock value!");
            }
        }
        "json" => {
            write_report_json(stdout(), &report)?;
        }
        _ => {
            anyhow::bail!("Invalid format '{}'. Valid formats: table, json", format);
        }
    }

    Ok(())
}

/// Horizontal bars for income, expense and balance, scaled so the largest
/// absolute value fills `width` characters.
fn render_chart(report: &ReconciliationReport, width: usize) -> String {
    let rows = [
        ("Income", report.total_income),
        ("Expense", report.total_expense),
        ("Balance", report.balance),
    ];
    let max = rows.iter().map(|(_, v)| v.abs()).max().unwrap_or(0);

    let mut out = String::new();
    for (label, value) in rows {
        let bar_len = if max == 0 {
            0
        } else {
            ((value.abs() as i128 * width as i128) / max as i128) as usize
        };
        out.push_str(&format!(
            "{:<8} {:<bar_width$} {}\n",
            label,
            "#".repeat(bar_len),
            format_cents(value),
            bar_width = width
        ));
    }
    out
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format '{}'. Use YYYY-MM-DD", date_str))
}
