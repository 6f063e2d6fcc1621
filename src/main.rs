use anyhow::Result;
use clap::Parser;
use saldo::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
