//! Transaction history CLI
//!
//! Pages through an account's transactions, keeps those booked since a
//! cutoff date and prints them as a table, CSV or JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --source exports --since 2021-01-01 --format csv A1 > a1.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `info` to control logging verbosity
//! - `TRANSACTIONS_SOURCE`: Default for `--source`

use chrono::NaiveDate;
use clap::Parser;
use log::info;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use transaction_history::fetcher::DEFAULT_PAGE_SIZE;
use transaction_history::{
    ColumnSchema, DirectoryClient, FetchConfig, OutputFormat, Renderer, Result,
    TransactionFetcher,
};

/// List account transactions.
#[derive(Debug, Parser)]
#[command(name = "transactions", version)]
struct Cli {
    /// Account to list
    account_id: String,

    /// Directory holding `<ACCOUNT_ID>.json` exports
    #[arg(long, env = "TRANSACTIONS_SOURCE", default_value = ".")]
    source: PathBuf,

    /// Only list transactions booked on or after this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_cutoff)]
    since: Option<NaiveDate>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Column layout for table and CSV output
    #[arg(long, value_enum, default_value_t = ColumnSchema::Description)]
    schema: ColumnSchema,

    /// Number of records added to each page request
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    count: usize,

    /// Index of the first record to request
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Give up fetching after this many seconds
    #[arg(long)]
    timeout: Option<u64>,
}

fn parse_cutoff(s: &str) -> std::result::Result<NaiveDate, String> {
    transaction_history::transaction::parse_date(s).map_err(|e| e.to_string())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let client = DirectoryClient::new(cli.source);
    info!("Reading exports from {}", client.root().display());

    let config = FetchConfig {
        page_size: cli.count,
        first_index: cli.index,
        timeout: cli.timeout.map(Duration::from_secs),
    };
    let fetcher = TransactionFetcher::new(client, config);
    let transactions = fetcher.fetch_until(&cli.account_id, cli.since)?;

    let stdout = io::stdout();
    let handle = BufWriter::new(stdout.lock());
    Renderer::new(cli.format, cli.schema).render(&transactions, handle)?;

    Ok(())
}
