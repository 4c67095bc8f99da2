//! # Transaction History
//!
//! Pages through a bank account's transaction history, decodes the
//! fixed-width remittance annotations and renders the result as a table,
//! CSV or JSON.
//!
//! ## Design Principles
//!
//! - **Growing-prefix paging**: each request asks for a larger prefix from
//!   the same first index until the history is exhausted or the cutoff is passed
//! - **Injected transport**: the fetcher only sees [`TransactionClient`]
//! - **Exact amounts**: values stay `rust_decimal` with their native scale
//! - **Immutable records**: filtering and projection build new values
//!
//! ## Example
//!
//! ```no_run
//! use transaction_history::{
//!     ColumnSchema, DirectoryClient, FetchConfig, OutputFormat, Renderer, TransactionFetcher,
//! };
//!
//! let fetcher = TransactionFetcher::new(DirectoryClient::new("exports"), FetchConfig::default());
//! let since = "2021-01-01".parse().unwrap();
//! let transactions = fetcher.fetch_until("A1", Some(since)).unwrap();
//!
//! Renderer::new(OutputFormat::Table, ColumnSchema::Description)
//!     .render(&transactions, std::io::stdout())
//!     .unwrap();
//! ```

pub mod amount;
pub mod client;
pub mod error;
pub mod fetcher;
pub mod remittance;
pub mod render;
pub mod schema;
pub mod transaction;

pub use amount::Amount;
pub use client::{ClientError, DirectoryClient, PagingOptions, TransactionClient};
pub use error::{HistoryError, Result};
pub use fetcher::{FetchConfig, FetchOutcome, StopReason, TransactionFetcher};
pub use render::{OutputFormat, Renderer};
pub use schema::{ColumnSchema, DisplayRow};
pub use transaction::{AccountTransactions, BookingStatus, Paging, TransactionRecord};
