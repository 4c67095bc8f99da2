//! The paged-query seam between the fetcher and the bank.
//!
//! The fetcher only knows [`TransactionClient`]. Session handling and HTTP
//! live behind implementations of it; this crate ships [`DirectoryClient`],
//! which answers queries from JSON exports on disk.

use crate::transaction::{AccountTransactions, Paging};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

/// Failures of the collaborator. None of them are retried.
#[derive(Error, Debug)]
pub enum ClientError {
    /// No transactions are known for the account
    #[error("unknown account {0:?}")]
    UnknownAccount(String),

    /// Reading the underlying source failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The response could not be decoded
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The invocation's deadline passed before the request completed
    #[error("deadline exceeded")]
    DeadlineExceeded,
}

/// Query options for one page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingOptions {
    /// Maximum number of records to return.
    pub count: usize,

    /// Index of the first record.
    pub first: usize,

    /// Point in time after which the request must be abandoned.
    pub deadline: Option<Instant>,
}

impl PagingOptions {
    pub fn new(count: usize, first: usize) -> Self {
        PagingOptions {
            count,
            first,
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Returns `true` once the deadline has passed.
    pub fn is_expired(&self) -> bool {
        self.deadline
            .map(|deadline| Instant::now() >= deadline)
            .unwrap_or(false)
    }
}

/// A source of paged transaction queries.
///
/// Implementations return records newest-first, report the total number of
/// matches in `paging.matches`, and never return more than `options.count`
/// records.
pub trait TransactionClient {
    fn transactions(
        &self,
        account_id: &str,
        options: &PagingOptions,
    ) -> Result<AccountTransactions, ClientError>;
}

impl<C: TransactionClient + ?Sized> TransactionClient for &C {
    fn transactions(
        &self,
        account_id: &str,
        options: &PagingOptions,
    ) -> Result<AccountTransactions, ClientError> {
        (**self).transactions(account_id, options)
    }
}

/// Serves queries from `<root>/<account_id>.json` exports.
///
/// Each export has the response shape (`paging` + `values`), so the output of
/// `--format json` can be fed back in. `paging.matches` defaults to the number
/// of stored values when the export leaves it at zero.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    root: PathBuf,
}

impl DirectoryClient {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        DirectoryClient { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn export_path(&self, account_id: &str) -> Result<PathBuf, ClientError> {
        let valid = !account_id.is_empty()
            && account_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ClientError::UnknownAccount(account_id.to_string()));
        }
        Ok(self.root.join(format!("{}.json", account_id)))
    }

    fn load(&self, account_id: &str) -> Result<AccountTransactions, ClientError> {
        let path = self.export_path(account_id)?;
        if !path.is_file() {
            return Err(ClientError::UnknownAccount(account_id.to_string()));
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl TransactionClient for DirectoryClient {
    fn transactions(
        &self,
        account_id: &str,
        options: &PagingOptions,
    ) -> Result<AccountTransactions, ClientError> {
        if options.is_expired() {
            return Err(ClientError::DeadlineExceeded);
        }

        let mut export = self.load(account_id)?;
        let matches = if export.paging.matches == 0 {
            export.values.len()
        } else {
            export.paging.matches
        };

        let values: Vec<_> = export
            .values
            .drain(..)
            .skip(options.first)
            .take(options.count)
            .collect();

        debug!(
            "Served {} of {} records for account {} (first={}, count={})",
            values.len(),
            matches,
            account_id,
            options.first,
            options.count
        );

        Ok(AccountTransactions {
            paging: Paging {
                index: options.first,
                matches,
            },
            values,
        })
    }
}
