//! Paged retrieval of an account's transaction history.
//!
//! The bank returns records newest-first. The fetcher asks for a growing
//! prefix (`page_size * page` records from the same first index) until the
//! history is exhausted or the oldest record of a batch is older than the
//! cutoff. Each request re-fetches everything before it, which keeps the loop
//! free of cursors at the price of transferring the prefix again; it relies on
//! the server's ordering being stable within one invocation.

use crate::client::{ClientError, PagingOptions, TransactionClient};
use crate::error::{HistoryError, Result};
use crate::transaction::AccountTransactions;
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::time::{Duration, Instant};

/// Default number of records requested per page step.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Fetch parameters for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchConfig {
    /// Page-size hint; the n-th request asks for `page_size * n` records.
    pub page_size: usize,

    /// First index passed with every request.
    pub first_index: usize,

    /// Upper bound for the whole fetch.
    pub timeout: Option<Duration>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            page_size: DEFAULT_PAGE_SIZE,
            first_index: 0,
            timeout: None,
        }
    }
}

/// Why the paging loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Empty batch, or every matching record has been retrieved.
    Exhausted,
    /// The oldest record of the last batch is older than the cutoff.
    CutoffReached,
}

/// Result of the paging loop, before date filtering.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// The last (largest) batch; it contains every earlier batch.
    pub transactions: AccountTransactions,

    /// Number of client calls made.
    pub requests: usize,

    pub stop: StopReason,
}

/// Drives a [`TransactionClient`] through the growing-prefix paging loop.
pub struct TransactionFetcher<C> {
    client: C,
    config: FetchConfig,
}

impl<C: TransactionClient> TransactionFetcher<C> {
    pub fn new(client: C, config: FetchConfig) -> Self {
        TransactionFetcher { client, config }
    }

    /// Fetches pages until exhausted or past `cutoff`, then keeps only the
    /// records booked on or after `cutoff`.
    ///
    /// Without a cutoff the history is read until exhausted and returned as is.
    pub fn fetch_until(
        &self,
        account_id: &str,
        cutoff: Option<NaiveDate>,
    ) -> Result<AccountTransactions> {
        let outcome = self.fetch_pages(account_id, cutoff)?;
        match cutoff {
            Some(since) => {
                let filtered = outcome.transactions.filter_since(since)?;
                debug!(
                    "Kept {} of {} fetched records booked since {}",
                    filtered.len(),
                    outcome.transactions.len(),
                    since
                );
                Ok(filtered)
            }
            None => Ok(outcome.transactions),
        }
    }

    /// Runs the paging loop without filtering.
    ///
    /// Transport errors end the loop immediately; nothing is retried. A
    /// larger request that returns no more records than the previous one,
    /// before the history is exhausted or the cutoff passed, means the
    /// server caps its page size; that fails with
    /// [`HistoryError::IncompletePages`] instead of looping forever.
    pub fn fetch_pages(&self, account_id: &str, cutoff: Option<NaiveDate>) -> Result<FetchOutcome> {
        if self.config.page_size == 0 {
            return Err(HistoryError::InvalidPageSize);
        }

        let deadline = self
            .config
            .timeout
            .and_then(|timeout| Instant::now().checked_add(timeout));
        let mut page = 1;
        let mut previous_len = 0;

        loop {
            let options = PagingOptions::new(
                self.config.page_size.saturating_mul(page),
                self.config.first_index,
            )
            .with_deadline(deadline);

            if options.is_expired() {
                return Err(ClientError::DeadlineExceeded.into());
            }

            let batch = self.client.transactions(account_id, &options)?;
            debug!(
                "Page {}: requested {} records from index {}, got {} of {} matches",
                page,
                options.count,
                options.first,
                batch.len(),
                batch.paging.matches
            );
            if batch.len() > options.count {
                warn!(
                    "Page {}: server returned {} records, more than the {} requested",
                    page,
                    batch.len(),
                    options.count
                );
            }

            if let Some(stop) = self.stop_reason(&batch, previous_len, cutoff)? {
                info!(
                    "Fetched {} records for account {} in {} requests ({:?})",
                    batch.len(),
                    account_id,
                    page,
                    stop
                );
                return Ok(FetchOutcome {
                    transactions: batch,
                    requests: page,
                    stop,
                });
            }

            previous_len = batch.len();
            page += 1;
        }
    }

    fn stop_reason(
        &self,
        batch: &AccountTransactions,
        previous_len: usize,
        cutoff: Option<NaiveDate>,
    ) -> Result<Option<StopReason>> {
        if batch.is_empty() {
            return Ok(Some(StopReason::Exhausted));
        }

        if self.config.first_index + batch.len() >= batch.paging.matches {
            return Ok(Some(StopReason::Exhausted));
        }

        if let Some(since) = cutoff {
            if let Some(oldest) = batch.last_booking_date()? {
                if oldest < since {
                    return Ok(Some(StopReason::CutoffReached));
                }
            }
        }

        if batch.len() <= previous_len {
            warn!(
                "Server stopped growing pages at {} records, giving up before {} matches",
                batch.len(),
                batch.paging.matches
            );
            return Err(HistoryError::IncompletePages {
                fetched: batch.len(),
                matches: batch.paging.matches,
            });
        }

        Ok(None)
    }
}
