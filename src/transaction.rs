//! Transaction records and pages as delivered by the bank API.

use crate::amount::Amount;
use crate::error::{HistoryError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Layout of every date field in the API.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an API date (`YYYY-MM-DD`).
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|source| {
        HistoryError::DateParse {
            date: date.to_string(),
            source,
        }
    })
}

/// Booking state of a transaction.
///
/// Unknown states are kept verbatim so they survive into JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    Booked,
    NotBooked,
    Other(String),
}

impl BookingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BookingStatus::Booked => "BOOKED",
            BookingStatus::NotBooked => "NOTBOOKED",
            BookingStatus::Other(s) => s,
        }
    }
}

impl From<String> for BookingStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "BOOKED" => BookingStatus::Booked,
            "NOTBOOKED" => BookingStatus::NotBooked,
            _ => BookingStatus::Other(s),
        }
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Transaction type as `{ key, text }`; `text` is the human label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionType {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub text: String,
}

/// Account holder on either side of a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holder {
    #[serde(default)]
    pub holder_name: String,
}

/// One booking on the account.
///
/// Records are never mutated after deserialization; filtering and projection
/// build new values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// ISO date; empty or null for transactions that are not booked yet.
    #[serde(default)]
    pub booking_date: Option<String>,

    pub booking_status: BookingStatus,

    #[serde(default)]
    pub transaction_type: TransactionType,

    pub amount: Amount,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remitter: Option<Holder>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debtor: Option<Holder>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creditor: Option<Holder>,

    /// Fixed-width annotation, see [`crate::remittance`].
    #[serde(default)]
    pub remittance_info: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valuta_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_transaction: Option<bool>,
}

fn holder_name(holder: &Option<Holder>) -> &str {
    holder.as_ref().map(|h| h.holder_name.as_str()).unwrap_or("")
}

impl TransactionRecord {
    pub fn is_booked(&self) -> bool {
        self.booking_status == BookingStatus::Booked
    }

    pub fn booking_date_str(&self) -> &str {
        self.booking_date.as_deref().unwrap_or("")
    }

    pub fn remitter_name(&self) -> &str {
        holder_name(&self.remitter)
    }

    pub fn creditor_name(&self) -> &str {
        holder_name(&self.creditor)
    }

    pub fn remittance_info(&self) -> &str {
        self.remittance_info.as_deref().unwrap_or("")
    }

    /// Parses the booking date.
    ///
    /// Returns `None` only for a record that is not booked and carries no
    /// date at all. A booked record must have a parseable date, and any
    /// non-empty date must parse.
    pub fn booking_date(&self) -> Result<Option<NaiveDate>> {
        let raw = self.booking_date_str();
        if raw.trim().is_empty() && !self.is_booked() {
            return Ok(None);
        }
        parse_date(raw).map(Some)
    }
}

/// Paging metadata of one response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    /// First index of the batch.
    #[serde(default)]
    pub index: usize,

    /// Total number of records matching the query across all pages.
    #[serde(default)]
    pub matches: usize,
}

/// A batch of records plus paging metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountTransactions {
    #[serde(default)]
    pub paging: Paging,

    #[serde(default)]
    pub values: Vec<TransactionRecord>,
}

impl AccountTransactions {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Booking date of the last (oldest) record in the batch.
    pub fn last_booking_date(&self) -> Result<Option<NaiveDate>> {
        match self.values.last() {
            Some(record) => record.booking_date(),
            None => Ok(None),
        }
    }

    /// Keeps the records booked on or after `since`.
    ///
    /// Records without a date (not booked yet) are kept. Paging metadata is
    /// carried over unchanged.
    pub fn filter_since(&self, since: NaiveDate) -> Result<AccountTransactions> {
        let mut values = Vec::with_capacity(self.values.len());
        for record in &self.values {
            match record.booking_date()? {
                Some(date) if date < since => {}
                _ => values.push(record.clone()),
            }
        }

        Ok(AccountTransactions {
            paging: self.paging,
            values,
        })
    }
}
