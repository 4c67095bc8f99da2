//! Column schemas and the projection of records into display rows.

use crate::remittance;
use crate::transaction::TransactionRecord;
use clap::ValueEnum;

/// Width guard for DESCRIPTION in tables and REMITTER everywhere.
pub const TRUNCATE_WIDTH: usize = 30;

/// Placeholder for an empty remitter in the split schema.
pub const NOT_AVAILABLE: &str = "N/A";

/// Column layout of table and CSV output, chosen once per invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColumnSchema {
    /// Holder names and remittance text merged into one DESCRIPTION column.
    #[default]
    Description,
    /// Remitter, creditor and remittance text in separate columns.
    Split,
}

impl ColumnSchema {
    pub fn header(&self) -> &'static [&'static str] {
        match self {
            ColumnSchema::Description => &[
                "DESCRIPTION",
                "BOOKING DATE",
                "STATUS",
                "TYPE",
                "VALUE",
                "UNIT",
            ],
            ColumnSchema::Split => &[
                "REMITTER",
                "DEBTOR",
                "BOOKING DATE",
                "STATUS",
                "INFO",
                "TYPE",
                "VALUE",
                "UNIT",
            ],
        }
    }

    /// Column the table, and only the table, cuts to [`TRUNCATE_WIDTH`].
    ///
    /// The split schema's REMITTER is already cut by [`project`].
    pub fn table_truncated_column(&self) -> Option<usize> {
        match self {
            ColumnSchema::Description => Some(0),
            ColumnSchema::Split => None,
        }
    }

    /// Index of the numeric amount column.
    pub fn value_column(&self) -> usize {
        self.header().len() - 2
    }
}

/// Ordered display cells of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow(Vec<String>);

impl DisplayRow {
    pub fn cells(&self) -> &[String] {
        &self.0
    }

    pub fn into_cells(self) -> Vec<String> {
        self.0
    }

    /// Returns a copy with the cell at `column` cut to `width` characters.
    pub fn truncated(&self, column: usize, width: usize) -> DisplayRow {
        let mut cells = self.0.clone();
        if let Some(cell) = cells.get_mut(column) {
            *cell = cut(cell, width);
        }
        DisplayRow(cells)
    }
}

fn cut(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Merges non-empty holder names and decoded remittance into one text.
fn description(record: &TransactionRecord) -> String {
    let info = remittance::decode(record.remittance_info());
    [record.remitter_name(), record.creditor_name(), info.as_str()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Projects a record into the cells of `schema`.
///
/// In the split schema REMITTER is the remitter's holder name, cut to
/// [`TRUNCATE_WIDTH`] characters or [`NOT_AVAILABLE`] when empty, and DEBTOR
/// is the creditor's holder name, left empty when there is none.
pub fn project(record: &TransactionRecord, schema: ColumnSchema) -> DisplayRow {
    let date = record.booking_date_str().to_string();
    let status = record.booking_status.as_str().to_string();
    let kind = record.transaction_type.text.clone();
    let value = record.amount.to_string();
    let unit = record.amount.unit.clone();

    let cells = match schema {
        ColumnSchema::Description => vec![description(record), date, status, kind, value, unit],
        ColumnSchema::Split => {
            let remitter = match record.remitter_name() {
                "" => NOT_AVAILABLE.to_string(),
                name => cut(name, TRUNCATE_WIDTH),
            };
            let creditor = record.creditor_name().to_string();
            let info = remittance::decode(record.remittance_info());
            vec![remitter, creditor, date, status, info, kind, value, unit]
        }
    };

    DisplayRow(cells)
}

/// Projects the booked records, in order, skipping everything else.
pub fn booked_rows<'a, I>(records: I, schema: ColumnSchema) -> Vec<DisplayRow>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    records
        .into_iter()
        .filter(|record| record.is_booked())
        .map(|record| project(record, schema))
        .collect()
}
