//! Output writers for a fetched transaction set.
//!
//! Table and CSV show the booked records only, projected through a
//! [`ColumnSchema`]. JSON dumps the full set as fetched and filtered.

use crate::error::Result;
use crate::schema::{booked_rows, ColumnSchema, DisplayRow, TRUNCATE_WIDTH};
use crate::transaction::AccountTransactions;
use clap::ValueEnum;
use std::io::Write;
use tabled::builder::Builder;
use tabled::settings::object::{Columns, Segment};
use tabled::settings::{Alignment, Modify, Style};

/// Requested output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Bordered grid with a match-count caption
    #[default]
    Table,
    /// Same as table
    Markdown,
    /// Comma-separated values, header first
    Csv,
    /// Indented JSON of every record
    Json,
}

/// Writes a transaction set in one format and column schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    pub format: OutputFormat,
    pub schema: ColumnSchema,
}

impl Renderer {
    pub fn new(format: OutputFormat, schema: ColumnSchema) -> Self {
        Renderer { format, schema }
    }

    /// Renders `transactions` into `out` and flushes it.
    pub fn render<W: Write>(&self, transactions: &AccountTransactions, mut out: W) -> Result<()> {
        match self.format {
            OutputFormat::Table | OutputFormat::Markdown => self.write_table(transactions, &mut out)?,
            OutputFormat::Csv => self.write_csv(transactions, &mut out)?,
            OutputFormat::Json => write_json(transactions, &mut out)?,
        }
        out.flush()?;
        Ok(())
    }

    fn write_table<W: Write>(&self, transactions: &AccountTransactions, out: &mut W) -> Result<()> {
        let rows: Vec<DisplayRow> = booked_rows(&transactions.values, self.schema)
            .into_iter()
            .map(|row| match self.schema.table_truncated_column() {
                Some(column) => row.truncated(column, TRUNCATE_WIDTH),
                None => row,
            })
            .collect();
        let rendered = rows.len();

        let mut builder = Builder::default();
        builder.push_record(self.schema.header().iter().map(|h| h.to_string()));
        for row in rows {
            builder.push_record(row.into_cells());
        }

        let mut table = builder.build();
        table
            .with(Style::markdown())
            .with(Modify::new(Segment::all()).with(Alignment::left()))
            .with(Modify::new(Columns::single(self.schema.value_column())).with(Alignment::right()));

        writeln!(out, "{}", table)?;
        writeln!(out, "{} out of {}", rendered, transactions.paging.matches)?;
        Ok(())
    }

    fn write_csv<W: Write>(&self, transactions: &AccountTransactions, out: &mut W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(self.schema.header())?;
        for row in booked_rows(&transactions.values, self.schema) {
            writer.write_record(row.cells())?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn write_json<W: Write>(transactions: &AccountTransactions, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, transactions)?;
    writeln!(out)?;
    Ok(())
}
