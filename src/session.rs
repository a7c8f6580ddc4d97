use std::path::{Path, PathBuf};

use crate::data::cleaning::{self, MissingStrategy};
use crate::data::model::{CellValue, Table};
use crate::data::summary::{self, Summary};
use crate::data::loader;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Actions and their outcomes
// ---------------------------------------------------------------------------

/// One user request against the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Parse raw CSV bytes and replace the current table.
    Load { bytes: Vec<u8> },
    /// Load a CSV, TSV, JSON or Parquet file, chosen by extension.
    LoadFile { path: PathBuf },
    Summarize,
    RemoveDuplicates,
    HandleMissing(MissingStrategy),
    DropColumns(Vec<String>),
    ValueCounts { column: String },
}

/// What an applied [`Action`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Loaded { rows: usize, columns: usize },
    Summary(Summary),
    DuplicatesRemoved(usize),
    MissingHandled {
        strategy: MissingStrategy,
        rows_dropped: usize,
        cells_filled: usize,
    },
    ColumnsDropped(Vec<String>),
    ValueCounts(Vec<(CellValue, usize)>),
    /// The action needs a table and none is loaded. Advisory, not an error.
    NoDataset,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Holds at most one table between user actions.
///
/// The session starts empty and becomes loaded on the first successful
/// load. Every later operation replaces the table; there is no way back to
/// empty. A failed operation leaves the current table as it was.
#[derive(Debug, Clone, Default)]
pub struct Session {
    table: Option<Table>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    /// Parse CSV bytes and make the result the current table.
    pub fn load(&mut self, bytes: &[u8]) -> Result<&Table> {
        let table = loader::load_csv_bytes(bytes)?;
        Ok(self.replace(table))
    }

    /// Load any supported file format and make it the current table.
    pub fn load_file(&mut self, path: &Path) -> Result<&Table> {
        let table = loader::load_file(path)?;
        Ok(self.replace(table))
    }

    fn replace(&mut self, table: Table) -> &Table {
        log::info!(
            "Loaded {} rows with columns {:?}",
            table.row_count(),
            table.column_names()
        );
        self.table.insert(table)
    }

    /// Run one action to completion.
    pub fn apply(&mut self, action: Action) -> Result<Outcome> {
        log::debug!("Applying {action:?}");

        match action {
            Action::Load { bytes } => {
                let table = self.load(&bytes)?;
                Ok(Outcome::Loaded {
                    rows: table.row_count(),
                    columns: table.column_count(),
                })
            }
            Action::LoadFile { path } => {
                let table = self.load_file(&path)?;
                Ok(Outcome::Loaded {
                    rows: table.row_count(),
                    columns: table.column_count(),
                })
            }
            Action::Summarize => {
                self.with_table(|table| Ok(Outcome::Summary(summary::summarize(table))))
            }
            Action::RemoveDuplicates => self.with_table(|table| {
                let removed = cleaning::remove_duplicates(table);
                log::info!("Removed {removed} duplicate rows");
                Ok(Outcome::DuplicatesRemoved(removed))
            }),
            Action::HandleMissing(strategy) => self.with_table(|table| {
                let report = cleaning::handle_missing(table, strategy);
                log::info!(
                    "{strategy}: dropped {} rows, filled {} cells",
                    report.rows_dropped,
                    report.cells_filled
                );
                Ok(Outcome::MissingHandled {
                    strategy,
                    rows_dropped: report.rows_dropped,
                    cells_filled: report.cells_filled,
                })
            }),
            Action::DropColumns(names) => self.with_table(|table| {
                cleaning::drop_columns(table, &names)?;
                log::info!("Dropped columns {names:?}");
                Ok(Outcome::ColumnsDropped(names))
            }),
            Action::ValueCounts { column } => self.with_table(|table| {
                Ok(Outcome::ValueCounts(summary::value_counts(table, &column)?))
            }),
        }
    }

    /// Run `op` on the current table, or report that none is loaded.
    fn with_table(&mut self, op: impl FnOnce(&mut Table) -> Result<Outcome>) -> Result<Outcome> {
        match self.table.as_mut() {
            Some(table) => op(table),
            None => {
                log::warn!("No dataset loaded");
                Ok(Outcome::NoDataset)
            }
        }
    }
}
