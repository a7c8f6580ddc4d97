use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context;
use dataset_viewer::config::ViewerConfig;
use dataset_viewer::data::summary::{self, Summary};
use dataset_viewer::{Action, CellValue, MissingStrategy, Outcome, Session};

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Upload,
    Overview,
    Cleaning,
    Visualizations,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Upload,
        Section::Overview,
        Section::Cleaning,
        Section::Visualizations,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Upload => "Upload Dataset",
            Section::Overview => "Data Overview",
            Section::Cleaning => "Data Cleaning",
            Section::Visualizations => "Visualizations",
        }
    }
}

/// Message shown under the toolbar after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Success(String),
    Warning(String),
    Error(String),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// The dataset session; owns the loaded table (if any).
    pub session: Session,

    pub config: ViewerConfig,

    /// Section picked in the navigation panel.
    pub section: Section,

    /// Summary of the current table (cached, refreshed after every action).
    pub summary: Option<Summary>,

    /// Preview rows of the current table (cached).
    pub preview: Vec<Vec<String>>,

    /// Cleaning section widgets.
    pub handle_missing_open: bool,
    pub missing_strategy: MissingStrategy,
    pub drop_columns_open: bool,
    pub drop_selection: BTreeSet<String>,

    /// Visualisation section widgets.
    pub show_histogram: bool,
    pub histogram_column: Option<String>,
    pub histogram: Vec<(CellValue, usize)>,

    pub status: Option<Status>,
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            session: Session::new(),
            config,
            section: Section::Upload,
            summary: None,
            preview: Vec::new(),
            handle_missing_open: false,
            missing_strategy: MissingStrategy::DropRows,
            drop_columns_open: false,
            drop_selection: BTreeSet::new(),
            show_histogram: false,
            histogram_column: None,
            histogram: Vec::new(),
            status: None,
        }
    }

    /// Load a file picked by the user. CSV goes through the byte loader,
    /// other formats through the file loader; both report through [`apply`].
    ///
    /// [`apply`]: AppState::apply
    pub fn open_file(&mut self, path: &Path) {
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

        if !is_csv {
            self.apply(Action::LoadFile { path: path.to_path_buf() });
            return;
        }
        match std::fs::read(path).with_context(|| format!("reading {}", path.display())) {
            Ok(bytes) => self.apply(Action::Load { bytes }),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status = Some(Status::Error(format!("Error: {e:#}")));
            }
        }
    }

    /// Apply an action to the session and turn its outcome into a status
    /// message.
    pub fn apply(&mut self, action: Action) {
        let outcome = match self.session.apply(action) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("Action failed: {e}");
                self.status = Some(Status::Error(format!("Error: {e}")));
                return;
            }
        };

        let status = match outcome {
            Outcome::Loaded { .. } => {
                self.after_load();
                Some(Status::Success("Dataset Uploaded Successfully!".into()))
            }
            Outcome::DuplicatesRemoved(n) => {
                Some(Status::Success(format!("Removed {n} duplicate rows!")))
            }
            Outcome::MissingHandled { .. } => {
                Some(Status::Success("Missing values handled!".into()))
            }
            Outcome::ColumnsDropped(names) => {
                self.drop_selection.clear();
                if self
                    .histogram_column
                    .as_ref()
                    .is_some_and(|c| names.contains(c))
                {
                    self.histogram_column = None;
                }
                Some(Status::Success(format!("Dropped columns: {names:?}")))
            }
            Outcome::NoDataset => Some(Status::Warning("Please upload a dataset first!".into())),
            Outcome::Summary(_) | Outcome::ValueCounts(_) => None,
        };
        if status.is_some() {
            self.status = status;
        }
        self.refresh();
    }

    /// Choose the column shown in the histogram.
    pub fn set_histogram_column(&mut self, column: String) {
        self.histogram_column = Some(column);
        self.refresh();
    }

    fn after_load(&mut self) {
        self.drop_selection.clear();
        self.histogram_column = None;
    }

    /// Recompute cached summary, preview and histogram data.
    pub fn refresh(&mut self) {
        let Some(table) = self.session.table() else {
            self.summary = None;
            self.preview.clear();
            self.histogram.clear();
            return;
        };
        self.summary = Some(summary::summarize(table));
        self.preview = summary::preview(table, self.config.preview_rows);

        if self.histogram_column.is_none() {
            self.histogram_column = table.column_names().into_iter().next();
        }
        self.histogram = match &self.histogram_column {
            Some(col) => summary::value_counts(table, col).unwrap_or_default(),
            None => Vec::new(),
        };
        self.histogram.truncate(self.config.histogram_max_bars);
    }
}
