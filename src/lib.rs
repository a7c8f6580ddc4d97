pub mod config;
pub mod data;
pub mod error;
pub mod session;

pub use data::cleaning::{MissingReport, MissingStrategy};
pub use data::model::{CellValue, Column, ColumnType, Table};
pub use data::summary::{ColumnSummary, Summary};
pub use error::DatasetError;
pub use session::{Action, Outcome, Session};
