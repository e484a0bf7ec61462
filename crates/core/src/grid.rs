//! The grid as seen by clipboard operations.
//!
//! Implementations own rows, layouts and selection; the engine only reads
//! through this trait and writes through [`Grid::write_cell`] and
//! [`Grid::select_cells`].

use std::fmt;

use crate::column::{Column, ColumnLayout};
use crate::row::{Row, RowId, RowParent};
use crate::selection::{ActiveCell, CellRef, ClipboardSettings, SelectionSettings};
use crate::value::CellAssignment;

pub trait Grid {
    fn active_cell(&self) -> Option<ActiveCell>;

    fn row(&self, id: RowId) -> Option<&Row>;

    /// Column layout by key (see [`Row::layout`]).
    fn layout(&self, key: &str) -> Option<&ColumnLayout>;

    /// Rows of one collection, in index order.
    fn rows(&self, parent: &RowParent) -> &[RowId];

    fn selection(&self) -> &SelectionSettings;

    fn clipboard(&self) -> &ClipboardSettings;

    /// Assign a value to one cell. Raw text is run through the column's value
    /// converter by the implementation.
    fn write_cell(
        &mut self,
        row: RowId,
        column: &Column,
        assignment: CellAssignment,
    ) -> Result<(), CellWriteError>;

    /// Replace the cell selection.
    fn select_cells(&mut self, cells: Vec<CellRef>);

    /// Layout a row is displayed with.
    fn row_layout(&self, id: RowId) -> Option<&ColumnLayout> {
        self.row(id).and_then(|row| self.layout(&row.layout))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellWriteError {
    UnknownRow(RowId),
    /// Column is not part of the row's layout.
    UnknownColumn(String),
    /// The column's converter refused the text.
    Rejected { column: String, message: String },
}

impl fmt::Display for CellWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRow(id) => write!(f, "unknown row #{}", id.raw()),
            Self::UnknownColumn(key) => write!(f, "unknown column '{key}'"),
            Self::Rejected { column, message } => {
                write!(f, "column '{column}' rejected value: {message}")
            }
        }
    }
}

impl std::error::Error for CellWriteError {}
