use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::row::RowId;

/// A cell addressed by row handle and column key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellRef {
    pub row: RowId,
    pub column: String,
}

impl CellRef {
    pub fn new(row: RowId, column: impl Into<String>) -> Self {
        Self { row, column: column.into() }
    }
}

/// The focused cell. A row can be active without any column (row selectors).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveCell {
    pub row: RowId,
    pub column: Option<String>,
}

/// What clicking a cell selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CellClickAction {
    #[default]
    SelectCell,
    SelectRow,
}

/// What a copy operation takes from the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CopyType {
    /// Follow the cell click action.
    #[default]
    Default,
    SelectedCells,
    SelectedRows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClipboardSettings {
    pub copy_type: CopyType,
}

/// Selected rows and selected cells. Both lists keep insertion order and
/// never hold the same entry twice.
#[derive(Debug, Clone, Default)]
pub struct SelectionSettings {
    selected_rows: Vec<RowId>,
    selected_cells: Vec<CellRef>,
    pub cell_click_action: CellClickAction,
}

impl SelectionSettings {
    pub fn new(cell_click_action: CellClickAction) -> Self {
        Self { cell_click_action, ..Self::default() }
    }

    pub fn selected_rows(&self) -> &[RowId] {
        &self.selected_rows
    }

    pub fn selected_cells(&self) -> &[CellRef] {
        &self.selected_cells
    }

    /// Add a row; returns false if it was already selected.
    pub fn select_row(&mut self, row: RowId) -> bool {
        if self.selected_rows.contains(&row) {
            return false;
        }
        self.selected_rows.push(row);
        true
    }

    /// Add a cell; returns false if it was already selected.
    pub fn select_cell(&mut self, cell: CellRef) -> bool {
        if self.selected_cells.contains(&cell) {
            return false;
        }
        self.selected_cells.push(cell);
        true
    }

    /// Replace the cell selection.
    pub fn set_cells(&mut self, cells: impl IntoIterator<Item = CellRef>) {
        self.selected_cells.clear();
        for cell in cells {
            self.select_cell(cell);
        }
    }

    pub fn clear_rows(&mut self) {
        self.selected_rows.clear();
    }

    pub fn clear_cells(&mut self) {
        self.selected_cells.clear();
    }
}

/// Inclusive rectangle of row indices and real-column indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionBounds {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl SelectionBounds {
    /// Bounds covering `rows` by `columns`. Reversed ranges are flipped.
    pub fn new(rows: RangeInclusive<usize>, columns: RangeInclusive<usize>) -> Self {
        let (r0, r1) = rows.into_inner();
        let (c0, c1) = columns.into_inner();
        Self {
            start_row: r0.min(r1),
            start_col: c0.min(c1),
            end_row: r0.max(r1),
            end_col: c0.max(c1),
        }
    }

    pub fn rows(&self) -> RangeInclusive<usize> {
        self.start_row..=self.end_row
    }

    /// Real-column positions inside the band layout.
    pub fn columns(&self) -> RangeInclusive<usize> {
        self.start_col..=self.end_col
    }

    pub fn row_count(&self) -> usize {
        self.end_row - self.start_row + 1
    }

    pub fn col_count(&self) -> usize {
        self.end_col - self.start_col + 1
    }

    pub fn cell_count(&self) -> usize {
        self.row_count() * self.col_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_cell_ignores_duplicates() {
        let mut sel = SelectionSettings::default();
        let cell = CellRef::new(RowId::from_raw(0), "Int");
        assert!(sel.select_cell(cell.clone()));
        assert!(!sel.select_cell(cell));
        assert_eq!(sel.selected_cells().len(), 1);
    }

    #[test]
    fn test_set_cells_replaces_and_dedupes() {
        let mut sel = SelectionSettings::default();
        sel.select_cell(CellRef::new(RowId::from_raw(9), "X"));
        let a = CellRef::new(RowId::from_raw(0), "A");
        sel.set_cells(vec![a.clone(), a.clone()]);
        assert_eq!(sel.selected_cells(), &[a]);
    }

    #[test]
    fn test_bounds_normalize() {
        let b = SelectionBounds::new(4..=2, 3..=1);
        assert_eq!((b.rows(), b.columns()), (2..=4, 1..=3));
        assert_eq!(b.cell_count(), 9);
    }
}
