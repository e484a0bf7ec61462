//! Selection validation for copy.
//!
//! A selection can be copied when it is a solid rectangle inside one band
//! level. Rows are measured by their index within their collection, cells by
//! row index and by column position in the real-column ordering of the first
//! selected cell's band.

use std::fmt;

use serde::Serialize;

use gridclip_core::{CellClickAction, CopyType, Grid, Row, RowId, SelectionBounds};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "camelCase")]
pub enum SelectionError {
    /// Nothing selected in the active copy mode.
    Empty,
    /// Selected items sit at different band levels.
    CrossBand,
    /// Bounding box holds more cells than were selected.
    NotRectangular { selected: usize, bounds: usize },
    UnknownRow { row: RowId },
    /// Column is not a real column of the selection's band.
    UnknownColumn { column: String },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "nothing is selected"),
            Self::CrossBand => write!(f, "selection spans more than one band"),
            Self::NotRectangular { selected, bounds } => write!(
                f,
                "selection is not rectangular ({selected} selected, {bounds} in bounding box)"
            ),
            Self::UnknownRow { row } => write!(f, "unknown row #{}", row.raw()),
            Self::UnknownColumn { column } => write!(f, "unknown column '{column}'"),
        }
    }
}

impl std::error::Error for SelectionError {}

/// The copy mode in effect: the explicit clipboard copy type, else whatever
/// a cell click selects. Never returns `CopyType::Default`.
pub fn resolve_copy_type<G: Grid + ?Sized>(grid: &G) -> CopyType {
    match grid.clipboard().copy_type {
        CopyType::Default => match grid.selection().cell_click_action {
            CellClickAction::SelectCell => CopyType::SelectedCells,
            CellClickAction::SelectRow => CopyType::SelectedRows,
        },
        explicit => explicit,
    }
}

/// Rows behind the selection in the active copy mode, in selection order.
/// Cells contribute their row once per cell.
fn selected_row_ids<G: Grid + ?Sized>(grid: &G, mode: CopyType) -> Vec<RowId> {
    match mode {
        CopyType::SelectedRows => grid.selection().selected_rows().to_vec(),
        _ => grid.selection().selected_cells().iter().map(|c| c.row).collect(),
    }
}

fn resolve_rows<G: Grid + ?Sized>(grid: &G, ids: &[RowId]) -> Result<Vec<Row>, SelectionError> {
    ids.iter()
        .map(|&id| grid.row(id).cloned().ok_or(SelectionError::UnknownRow { row: id }))
        .collect()
}

fn spans_levels(rows: &[Row]) -> bool {
    rows.windows(2).any(|pair| pair[0].level != pair[1].level)
}

/// True when selected items (in the active copy mode) sit at more than one
/// band level. Rows the grid does not know are ignored.
pub fn is_selection_cross_band<G: Grid + ?Sized>(grid: &G) -> bool {
    let mut levels = selected_row_ids(grid, resolve_copy_type(grid))
        .into_iter()
        .filter_map(|id| grid.row(id).map(|row| row.level));
    match levels.next() {
        Some(first) => levels.any(|level| level != first),
        None => false,
    }
}

/// Check the selection and return its bounding box.
///
/// In row mode the columns span the whole band.
pub fn validate_selection<G: Grid + ?Sized>(grid: &G) -> Result<SelectionBounds, SelectionError> {
    let mode = resolve_copy_type(grid);
    let ids = selected_row_ids(grid, mode);
    if ids.is_empty() {
        return Err(SelectionError::Empty);
    }
    let rows = resolve_rows(grid, &ids)?;
    if spans_levels(&rows) {
        return Err(SelectionError::CrossBand);
    }

    let min_row = rows.iter().map(|r| r.index).min().unwrap_or(0);
    let max_row = rows.iter().map(|r| r.index).max().unwrap_or(0);

    let bounds = match mode {
        CopyType::SelectedRows => {
            let width = grid
                .layout(&rows[0].layout)
                .map(|layout| layout.real_columns().len())
                .unwrap_or(0);
            SelectionBounds::new(min_row..=max_row, 0..=width.saturating_sub(1))
        }
        _ => {
            let layout = grid
                .layout(&rows[0].layout)
                .ok_or(SelectionError::UnknownRow { row: rows[0].id })?;
            let mut positions = Vec::with_capacity(ids.len());
            for cell in grid.selection().selected_cells() {
                let position = layout
                    .position(&cell.column)
                    .ok_or_else(|| SelectionError::UnknownColumn { column: cell.column.clone() })?;
                positions.push(position);
            }
            let min_col = positions.iter().copied().min().unwrap_or(0);
            let max_col = positions.iter().copied().max().unwrap_or(0);
            SelectionBounds::new(min_row..=max_row, min_col..=max_col)
        }
    };

    let selected = ids.len();
    let expected = match mode {
        CopyType::SelectedRows => bounds.row_count(),
        _ => bounds.cell_count(),
    };
    if expected != selected {
        log::debug!("selection rejected: {selected} selected, {expected} in bounds");
        return Err(SelectionError::NotRectangular { selected, bounds: expected });
    }
    Ok(bounds)
}

pub fn is_selection_valid<G: Grid + ?Sized>(grid: &G) -> bool {
    validate_selection(grid).is_ok()
}
