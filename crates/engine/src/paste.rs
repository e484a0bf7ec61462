//! Paste a block of clipboard tokens onto the grid, anchored at the active cell.
//!
//! The block is laid over the active cell's band: token `(r, c)` goes to the
//! row `r` places below the active row (in the same row collection) and the
//! real column `c` places right of the active column. Anything falling off
//! the bottom or the right edge is dropped. Every per-cell problem is put to
//! the [`ConfirmationProvider`]; cancel stops the whole paste but keeps the
//! cells already written.

use std::fmt;

use serde::Serialize;

use gridclip_core::{CellRef, Column, Grid, PasteBlock, RowId};

use crate::convert::Converter;
use crate::prompt::{ConfirmationProvider, PastePrompt, PromptResponse};

/// Why a paste had nowhere to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InvalidPasteTarget {
    NoActiveCell,
    NotDataRow,
    NoActiveColumn,
    /// Active column is not among the real columns of the row's layout.
    ColumnNotInLayout,
}

impl fmt::Display for InvalidPasteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoActiveCell => write!(f, "no active cell"),
            Self::NotDataRow => write!(f, "active cell is not on a data row"),
            Self::NoActiveColumn => write!(f, "active cell has no column"),
            Self::ColumnNotInLayout => write!(f, "active column is not part of the row's layout"),
        }
    }
}

/// The prompt a paste was cancelled at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "prompt", rename_all = "camelCase")]
pub enum PasteError {
    /// Cancelled at the "not enough columns" prompt; nothing was written.
    InsufficientColumns { available: usize, required: usize },
    /// Cancelled at a read-only column prompt.
    ReadOnlyColumn { column: String },
    /// Cancelled at a conversion failure prompt.
    ConversionFailure { column: String, value: String },
}

impl fmt::Display for PasteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientColumns { available, required } => write!(
                f,
                "paste cancelled: {required} column(s) needed, {available} available"
            ),
            Self::ReadOnlyColumn { column } => {
                write!(f, "paste cancelled at read-only column '{column}'")
            }
            Self::ConversionFailure { column, value } => {
                write!(f, "paste cancelled: cannot convert '{value}' for column '{column}'")
            }
        }
    }
}

impl std::error::Error for PasteError {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "camelCase")]
pub enum PasteStatus {
    /// Every token in range was visited.
    #[default]
    Completed,
    /// Nothing to paste into; the grid was not touched.
    Ignored(InvalidPasteTarget),
    /// The user cancelled a prompt. Cells written before it stay written.
    Cancelled(PasteError),
}

/// Result of one paste pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PasteReport {
    cells: Vec<CellRef>,
    skipped: usize,
    status: PasteStatus,
}

impl PasteReport {
    /// Cells written, in the order they were written.
    pub fn cells(&self) -> &[CellRef] {
        &self.cells
    }

    /// Tokens that landed on a cell but were not written (unbound columns and
    /// cells the user chose to skip).
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn status(&self) -> &PasteStatus {
        &self.status
    }

    /// The cancelled prompt, if any.
    pub fn cancelled_at(&self) -> Option<&PasteError> {
        match &self.status {
            PasteStatus::Cancelled(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == PasteStatus::Completed
    }

    pub fn was_cancelled(&self) -> bool {
        matches!(self.status, PasteStatus::Cancelled(_))
    }
}

/// Everything about the anchor that stays fixed for one paste.
struct PasteTarget {
    columns: Vec<Column>,
    column_index: usize,
    rows: Vec<RowId>,
    row_index: usize,
}

fn resolve_target<G: Grid + ?Sized>(grid: &G) -> Result<PasteTarget, InvalidPasteTarget> {
    let active = grid.active_cell().ok_or(InvalidPasteTarget::NoActiveCell)?;
    let row = grid.row(active.row).ok_or(InvalidPasteTarget::NoActiveCell)?;
    if !row.is_data_row() {
        return Err(InvalidPasteTarget::NotDataRow);
    }
    let column_key = active.column.ok_or(InvalidPasteTarget::NoActiveColumn)?;

    let layout = grid.layout(&row.layout).ok_or(InvalidPasteTarget::ColumnNotInLayout)?;
    let columns: Vec<Column> = layout.real_columns().into_iter().cloned().collect();
    let column_index = columns
        .iter()
        .position(|c| c.key == column_key)
        .ok_or(InvalidPasteTarget::ColumnNotInLayout)?;

    Ok(PasteTarget {
        columns,
        column_index,
        rows: grid.rows(&row.parent).to_vec(),
        row_index: row.index,
    })
}

/// Paste `block` at the grid's active cell.
///
/// Returns the cells that were written; the selection is left alone (see
/// [`paste_and_select`]).
pub fn paste_data<G, C>(
    grid: &mut G,
    block: &PasteBlock,
    converter: &Converter,
    confirm: &mut C,
) -> PasteReport
where
    G: Grid + ?Sized,
    C: ConfirmationProvider + ?Sized,
{
    let mut report = PasteReport::default();

    let target = match resolve_target(grid) {
        Ok(target) => target,
        Err(reason) => {
            log::debug!("paste ignored: {reason}");
            report.status = PasteStatus::Ignored(reason);
            return report;
        }
    };
    if block.is_empty() {
        return report;
    }

    let column_count = target.columns.len();
    let required = block.max_row_width();
    if target.column_index + required > column_count {
        let available = column_count - target.column_index;
        let prompt = PastePrompt::NotEnoughColumns { available, required };
        if confirm.confirm(&prompt) == PromptResponse::Cancel {
            log::warn!("paste cancelled: {required} columns needed, {available} available");
            report.status =
                PasteStatus::Cancelled(PasteError::InsufficientColumns { available, required });
            return report;
        }
    }

    let last_row = target.rows.len().min(target.row_index + block.row_count());
    'rows: for (offset, &row_id) in target.rows[target.row_index.min(last_row)..last_row]
        .iter()
        .enumerate()
    {
        let tokens = &block.rows()[offset];
        let last_col = column_count.min(target.column_index + tokens.len());

        for (column, token) in target.columns[target.column_index..last_col].iter().zip(tokens) {
            if !column.is_editable() {
                let prompt = PastePrompt::ReadOnlyColumn { column: column.display_name().to_string() };
                if confirm.confirm(&prompt) == PromptResponse::Cancel {
                    log::warn!("paste cancelled at read-only column '{}'", column.key);
                    report.status = PasteStatus::Cancelled(PasteError::ReadOnlyColumn {
                        column: column.display_name().to_string(),
                    });
                    break 'rows;
                }
                report.skipped += 1;
                continue;
            }

            if column.is_unbound() {
                report.skipped += 1;
                continue;
            }

            let written = converter
                .convert_token(token, column)
                .map_err(|e| e.to_string())
                .and_then(|assignment| match assignment {
                    Some(assignment) => grid
                        .write_cell(row_id, column, assignment)
                        .map(|()| true)
                        .map_err(|e| e.to_string()),
                    None => Ok(false),
                });

            match written {
                Ok(true) => {
                    log::debug!("pasted '{}' into row #{} column '{}'", token, row_id.raw(), column.key);
                    report.cells.push(CellRef::new(row_id, column.key.as_str()));
                }
                // Column has no field type to assign to.
                Ok(false) => report.skipped += 1,
                Err(error) => {
                    let prompt = PastePrompt::ConversionFailed {
                        column: column.display_name().to_string(),
                        value: token.clone(),
                        error,
                    };
                    if confirm.confirm(&prompt) == PromptResponse::Cancel {
                        log::warn!("paste cancelled converting '{}' for '{}'", token, column.key);
                        report.status = PasteStatus::Cancelled(PasteError::ConversionFailure {
                            column: column.display_name().to_string(),
                            value: token.clone(),
                        });
                        break 'rows;
                    }
                    report.skipped += 1;
                }
            }
        }
    }

    log::info!(
        "paste wrote {} cell(s), skipped {}{}",
        report.cells.len(),
        report.skipped,
        if report.was_cancelled() { " (cancelled)" } else { "" }
    );
    report
}

/// [`paste_data`], then make the written cells the new selection.
///
/// The selection is only replaced when at least one cell was written.
pub fn paste_and_select<G, C>(
    grid: &mut G,
    block: &PasteBlock,
    converter: &Converter,
    confirm: &mut C,
) -> PasteReport
where
    G: Grid + ?Sized,
    C: ConfirmationProvider + ?Sized,
{
    let report = paste_data(grid, block, converter, confirm);
    if !report.cells().is_empty() {
        grid.select_cells(report.cells().to_vec());
    }
    report
}
