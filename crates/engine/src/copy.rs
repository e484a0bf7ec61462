//! Copy a valid selection into a text block.

use gridclip_core::{CopyType, Culture, Grid, PasteBlock, Row, RowId};

use crate::selection::{resolve_copy_type, validate_selection, SelectionError};

/// Shown to the user when a selection cannot be copied.
pub const INVALID_SELECTION_MESSAGE: &str = "Only rectangular single band regions are allowed.";

/// Render the current selection as a block of display strings.
///
/// Rows mode copies every real column of each selected row. Cells mode
/// copies the bounding rectangle. Rows come out in index order either way.
pub fn copy_selection<G: Grid + ?Sized>(
    grid: &G,
    culture: &Culture,
) -> Result<PasteBlock, SelectionError> {
    let bounds = validate_selection(grid)?;
    let mode = resolve_copy_type(grid);

    let mut ids: Vec<RowId> = match mode {
        CopyType::SelectedRows => grid.selection().selected_rows().to_vec(),
        _ => grid.selection().selected_cells().iter().map(|c| c.row).collect(),
    };
    ids.sort_unstable();
    ids.dedup();

    let mut rows: Vec<&Row> = ids.iter().filter_map(|&id| grid.row(id)).collect();
    rows.sort_by_key(|row| row.index);

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(layout) = grid.layout(&row.layout) else {
            continue;
        };
        let columns = layout.real_columns();
        let span = match mode {
            CopyType::SelectedRows => &columns[..],
            _ => columns.get(bounds.columns()).unwrap_or(&[]),
        };
        out.push(
            span.iter()
                .map(|column| row.value(&column.key).display(culture))
                .collect::<Vec<_>>(),
        );
    }

    log::info!("copied {} row(s) of selection", out.len());
    Ok(PasteBlock::new(out))
}
