// Property-based tests for selection validation and paste mapping.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::collections::BTreeSet;

use proptest::prelude::*;

use gridclip_core::{
    CellRef, CellValue, Column, ColumnKind, ColumnLayout, ColumnType, CopyType, Culture, DataType,
    Grid, PasteBlock, RowId, RowParent,
};
use gridclip_engine::*;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

const ROWS: usize = 12;
const KEYS: [&str; 5] = ["C0", "C1", "U", "C3", "C4"];

/// Five columns, the middle one unbound; every root row has two child rows.
fn grid() -> (GridModel, Vec<RowId>, Vec<RowId>) {
    let columns = KEYS
        .iter()
        .map(|&key| {
            if key == "U" {
                Column::new(key, ColumnKind::Unbound)
            } else {
                Column::new(key, ColumnKind::Numeric).with_type(ColumnType::Required(DataType::Int64))
            }
        })
        .collect();
    let mut grid = GridModel::new(ColumnLayout::new("Root", 0, columns));
    grid.add_layout(ColumnLayout::new(
        "Child",
        1,
        vec![Column::new("C0", ColumnKind::Numeric).with_type(ColumnType::Required(DataType::Int64))],
    ));

    let mut roots = Vec::new();
    let mut children = Vec::new();
    for i in 0..ROWS {
        let id = grid
            .push_row(RowParent::Root, [("C0", CellValue::Int(i as i64))])
            .unwrap();
        roots.push(id);
        for _ in 0..2 {
            let band = RowParent::ChildBand { row: id, band: "Child".into() };
            children.push(grid.push_row(band, [("C0", CellValue::Int(0))]).unwrap());
        }
    }
    (grid, roots, children)
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn arb_row_set() -> impl Strategy<Value = BTreeSet<usize>> {
    prop::collection::btree_set(0..ROWS, 1..6)
}

fn arb_cell_set() -> impl Strategy<Value = BTreeSet<(usize, usize)>> {
    prop::collection::btree_set((0..6usize, 0..KEYS.len()), 1..10)
}

/// Ragged block of integer tokens.
fn arb_block() -> impl Strategy<Value = Vec<Vec<i64>>> {
    prop::collection::vec(prop::collection::vec(-1000i64..1000, 0..7), 0..6)
}

fn to_block(values: &[Vec<i64>]) -> PasteBlock {
    values
        .iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect::<Vec<_>>())
        .collect()
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn row_selection_valid_iff_contiguous(indices in arb_row_set()) {
        let (mut grid, roots, _) = grid();
        grid.clipboard_mut().copy_type = CopyType::SelectedRows;
        for &i in &indices {
            grid.selection_mut().select_row(roots[i]);
        }

        let min = *indices.iter().next().unwrap();
        let max = *indices.iter().next_back().unwrap();
        prop_assert_eq!(is_selection_valid(&grid), max - min + 1 == indices.len());
    }

    #[test]
    fn cell_selection_valid_iff_full_rectangle(cells in arb_cell_set()) {
        let (mut grid, roots, _) = grid();
        for &(r, c) in &cells {
            grid.selection_mut().select_cell(CellRef::new(roots[r], KEYS[c]));
        }

        let min_r = cells.iter().map(|&(r, _)| r).min().unwrap();
        let max_r = cells.iter().map(|&(r, _)| r).max().unwrap();
        let min_c = cells.iter().map(|&(_, c)| c).min().unwrap();
        let max_c = cells.iter().map(|&(_, c)| c).max().unwrap();
        let area = (max_r - min_r + 1) * (max_c - min_c + 1);

        prop_assert_eq!(is_selection_valid(&grid), area == cells.len());
    }

    #[test]
    fn mixed_levels_never_valid(indices in arb_row_set(), child in 0..(ROWS * 2)) {
        let (mut grid, roots, children) = grid();
        grid.clipboard_mut().copy_type = CopyType::SelectedRows;
        for &i in &indices {
            grid.selection_mut().select_row(roots[i]);
        }
        grid.selection_mut().select_row(children[child]);

        prop_assert!(is_selection_cross_band(&grid));
        prop_assert_eq!(validate_selection(&grid), Err(SelectionError::CrossBand));
    }

    #[test]
    fn valid_copy_has_bounds_shape(indices in arb_row_set()) {
        let (mut grid, roots, _) = grid();
        grid.clipboard_mut().copy_type = CopyType::SelectedRows;
        for &i in &indices {
            grid.selection_mut().select_row(roots[i]);
        }
        if let Ok(bounds) = validate_selection(&grid) {
            let block = copy_selection(&grid, &Culture::INVARIANT).unwrap();
            prop_assert_eq!(block.row_count(), bounds.row_count());
            prop_assert!(block.rows().iter().all(|r| r.len() == KEYS.len()));
        }
    }
}

// ---------------------------------------------------------------------------
// Paste
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn paste_writes_each_in_bounds_cell_once(
        values in arb_block(),
        anchor_row in 0..ROWS,
        anchor_col in 0..KEYS.len(),
    ) {
        let (mut grid, roots, _) = grid();
        grid.activate(roots[anchor_row], KEYS[anchor_col]);

        let report = paste_data(
            &mut grid,
            &to_block(&values),
            &Converter::new(Culture::INVARIANT),
            &mut AlwaysProceed,
        );

        let mut expected = Vec::new();
        for (r, row) in values.iter().enumerate() {
            let Some(&row_id) = roots.get(anchor_row + r) else { break };
            for (c, &value) in row.iter().enumerate() {
                let Some(&key) = KEYS.get(anchor_col + c) else { break };
                if key != "U" {
                    expected.push((CellRef::new(row_id, key), value));
                }
            }
        }

        let written: Vec<CellRef> = expected.iter().map(|(cell, _)| cell.clone()).collect();
        prop_assert_eq!(report.cells(), &written[..]);
        let unique: BTreeSet<&CellRef> = report.cells().iter().collect();
        prop_assert_eq!(unique.len(), report.cells().len());
        for (cell, value) in &expected {
            prop_assert_eq!(grid.value(cell), Some(&CellValue::Int(*value)));
        }
        for &row in &roots {
            prop_assert_eq!(grid.value(&CellRef::new(row, "U")), Some(&CellValue::Null));
        }
    }

    #[test]
    fn cancel_on_overflow_writes_nothing(
        values in arb_block(),
        anchor_row in 0..ROWS,
        anchor_col in 0..KEYS.len(),
    ) {
        let (mut grid, roots, _) = grid();
        grid.activate(roots[anchor_row], KEYS[anchor_col]);
        let block = to_block(&values);
        let overflows = anchor_col + block.max_row_width() > KEYS.len();

        let report = paste_data(
            &mut grid,
            &block,
            &Converter::new(Culture::INVARIANT),
            &mut AlwaysCancel,
        );

        if overflows {
            prop_assert!(report.cells().is_empty());
            prop_assert!(report.was_cancelled());
        } else {
            prop_assert!(report.is_complete());
        }
    }

    #[test]
    fn child_band_paste_never_leaves_band(
        values in arb_block(),
        anchor in 0..2usize,
    ) {
        let (mut grid, roots, children) = grid();
        let first_band = &children[..2];
        grid.activate(first_band[anchor], "C0");

        let report = paste_data(
            &mut grid,
            &to_block(&values),
            &Converter::new(Culture::INVARIANT),
            &mut AlwaysProceed,
        );

        for cell in report.cells() {
            prop_assert!(first_band.contains(&cell.row));
        }
        for &row in &roots {
            let original = grid.row(row).unwrap().index as i64;
            prop_assert_eq!(grid.value(&CellRef::new(row, "C0")), Some(&CellValue::Int(original)));
        }
    }
}
