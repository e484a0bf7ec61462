//! Test fixture: a small two-band grid with one column of every flavour the
//! paste and copy paths care about.
//!
//! Root layout `Data` (level 0), real columns in order:
//!
//! | key      | kind     | type    | notes                               |
//! |----------|----------|---------|-------------------------------------|
//! | NInt     | Numeric  | Int32?  | row i holds i                       |
//! | Code     | Text     | Int32   | converter keeps the digits of text  |
//! | Int      | Numeric  | Int32   | row i holds i                       |
//! | Bool     | CheckBox | Bool    | under group header `Flags`; i%3==2  |
//! | ReadOnly | Text     | String  | under `Flags`; read-only, "orig"    |
//! | Text     | Text     | String  | "text i"                            |
//! | Unbound  | Unbound  | -       |                                     |
//!
//! The first root row has three rows in child band `Items` (level 1) with a
//! single `Int` column holding -1, -2, -3.

use std::collections::BTreeMap;
use std::sync::Arc;

use gridclip_core::{
    CellValue, Column, ColumnKind, ColumnLayout, ColumnType, Culture, DataType, RowId, RowParent,
    ValueConverter,
};

use crate::model::GridModel;

pub struct Fixture {
    pub grid: GridModel,
    /// Root data rows.
    pub rows: Vec<RowId>,
    /// `Items` rows under `rows[0]`.
    pub children: Vec<RowId>,
}

#[derive(Debug)]
struct DigitsConverter;

impl ValueConverter for DigitsConverter {
    fn convert_back(
        &self,
        text: &str,
        _parameter: Option<&str>,
        _culture: &Culture,
    ) -> Result<CellValue, String> {
        let digits: String = text.chars().filter(char::is_ascii_digit).collect();
        digits
            .parse::<i64>()
            .map(CellValue::Int)
            .map_err(|_| format!("no digits in '{text}'"))
    }
}

pub fn root_layout() -> ColumnLayout {
    ColumnLayout::new(
        "Data",
        0,
        vec![
            Column::new("NInt", ColumnKind::Numeric).with_type(ColumnType::Optional(DataType::Int32)),
            Column::new("Code", ColumnKind::Text)
                .with_type(ColumnType::Required(DataType::Int32))
                .with_converter(Arc::new(DigitsConverter), None),
            Column::new("Int", ColumnKind::Numeric).with_type(ColumnType::Required(DataType::Int32)),
            Column::group(
                "Flags",
                vec![
                    Column::new("Bool", ColumnKind::CheckBox)
                        .with_type(ColumnType::Required(DataType::Bool)),
                    Column::new("ReadOnly", ColumnKind::Text)
                        .with_type(ColumnType::Required(DataType::String))
                        .with_header("Read Only")
                        .read_only(),
                ],
            ),
            Column::new("Text", ColumnKind::Text).with_type(ColumnType::Required(DataType::String)),
            Column::new("Unbound", ColumnKind::Unbound),
        ],
    )
}

pub fn items_layout() -> ColumnLayout {
    ColumnLayout::new(
        "Items",
        1,
        vec![Column::new("Int", ColumnKind::Numeric).with_type(ColumnType::Required(DataType::Int32))],
    )
}

/// `row_count` root rows, plus the child band under the first one.
pub fn fixture(row_count: usize) -> Fixture {
    let mut grid = GridModel::new(root_layout());
    grid.add_layout(items_layout());

    let mut rows = Vec::with_capacity(row_count);
    for i in 0..row_count {
        let n = i as i64;
        let id = grid
            .push_row(
                RowParent::Root,
                [
                    ("NInt", CellValue::Int(n)),
                    ("Int", CellValue::Int(n)),
                    ("Bool", CellValue::Bool(i % 3 == 2)),
                    ("ReadOnly", CellValue::from("orig")),
                    ("Text", CellValue::Text(format!("text {i}"))),
                ],
            )
            .expect("root rows");
        rows.push(id);
    }

    let mut children = Vec::new();
    if let Some(&first) = rows.first() {
        let band = RowParent::ChildBand { row: first, band: "Items".into() };
        for i in 1..=3i64 {
            let id = grid
                .push_row(band.clone(), [("Int", CellValue::Int(-i))])
                .expect("child rows");
            children.push(id);
        }
    }

    Fixture { grid, rows, children }
}

/// Every cell of every row, for before/after comparisons.
pub fn snapshot(grid: &GridModel) -> Vec<(RowId, BTreeMap<String, CellValue>)> {
    grid.all_rows()
        .iter()
        .map(|row| (row.id, row.cells.clone()))
        .collect()
}

