use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::CellValue;

/// Stable handle for a row owned by a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(usize);

impl RowId {
    #[inline]
    pub fn from_raw(raw: usize) -> Self {
        RowId(raw)
    }

    #[inline]
    pub fn raw(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Data,
    /// Header row of a group-by bucket; owns the grouped data rows.
    GroupBy,
    /// Placeholder row for adding new records
    AddNew,
    Summary,
}

/// Which collection a row lives in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowParent {
    /// The grid's top-level rows.
    Root,
    /// Rows of child band `band` expanded under `row`.
    ChildBand { row: RowId, band: String },
    /// Data rows grouped under a group-by row.
    GroupRow(RowId),
}

#[derive(Debug, Clone)]
pub struct Row {
    pub id: RowId,
    pub kind: RowKind,
    /// Position within the row's own collection.
    pub index: usize,
    /// Band depth. Rows at different levels never share a selection.
    pub level: usize,
    /// Key of the column layout this row is displayed with.
    pub layout: String,
    pub parent: RowParent,
    pub cells: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn is_data_row(&self) -> bool {
        self.kind == RowKind::Data
    }

    /// Value of a cell; missing fields read as null.
    pub fn value(&self, column: &str) -> &CellValue {
        static NULL: CellValue = CellValue::Null;
        self.cells.get(column).unwrap_or(&NULL)
    }
}
