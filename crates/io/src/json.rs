// JSON export of a grid, band by band

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use gridclip_core::{CellValue, Grid, RowId, RowKind, RowParent};
use gridclip_engine::GridModel;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSnapshot {
    pub layout: String,
    /// Real column keys of the root layout, in order.
    pub columns: Vec<String>,
    pub rows: Vec<RowSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowSnapshot {
    pub id: RowId,
    pub kind: RowKind,
    pub index: usize,
    pub level: usize,
    pub values: BTreeMap<String, CellValue>,
    /// Rows grouped under a group-by row.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<RowSnapshot>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bands: Vec<BandSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandSnapshot {
    pub band: String,
    pub columns: Vec<String>,
    pub rows: Vec<RowSnapshot>,
}

/// Capture the whole row tree of `grid`.
pub fn snapshot(grid: &GridModel) -> GridSnapshot {
    let root = grid.root_layout();
    GridSnapshot {
        layout: root.key.clone(),
        columns: column_keys(grid, &root.key),
        rows: collection(grid, &RowParent::Root),
    }
}

fn column_keys(grid: &GridModel, layout: &str) -> Vec<String> {
    grid.layout(layout)
        .map(|l| l.real_columns().into_iter().map(|c| c.key.clone()).collect())
        .unwrap_or_default()
}

fn collection(grid: &GridModel, parent: &RowParent) -> Vec<RowSnapshot> {
    grid.rows(parent)
        .iter()
        .filter_map(|&id| grid.row(id))
        .map(|row| {
            let members = if row.kind == RowKind::GroupBy {
                collection(grid, &RowParent::GroupRow(row.id))
            } else {
                Vec::new()
            };
            let bands = grid
                .child_bands(row.id)
                .into_iter()
                .map(|band| BandSnapshot {
                    band: band.to_string(),
                    columns: column_keys(grid, band),
                    rows: collection(
                        grid,
                        &RowParent::ChildBand { row: row.id, band: band.to_string() },
                    ),
                })
                .collect();
            RowSnapshot {
                id: row.id,
                kind: row.kind,
                index: row.index,
                level: row.level,
                values: row.cells.clone(),
                members,
                bands,
            }
        })
        .collect()
}

pub fn to_string(grid: &GridModel) -> Result<String, String> {
    serde_json::to_string_pretty(&snapshot(grid)).map_err(|e| e.to_string())
}

/// Export the grid as pretty-printed JSON.
pub fn export(grid: &GridModel, path: &Path) -> Result<(), String> {
    let file = File::create(path).map_err(|e| e.to_string())?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &snapshot(grid)).map_err(|e| e.to_string())?;
    Ok(())
}
