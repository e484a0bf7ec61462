// Row paths: "3", "3/DataItems/1", "g0/2" (row 2 under group row 0)

use gridclip_core::{CellRef, Grid, RowId, RowKind, RowParent};
use gridclip_engine::GridModel;

/// Resolve a row path against the grid.
pub fn parse_row(grid: &GridModel, path: &str) -> Result<RowId, String> {
    let mut segments = path.split('/');
    let head = segments.next().unwrap_or_default();

    let mut row = match head.strip_prefix('g') {
        Some(group) => {
            let group_row = nth(grid, &RowParent::Root, group, path)?;
            let kind = grid.row(group_row).map(|r| r.kind);
            if kind != Some(RowKind::GroupBy) {
                return Err(format!("'{head}' in '{path}' is not a group row"));
            }
            let member = segments
                .next()
                .ok_or_else(|| format!("'{path}': group path needs a row index after '{head}/'"))?;
            nth(grid, &RowParent::GroupRow(group_row), member, path)?
        }
        None => nth(grid, &RowParent::Root, head, path)?,
    };

    while let Some(band) = segments.next() {
        let index = segments
            .next()
            .ok_or_else(|| format!("'{path}': band '{band}' needs a row index"))?;
        let parent = RowParent::ChildBand { row, band: band.to_string() };
        row = nth(grid, &parent, index, path)?;
    }
    Ok(row)
}

fn nth(grid: &GridModel, parent: &RowParent, index: &str, path: &str) -> Result<RowId, String> {
    let i: usize = index
        .parse()
        .map_err(|_| format!("'{path}': '{index}' is not a row index"))?;
    grid.row_at(parent, i)
        .ok_or_else(|| format!("'{path}': no row {i} there"))
}

/// Inverse of [`parse_row`].
pub fn format_row(grid: &GridModel, id: RowId) -> String {
    let Some(row) = grid.row(id) else {
        return format!("#{}", id.raw());
    };
    match &row.parent {
        RowParent::Root => match row.kind {
            RowKind::GroupBy => format!("g{}", row.index),
            _ => row.index.to_string(),
        },
        RowParent::ChildBand { row: parent, band } => {
            format!("{}/{}/{}", format_row(grid, *parent), band, row.index)
        }
        RowParent::GroupRow(group) => format!("{}/{}", format_row(grid, *group), row.index),
    }
}

/// `ROW:COLUMN`
pub fn parse_cell(grid: &GridModel, spec: &str) -> Result<CellRef, String> {
    let (row, column) = spec
        .rsplit_once(':')
        .ok_or_else(|| format!("'{spec}': expected ROW:COLUMN"))?;
    if column.is_empty() {
        return Err(format!("'{spec}': missing column"));
    }
    Ok(CellRef::new(parse_row(grid, row)?, column))
}

pub fn format_cell(grid: &GridModel, cell: &CellRef) -> String {
    format!("{}:{}", format_row(grid, cell.row), cell.column)
}

/// Comma-separated list, e.g. `--cells 0:Int,0:Bool`.
pub fn parse_list<T>(
    grid: &GridModel,
    list: &str,
    parse: impl Fn(&GridModel, &str) -> Result<T, String>,
) -> Result<Vec<T>, String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse(grid, s))
        .collect()
}
