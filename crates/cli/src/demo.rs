// Demo grid: typed root rows with a nested DataItems band

use chrono::{NaiveDate, NaiveDateTime};
use url::Url;

use gridclip_core::{CellValue, Column, ColumnKind, ColumnLayout, ColumnType, DataType, RowParent};
use gridclip_engine::GridModel;

pub const ROOT_LAYOUT: &str = "Data";
pub const CHILD_BAND: &str = "DataItems";
pub const DEFAULT_ROWS: usize = 21;

const LINK: &str = "http://infragistics.com";

/// Stand-in for "now" on child rows, fixed so output is reproducible.
fn child_timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2009, 5, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap_or_default()
}

fn columns() -> Vec<Column> {
    use ColumnType::{Optional, Required};
    vec![
        Column::new("Int", ColumnKind::Numeric).with_type(Required(DataType::Int32)),
        Column::new("NInt", ColumnKind::Numeric).with_type(Optional(DataType::Int32)),
        Column::new("Double", ColumnKind::Numeric).with_type(Required(DataType::Double)),
        Column::new("Bool", ColumnKind::CheckBox).with_type(Required(DataType::Bool)),
        Column::new("NBool", ColumnKind::CheckBox).with_type(Optional(DataType::Bool)),
        Column::new("String", ColumnKind::Text).with_type(Required(DataType::String)),
        Column::new("DateTime", ColumnKind::Date).with_type(Required(DataType::DateTime)),
        Column::new("Uri", ColumnKind::Hyperlink).with_type(Required(DataType::Uri)),
    ]
}

fn link() -> CellValue {
    Url::parse(LINK).map(CellValue::Uri).unwrap_or_default()
}

fn datetime(i: usize) -> CellValue {
    let hour = (i % 24) as u32;
    NaiveDate::from_ymd_opt(2009, 5, hour + 1)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .map(CellValue::DateTime)
        .unwrap_or_default()
}

/// Build the demo grid with `load_size` root rows.
pub fn load(load_size: usize) -> GridModel {
    let mut grid = GridModel::new(ColumnLayout::new(ROOT_LAYOUT, 0, columns()));
    grid.add_layout(ColumnLayout::new(CHILD_BAND, 1, columns()));

    for i in 0..load_size {
        let n = i as i64;
        let nbool = match i % 3 {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        };

        let values = [
            ("Int", CellValue::Int(n)),
            ("NInt", nbool.map(|_| n).into()),
            ("Double", CellValue::Float(n as f64 * 1.5)),
            ("Bool", CellValue::Bool(nbool.unwrap_or(false))),
            ("NBool", nbool.into()),
            ("String", CellValue::Text(format!("String {i}"))),
            ("DateTime", datetime(i)),
            ("Uri", if nbool.is_some() { link() } else { CellValue::Null }),
        ];
        let row = match grid.push_row(RowParent::Root, values) {
            Ok(row) => row,
            Err(e) => {
                log::error!("demo row {i}: {e}");
                continue;
            }
        };

        if nbool.is_none() {
            continue;
        }
        let band = RowParent::ChildBand { row, band: CHILD_BAND.to_string() };
        let items = [
            (1, n as f64, true, Some(false), Some("Str"), link()),
            (2, n as f64, false, None, None, CellValue::Null),
            (3, n as f64 * 2.5, false, Some(true), Some("str"), link()),
        ];
        for (int, double, flag, nflag, text, uri) in items {
            let values = [
                ("Int", CellValue::Int(int)),
                ("Double", CellValue::Float(double)),
                ("Bool", CellValue::Bool(flag)),
                ("NBool", nflag.into()),
                ("String", text.into()),
                ("DateTime", CellValue::DateTime(child_timestamp())),
                ("Uri", uri),
            ];
            if let Err(e) = grid.push_row(band.clone(), values) {
                log::error!("demo item under row {i}: {e}");
            }
        }
    }

    log::debug!("loaded demo grid with {load_size} rows");
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridclip_core::{Grid, RowKind};

    #[test]
    fn test_row_values_follow_pattern() {
        let grid = load(DEFAULT_ROWS);
        let roots = grid.rows(&RowParent::Root).to_vec();
        assert_eq!(roots.len(), 21);

        let row2 = grid.row(roots[2]).unwrap();
        assert_eq!(row2.value("NBool"), &CellValue::Null);
        assert_eq!(row2.value("NInt"), &CellValue::Null);
        assert_eq!(row2.value("Bool"), &CellValue::Bool(false));
        assert_eq!(row2.value("Uri"), &CellValue::Null);
        assert_eq!(row2.value("Double"), &CellValue::Float(3.0));

        let row4 = grid.row(roots[4]).unwrap();
        assert_eq!(row4.value("NBool"), &CellValue::Bool(true));
        assert_eq!(row4.value("NInt"), &CellValue::Int(4));
        assert_eq!(row4.value("String"), &CellValue::Text("String 4".into()));
        assert_eq!(
            row4.value("Uri"),
            &CellValue::Uri(Url::parse("http://infragistics.com/").unwrap())
        );
    }

    #[test]
    fn test_datetime_wraps_every_24_rows() {
        let grid = load(26);
        let roots = grid.rows(&RowParent::Root).to_vec();
        let expected = NaiveDate::from_ymd_opt(2009, 5, 2).unwrap().and_hms_opt(1, 0, 0).unwrap();
        assert_eq!(grid.row(roots[25]).unwrap().value("DateTime"), &CellValue::DateTime(expected));
    }

    #[test]
    fn test_child_items_only_under_non_null_rows() {
        let grid = load(3);
        let roots = grid.rows(&RowParent::Root).to_vec();
        assert_eq!(grid.child_bands(roots[0]), vec![CHILD_BAND]);
        assert!(grid.child_bands(roots[2]).is_empty());

        let band = RowParent::ChildBand { row: roots[1], band: CHILD_BAND.into() };
        let items = grid.rows(&band);
        assert_eq!(items.len(), 3);
        let third = grid.row(items[2]).unwrap();
        assert_eq!(third.level, 1);
        assert_eq!(third.kind, RowKind::Data);
        assert_eq!(third.value("Double"), &CellValue::Float(2.5));
        assert_eq!(third.value("NInt"), &CellValue::Null);
        assert_eq!(grid.row(items[1]).unwrap().value("String"), &CellValue::Null);
    }

    #[test]
    fn test_uri_column_is_not_editable() {
        let grid = load(1);
        let uri = grid.root_layout().column("Uri").unwrap();
        assert!(!uri.is_editable());
    }
}
