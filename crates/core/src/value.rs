use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::culture::Culture;

/// Declared type of a column's underlying field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Bool,
    Char,
    Byte,
    Int16,
    Int32,
    Int64,
    Single,
    Double,
    String,
    DateTime,
    Uri,
}

impl DataType {
    pub fn name(self) -> &'static str {
        match self {
            DataType::Bool => "Bool",
            DataType::Char => "Char",
            DataType::Byte => "Byte",
            DataType::Int16 => "Int16",
            DataType::Int32 => "Int32",
            DataType::Int64 => "Int64",
            DataType::Single => "Single",
            DataType::Double => "Double",
            DataType::String => "String",
            DataType::DateTime => "DateTime",
            DataType::Uri => "Uri",
        }
    }

    /// Integer range for the integral types, `None` otherwise.
    pub fn int_range(self) -> Option<(i64, i64)> {
        match self {
            DataType::Byte => Some((u8::MIN as i64, u8::MAX as i64)),
            DataType::Int16 => Some((i16::MIN as i64, i16::MAX as i64)),
            DataType::Int32 => Some((i32::MIN as i64, i32::MAX as i64)),
            DataType::Int64 => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A column's data type, possibly wrapped as optional (nullable).
///
/// Empty clipboard text pasted into an `Optional` column clears the cell;
/// into a `Required` column it must parse like any other token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Required(DataType),
    Optional(DataType),
}

impl ColumnType {
    pub fn data_type(self) -> DataType {
        match self {
            ColumnType::Required(t) | ColumnType::Optional(t) => t,
        }
    }

    pub fn is_optional(self) -> bool {
        matches!(self, ColumnType::Optional(_))
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Required(t) => write!(f, "{t}"),
            ColumnType::Optional(t) => write!(f, "{t}?"),
        }
    }
}

/// Typed value held by a cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    Text(String),
    DateTime(NaiveDateTime),
    Uri(Url),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Text as it would appear on the clipboard for the given culture.
    pub fn display(&self, culture: &Culture) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => culture.format_bool(*b).to_string(),
            CellValue::Int(n) => n.to_string(),
            CellValue::Float(n) => culture.format_float(*n),
            CellValue::Char(c) => c.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::DateTime(dt) => culture.format_datetime(dt),
            CellValue::Uri(u) => u.to_string(),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Int(n)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Float(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Null)
    }
}

/// What the engine hands to the grid for one cell write.
#[derive(Debug, Clone, PartialEq)]
pub enum CellAssignment {
    /// Already converted to the column's type.
    Value(CellValue),
    /// Unconverted clipboard text; the column's value converter turns it into
    /// a value when the grid applies it.
    Raw(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_column_type_display() {
        assert_eq!(ColumnType::Required(DataType::Int32).to_string(), "Int32");
        assert_eq!(ColumnType::Optional(DataType::Bool).to_string(), "Bool?");
    }

    #[test]
    fn test_int_ranges() {
        assert_eq!(DataType::Byte.int_range(), Some((0, 255)));
        assert_eq!(DataType::Int16.int_range(), Some((-32768, 32767)));
        assert_eq!(DataType::Double.int_range(), None);
    }

    #[test]
    fn test_display_per_culture() {
        assert_eq!(CellValue::Null.display(&Culture::EN_US), "");
        assert_eq!(CellValue::Bool(true).display(&Culture::EN_US), "True");
        assert_eq!(CellValue::Float(2.25).display(&Culture::DE_DE), "2,25");
        let dt = NaiveDate::from_ymd_opt(2009, 5, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(CellValue::DateTime(dt).display(&Culture::EN_GB), "01/05/2009 00:00:00");
    }

    #[test]
    fn test_option_into_cell_value() {
        assert_eq!(CellValue::from(None::<bool>), CellValue::Null);
        assert_eq!(CellValue::from(Some(3i64)), CellValue::Int(3));
    }

    #[test]
    fn test_cell_value_json_shape() {
        let json = serde_json::to_string(&CellValue::Int(4)).unwrap();
        assert_eq!(json, r#"{"type":"int","value":4}"#);
        let null = serde_json::to_string(&CellValue::Null).unwrap();
        assert_eq!(null, r#"{"type":"null"}"#);
    }
}
