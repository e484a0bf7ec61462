//! Columns and per-band column layouts.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::culture::Culture;
use crate::value::{CellValue, ColumnType};

/// Turns edited text back into a field value, the way a display converter on
/// a text column does when the user commits an edit.
pub trait ValueConverter: fmt::Debug + Send + Sync {
    fn convert_back(
        &self,
        text: &str,
        parameter: Option<&str>,
        culture: &Culture,
    ) -> Result<CellValue, String>;
}

/// Column kind discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Free-text editor
    Text,
    Numeric,
    CheckBox,
    Date,
    ComboBox,
    Template,
    /// Editable but not bound to a data field
    Unbound,
    /// Display only
    Hyperlink,
    /// Display only
    Image,
    /// Header grouping other columns; not a real column
    Group,
}

impl ColumnKind {
    /// Kinds that accept edits at all. Read-only still applies on top.
    pub fn is_editable(self) -> bool {
        matches!(
            self,
            ColumnKind::Text
                | ColumnKind::Numeric
                | ColumnKind::CheckBox
                | ColumnKind::Date
                | ColumnKind::ComboBox
                | ColumnKind::Template
                | ColumnKind::Unbound
        )
    }

    pub fn is_free_text(self) -> bool {
        matches!(self, ColumnKind::Text)
    }
}

#[derive(Debug, Clone)]
pub struct Column {
    pub key: String,
    pub header_text: Option<String>,
    /// `None` when the column has no backing field type (templates, unbound).
    pub data_type: Option<ColumnType>,
    pub read_only: bool,
    pub kind: ColumnKind,
    pub converter: Option<Arc<dyn ValueConverter>>,
    pub converter_parameter: Option<String>,
    /// Nested columns, only populated for `ColumnKind::Group`.
    pub children: Vec<Column>,
}

impl Column {
    pub fn new(key: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            key: key.into(),
            header_text: None,
            data_type: None,
            read_only: false,
            kind,
            converter: None,
            converter_parameter: None,
            children: Vec::new(),
        }
    }

    /// A grouping header over `children`.
    pub fn group(key: impl Into<String>, children: Vec<Column>) -> Self {
        Self {
            children,
            ..Self::new(key, ColumnKind::Group)
        }
    }

    pub fn with_type(mut self, data_type: ColumnType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header_text = Some(header.into());
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn with_converter(
        mut self,
        converter: Arc<dyn ValueConverter>,
        parameter: Option<String>,
    ) -> Self {
        self.converter = Some(converter);
        self.converter_parameter = parameter;
        self
    }

    /// Header text, falling back to the key. Used in user-facing messages.
    pub fn display_name(&self) -> &str {
        self.header_text.as_deref().unwrap_or(&self.key)
    }

    /// Editable kind and not read-only.
    pub fn is_editable(&self) -> bool {
        self.kind.is_editable() && !self.read_only
    }

    pub fn is_unbound(&self) -> bool {
        self.kind == ColumnKind::Unbound
    }
}

/// The columns of one band, in display order.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    pub key: String,
    /// Band depth; root layout is 0.
    pub level: usize,
    pub columns: Vec<Column>,
}

impl ColumnLayout {
    pub fn new(key: impl Into<String>, level: usize, columns: Vec<Column>) -> Self {
        Self { key: key.into(), level, columns }
    }

    /// Every column, group headers included, flattened pre-order.
    pub fn all_columns(&self) -> Vec<&Column> {
        fn walk<'a>(columns: &'a [Column], out: &mut Vec<&'a Column>) {
            for column in columns {
                out.push(column);
                walk(&column.children, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.columns, &mut out);
        out
    }

    /// Columns that hold cells, i.e. everything except group headers.
    /// Paste offsets and selection rectangles are measured in this ordering.
    pub fn real_columns(&self) -> Vec<&Column> {
        self.all_columns()
            .into_iter()
            .filter(|c| c.kind != ColumnKind::Group)
            .collect()
    }

    /// Position of `key` in [`Self::real_columns`].
    pub fn position(&self, key: &str) -> Option<usize> {
        self.real_columns().iter().position(|c| c.key == key)
    }

    pub fn column(&self, key: &str) -> Option<&Column> {
        self.all_columns().into_iter().find(|c| c.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::DataType;

    fn layout() -> ColumnLayout {
        ColumnLayout::new(
            "Data",
            0,
            vec![
                Column::new("Id", ColumnKind::Numeric).with_type(ColumnType::Required(DataType::Int32)),
                Column::group(
                    "Details",
                    vec![
                        Column::new("Name", ColumnKind::Text),
                        Column::new("Active", ColumnKind::CheckBox),
                    ],
                ),
                Column::new("Link", ColumnKind::Hyperlink),
            ],
        )
    }

    #[test]
    fn test_all_columns_flattens_groups_pre_order() {
        let layout = layout();
        let keys: Vec<&str> = layout.all_columns().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["Id", "Details", "Name", "Active", "Link"]);
    }

    #[test]
    fn test_real_columns_skip_group_headers() {
        let layout = layout();
        let keys: Vec<&str> = layout.real_columns().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["Id", "Name", "Active", "Link"]);
        assert_eq!(layout.position("Active"), Some(2));
        assert_eq!(layout.position("Details"), None);
    }

    #[test]
    fn test_editability() {
        assert!(Column::new("a", ColumnKind::Text).is_editable());
        assert!(!Column::new("a", ColumnKind::Text).read_only().is_editable());
        assert!(!Column::new("a", ColumnKind::Hyperlink).is_editable());
        assert!(Column::new("a", ColumnKind::Unbound).is_editable());
    }

    #[test]
    fn test_display_name_falls_back_to_key() {
        assert_eq!(Column::new("Int", ColumnKind::Numeric).display_name(), "Int");
        assert_eq!(
            Column::new("Int", ColumnKind::Numeric).with_header("Number").display_name(),
            "Number"
        );
    }
}
