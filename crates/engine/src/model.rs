//! In-memory hierarchical grid.
//!
//! `GridModel` keeps every row in one arena addressed by [`RowId`] and groups
//! them into collections keyed by [`RowParent`]: the root rows, the rows of a
//! child band under a parent row, and the data rows under a group-by row.
//! Each row is displayed with one [`ColumnLayout`], looked up by key.

use rustc_hash::FxHashMap;

use gridclip_core::{
    ActiveCell, CellAssignment, CellRef, CellValue, CellWriteError, ClipboardSettings, Column,
    ColumnLayout, Culture, Grid, Row, RowId, RowKind, RowParent, SelectionSettings,
};

#[derive(Debug, Clone)]
pub struct GridModel {
    layouts: FxHashMap<String, ColumnLayout>,
    root_layout: String,
    rows: Vec<Row>,
    collections: FxHashMap<RowParent, Vec<RowId>>,
    active: Option<ActiveCell>,
    selection: SelectionSettings,
    clipboard: ClipboardSettings,
    /// Culture handed to column value converters on write.
    culture: Culture,
}

impl GridModel {
    pub fn new(root: ColumnLayout) -> Self {
        let root_layout = root.key.clone();
        let mut layouts = FxHashMap::default();
        layouts.insert(root_layout.clone(), root);
        let mut collections = FxHashMap::default();
        collections.insert(RowParent::Root, Vec::new());
        Self {
            layouts,
            root_layout,
            rows: Vec::new(),
            collections,
            active: None,
            selection: SelectionSettings::default(),
            clipboard: ClipboardSettings::default(),
            culture: Culture::default(),
        }
    }

    /// Register the layout of a child band. The layout key is the band name
    /// used in [`RowParent::ChildBand`].
    pub fn add_layout(&mut self, layout: ColumnLayout) {
        self.layouts.insert(layout.key.clone(), layout);
    }

    pub fn root_layout(&self) -> &ColumnLayout {
        &self.layouts[&self.root_layout]
    }

    pub fn culture(&self) -> &Culture {
        &self.culture
    }

    pub fn set_culture(&mut self, culture: Culture) {
        self.culture = culture;
    }

    /// Append a data row to the collection of `parent`.
    pub fn push_row<I, K>(&mut self, parent: RowParent, values: I) -> Result<RowId, String>
    where
        I: IntoIterator<Item = (K, CellValue)>,
        K: Into<String>,
    {
        let (layout, level) = self.placement(&parent)?;
        let cells = values.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Ok(self.insert_row(parent, RowKind::Data, layout, level, cells))
    }

    /// Append a group-by row holding `label` under `column`.
    pub fn push_group_row(
        &mut self,
        parent: RowParent,
        column: &str,
        label: CellValue,
    ) -> Result<RowId, String> {
        let (layout, level) = self.placement(&parent)?;
        let mut cells = std::collections::BTreeMap::new();
        cells.insert(column.to_string(), label);
        Ok(self.insert_row(parent, RowKind::GroupBy, layout, level, cells))
    }

    /// Append a non-data row (add-new placeholder, summary) for tests and hosts.
    pub fn push_special_row(&mut self, parent: RowParent, kind: RowKind) -> Result<RowId, String> {
        let (layout, level) = self.placement(&parent)?;
        Ok(self.insert_row(parent, kind, layout, level, Default::default()))
    }

    fn placement(&self, parent: &RowParent) -> Result<(String, usize), String> {
        match parent {
            RowParent::Root => Ok((self.root_layout.clone(), self.root_layout().level)),
            RowParent::ChildBand { row, band } => {
                if self.row(*row).is_none() {
                    return Err(format!("unknown parent row #{}", row.raw()));
                }
                let layout = self
                    .layouts
                    .get(band)
                    .ok_or_else(|| format!("no column layout for band '{band}'"))?;
                Ok((layout.key.clone(), layout.level))
            }
            RowParent::GroupRow(group) => {
                let group_row = self
                    .row(*group)
                    .ok_or_else(|| format!("unknown group row #{}", group.raw()))?;
                if group_row.kind != RowKind::GroupBy {
                    return Err(format!("row #{} is not a group-by row", group.raw()));
                }
                Ok((group_row.layout.clone(), group_row.level))
            }
        }
    }

    fn insert_row(
        &mut self,
        parent: RowParent,
        kind: RowKind,
        layout: String,
        level: usize,
        cells: std::collections::BTreeMap<String, CellValue>,
    ) -> RowId {
        let id = RowId::from_raw(self.rows.len());
        let collection = self.collections.entry(parent.clone()).or_default();
        let index = collection.len();
        collection.push(id);
        self.rows.push(Row { id, kind, index, level, layout, parent, cells });
        id
    }

    /// Row at `index` in the collection of `parent`.
    pub fn row_at(&self, parent: &RowParent, index: usize) -> Option<RowId> {
        self.rows(parent).get(index).copied()
    }

    /// Child bands that have rows under `row`, in band-key order.
    pub fn child_bands(&self, row: RowId) -> Vec<&str> {
        let mut bands: Vec<&str> = self
            .collections
            .iter()
            .filter_map(|(parent, ids)| match parent {
                RowParent::ChildBand { row: r, band } if *r == row && !ids.is_empty() => {
                    Some(band.as_str())
                }
                _ => None,
            })
            .collect();
        bands.sort_unstable();
        bands
    }

    /// Regroup the root data rows into group-by rows on `column`.
    ///
    /// Groups appear in order of first occurrence; rows keep their relative
    /// order inside a group and are re-indexed within it.
    pub fn group_by(&mut self, column: &str) -> Result<(), String> {
        if self.root_layout().column(column).is_none() {
            return Err(format!("no column '{column}' in layout '{}'", self.root_layout));
        }

        let root_rows = self.collections.insert(RowParent::Root, Vec::new()).unwrap_or_default();
        let mut groups: Vec<(CellValue, Vec<RowId>)> = Vec::new();
        for id in root_rows {
            let key = self.rows[id.raw()].value(column).clone();
            match groups.iter_mut().find(|(k, _)| *k == key) {
                Some((_, members)) => members.push(id),
                None => groups.push((key, vec![id])),
            }
        }

        for (label, members) in groups {
            let group = self.push_group_row(RowParent::Root, column, label)?;
            let parent = RowParent::GroupRow(group);
            for (index, id) in members.iter().enumerate() {
                let row = &mut self.rows[id.raw()];
                row.parent = parent.clone();
                row.index = index;
            }
            self.collections.insert(parent, members);
        }
        log::debug!("grouped root rows by '{column}'");
        Ok(())
    }

    pub fn set_active_cell(&mut self, active: Option<ActiveCell>) {
        self.active = active;
    }

    /// Focus a cell.
    pub fn activate(&mut self, row: RowId, column: impl Into<String>) {
        self.active = Some(ActiveCell { row, column: Some(column.into()) });
    }

    pub fn selection_mut(&mut self) -> &mut SelectionSettings {
        &mut self.selection
    }

    pub fn clipboard_mut(&mut self) -> &mut ClipboardSettings {
        &mut self.clipboard
    }

    /// Value of one cell, null when missing.
    pub fn value(&self, cell: &CellRef) -> Option<&CellValue> {
        self.row(cell.row).map(|row| row.value(&cell.column))
    }

    pub fn all_rows(&self) -> &[Row] {
        &self.rows
    }
}

impl Grid for GridModel {
    fn active_cell(&self) -> Option<ActiveCell> {
        self.active.clone()
    }

    fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.get(id.raw())
    }

    fn layout(&self, key: &str) -> Option<&ColumnLayout> {
        self.layouts.get(key)
    }

    fn rows(&self, parent: &RowParent) -> &[RowId] {
        self.collections.get(parent).map(Vec::as_slice).unwrap_or(&[])
    }

    fn selection(&self) -> &SelectionSettings {
        &self.selection
    }

    fn clipboard(&self) -> &ClipboardSettings {
        &self.clipboard
    }

    fn write_cell(
        &mut self,
        row: RowId,
        column: &Column,
        assignment: CellAssignment,
    ) -> Result<(), CellWriteError> {
        let layout_key = self
            .rows
            .get(row.raw())
            .map(|r| r.layout.clone())
            .ok_or(CellWriteError::UnknownRow(row))?;
        let known = self
            .layouts
            .get(&layout_key)
            .is_some_and(|layout| layout.column(&column.key).is_some());
        if !known {
            return Err(CellWriteError::UnknownColumn(column.key.clone()));
        }

        let value = match assignment {
            CellAssignment::Value(value) => value,
            CellAssignment::Raw(text) => match &column.converter {
                Some(converter) => converter
                    .convert_back(&text, column.converter_parameter.as_deref(), &self.culture)
                    .map_err(|message| {
                        log::warn!("converter for '{}' rejected '{}': {}", column.key, text, message);
                        CellWriteError::Rejected { column: column.key.clone(), message }
                    })?,
                None => CellValue::Text(text),
            },
        };

        self.rows[row.raw()].cells.insert(column.key.clone(), value);
        Ok(())
    }

    fn select_cells(&mut self, cells: Vec<CellRef>) {
        self.selection.set_cells(cells);
    }
}
