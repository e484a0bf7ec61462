//! `gridclip-core`: data model shared by the clipboard engine and its hosts.
//!
//! Nothing in here performs paste or copy; it describes the grid the engine
//! talks to (columns, rows, bands, selection) and the values that flow
//! between clipboard text and cells.

pub mod block;
pub mod column;
pub mod culture;
pub mod grid;
pub mod row;
pub mod selection;
pub mod value;

pub use block::PasteBlock;
pub use column::{Column, ColumnKind, ColumnLayout, ValueConverter};
pub use culture::Culture;
pub use grid::{CellWriteError, Grid};
pub use row::{Row, RowId, RowKind, RowParent};
pub use selection::{
    ActiveCell, CellClickAction, CellRef, ClipboardSettings, CopyType, SelectionBounds,
    SelectionSettings,
};
pub use value::{CellAssignment, CellValue, ColumnType, DataType};
