//! Clipboard engine for hierarchical grids: token conversion, paste mapping,
//! selection validation and copy, plus an in-memory [`GridModel`].

pub mod convert;
pub mod copy;
pub mod model;
pub mod paste;
pub mod prompt;
pub mod selection;

#[cfg(test)]
pub mod harness;

pub use convert::{ConversionError, Converter, ParserRegistry};
pub use copy::{copy_selection, INVALID_SELECTION_MESSAGE};
pub use model::GridModel;
pub use paste::{paste_and_select, paste_data, InvalidPasteTarget, PasteError, PasteReport, PasteStatus};
pub use prompt::{
    AlwaysCancel, AlwaysProceed, ConfirmationProvider, PastePrompt, PromptResponse,
    PASTE_ERROR_CAPTION,
};
pub use selection::{
    is_selection_cross_band, is_selection_valid, resolve_copy_type, validate_selection,
    SelectionError,
};
