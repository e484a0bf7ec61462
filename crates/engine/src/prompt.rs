//! Proceed/cancel questions raised during a paste.
//!
//! The engine never shows anything itself. Whoever calls it supplies a
//! [`ConfirmationProvider`]; a dialog, a terminal prompt, or a fixed answer.

use std::fmt;

/// Caption shared by every paste prompt.
pub const PASTE_ERROR_CAPTION: &str = "Paste Error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PastePrompt {
    /// The block is wider than the columns right of the anchor.
    NotEnoughColumns { available: usize, required: usize },
    /// Target column does not accept edits.
    ReadOnlyColumn { column: String },
    /// Token could not be converted or the grid refused the value.
    ConversionFailed { column: String, value: String, error: String },
}

impl PastePrompt {
    pub fn caption(&self) -> &'static str {
        PASTE_ERROR_CAPTION
    }
}

impl fmt::Display for PastePrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotEnoughColumns { .. } => write!(
                f,
                "There are not enough columns to paste all of the data. \
                 Do you want to paste the data that fits?"
            ),
            Self::ReadOnlyColumn { column } => write!(
                f,
                "Column '{column}' is read-only. Do you want to continue pasting?"
            ),
            Self::ConversionFailed { column, value, .. } => write!(
                f,
                "Unable to convert '{value}' for column '{column}'. Do you want to continue pasting?"
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptResponse {
    Proceed,
    Cancel,
}

pub trait ConfirmationProvider {
    fn confirm(&mut self, prompt: &PastePrompt) -> PromptResponse;
}

impl<F> ConfirmationProvider for F
where
    F: FnMut(&PastePrompt) -> PromptResponse,
{
    fn confirm(&mut self, prompt: &PastePrompt) -> PromptResponse {
        self(prompt)
    }
}

/// Answers every prompt with proceed.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysProceed;

impl ConfirmationProvider for AlwaysProceed {
    fn confirm(&mut self, _prompt: &PastePrompt) -> PromptResponse {
        PromptResponse::Proceed
    }
}

/// Answers every prompt with cancel.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysCancel;

impl ConfirmationProvider for AlwaysCancel {
    fn confirm(&mut self, _prompt: &PastePrompt) -> PromptResponse {
        PromptResponse::Cancel
    }
}
