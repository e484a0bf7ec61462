// Clipboard text and grid export

pub mod clipboard;
pub mod json;
