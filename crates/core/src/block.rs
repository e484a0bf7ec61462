use serde::{Deserialize, Serialize};

/// Clipboard contents split into rows of raw text tokens.
///
/// Rows keep whatever length the source text had; nothing pads them to a
/// rectangle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasteBlock {
    rows: Vec<Vec<String>>,
}

impl PasteBlock {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Token count of the widest row.
    pub fn max_row_width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// True when there are no tokens at all.
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

impl<S: Into<String>> FromIterator<Vec<S>> for PasteBlock {
    fn from_iter<I: IntoIterator<Item = Vec<S>>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }
}
