//! The [`PageSource`] abstraction over documents whose pages expose a
//! text layer.

use glyphgrid_core::{RulingHints, TextLayer};

use crate::error::SourceError;

/// A document whose pages can be read as text layers.
///
/// Implementations may fail per page; a failure on one page does not
/// affect the others.
pub trait PageSource {
    /// Number of pages.
    fn page_count(&self) -> usize;

    /// The text layer of the page at a 0-based index.
    fn text_layer(&self, index: usize) -> Result<TextLayer, SourceError>;

    /// Ruling lines detected on the page, if the source has any.
    fn ruling_hints(&self, _index: usize) -> Option<RulingHints> {
        None
    }
}

impl PageSource for [TextLayer] {
    fn page_count(&self) -> usize {
        self.len()
    }

    fn text_layer(&self, index: usize) -> Result<TextLayer, SourceError> {
        self.get(index)
            .cloned()
            .ok_or(SourceError::PageOutOfRange {
                index,
                count: self.len(),
            })
    }
}

impl PageSource for Vec<TextLayer> {
    fn page_count(&self) -> usize {
        self.as_slice().page_count()
    }

    fn text_layer(&self, index: usize) -> Result<TextLayer, SourceError> {
        self.as_slice().text_layer(index)
    }
}
