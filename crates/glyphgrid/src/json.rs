//! Text-layer dumps in PDF.js JSON shape.
//!
//! A dump is either `{"pages": [...]}` or a bare array of pages. Each page
//! is `{"width", "height", "items", "rulings"}`, where `items` holds
//! `getTextContent()` items (`str`, `transform`, `width`, `fontName`) and
//! the optional `rulings` holds `{"vertical": [{"x": ..}]}`.
//!
//! Items are read one at a time. An item whose fields have the wrong type
//! keeps whatever text it carries with an empty transform, so the glyph
//! collector drops it with a `MalformedItem` warning instead of the whole
//! page failing.

use std::io::Read;

use glyphgrid_core::{RulingHints, TextItem, TextLayer};
use serde::Deserialize;
use serde_json::Value;

use crate::error::SourceError;
use crate::source::PageSource;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDocument {
    Wrapped { pages: Vec<Value> },
    Bare(Vec<Value>),
}

#[derive(Debug, Clone, Deserialize)]
struct JsonPage {
    #[serde(default)]
    width: f64,
    height: f64,
    #[serde(deserialize_with = "deserialize_items")]
    items: Vec<TextItem>,
    #[serde(default)]
    rulings: Option<RulingHints>,
}

fn deserialize_items<'de, D>(deserializer: D) -> Result<Vec<TextItem>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values = Vec::<Value>::deserialize(deserializer)?;
    Ok(values.into_iter().filter_map(parse_item).collect())
}

fn parse_item(value: Value) -> Option<TextItem> {
    let Value::Object(fields) = &value else {
        return None;
    };
    if let Ok(item) = serde_json::from_value::<TextItem>(value.clone()) {
        return Some(item);
    }

    let string_field = |names: &[&str]| {
        names
            .iter()
            .find_map(|name| fields.get(*name).and_then(Value::as_str))
            .unwrap_or_default()
            .to_string()
    };
    // An empty transform is what the collector reports as malformed.
    let transform = fields
        .get("transform")
        .and_then(Value::as_array)
        .and_then(|entries| entries.iter().map(Value::as_f64).collect::<Option<Vec<_>>>())
        .unwrap_or_default();

    Some(TextItem {
        text: string_field(&["str", "text"]),
        transform,
        width: fields.get("width").and_then(Value::as_f64),
        font_name: string_field(&["fontName", "font_name"]),
    })
}

/// A [`PageSource`] backed by a JSON text-layer dump.
///
/// Pages are validated individually: a malformed page entry fails only
/// that page.
#[derive(Debug, Clone)]
pub struct JsonDocument {
    pages: Vec<Result<JsonPage, String>>,
}

impl JsonDocument {
    /// Parse a dump from bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Json`] if the bytes are not JSON or the top
    /// level is neither a page array nor an object with a `pages` array.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SourceError> {
        let raw: RawDocument = serde_json::from_slice(bytes)?;
        Ok(Self::from_raw(raw))
    }

    /// Parse a dump from a reader.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if reading fails or the data is not a dump.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SourceError> {
        let raw: RawDocument = serde_json::from_reader(reader)?;
        Ok(Self::from_raw(raw))
    }

    /// Read and parse a dump file.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Io`] if the file cannot be read, or
    /// [`SourceError::Json`] if it is not a dump.
    #[cfg(feature = "std")]
    pub fn open_file(path: impl AsRef<std::path::Path>) -> Result<Self, SourceError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_slice(&bytes)
    }

    fn from_raw(raw: RawDocument) -> Self {
        let values = match raw {
            RawDocument::Wrapped { pages } | RawDocument::Bare(pages) => pages,
        };
        let pages = values
            .into_iter()
            .map(|value| serde_json::from_value::<JsonPage>(value).map_err(|e| e.to_string()))
            .collect();
        Self { pages }
    }

    fn page(&self, index: usize) -> Result<&JsonPage, SourceError> {
        match self.pages.get(index) {
            Some(Ok(page)) => Ok(page),
            Some(Err(reason)) => Err(SourceError::MalformedPage {
                index,
                reason: reason.clone(),
            }),
            None => Err(SourceError::PageOutOfRange {
                index,
                count: self.pages.len(),
            }),
        }
    }
}

impl PageSource for JsonDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn text_layer(&self, index: usize) -> Result<TextLayer, SourceError> {
        let page = self.page(index)?;
        Ok(TextLayer::new(page.width, page.height, page.items.clone()))
    }

    fn ruling_hints(&self, index: usize) -> Option<RulingHints> {
        self.page(index)
            .ok()
            .and_then(|page| page.rulings.clone())
            .filter(|hints| !hints.is_empty())
    }
}
