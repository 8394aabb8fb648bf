//! Glyph collection from a page's text layer.
//!
//! Converts raw positioned text runs, as produced by a PDF.js-style
//! `getTextContent()` call, into [`GlyphRecord`]s in top-left page
//! coordinates.

use crate::error::{ExtractResult, ExtractWarning, ExtractWarningCode};

/// Average glyph advance as a fraction of the font size, used when a text
/// item carries no explicit width.
pub const FALLBACK_CHAR_WIDTH: f64 = 0.6;

/// A raw text run from a page's text layer.
///
/// Field names accept the PDF.js spelling (`str`, `fontName`) when
/// deserialized.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TextItem {
    /// Text content of the run.
    #[cfg_attr(feature = "serde", serde(alias = "str"))]
    pub text: String,
    /// Affine transform `[a, b, c, d, e, f]` in PDF user space (bottom-left origin).
    pub transform: Vec<f64>,
    /// Advance width of the run, when the text layer reports one.
    pub width: Option<f64>,
    /// Font face name.
    #[cfg_attr(feature = "serde", serde(alias = "fontName"))]
    pub font_name: String,
}

impl TextItem {
    /// Create an unrotated text item with its baseline origin at `(x, y)`
    /// in bottom-left coordinates.
    pub fn new(text: impl Into<String>, x: f64, y: f64, font_size: f64) -> Self {
        Self {
            text: text.into(),
            transform: vec![font_size, 0.0, 0.0, font_size, x, y],
            width: None,
            font_name: String::new(),
        }
    }

    /// Set the explicit advance width (builder pattern).
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the font face name (builder pattern).
    pub fn with_font(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = font_name.into();
        self
    }

    fn has_valid_transform(&self) -> bool {
        self.transform.len() >= 6 && self.transform[..6].iter().all(|v| v.is_finite())
    }
}

/// The text layer of one page: its viewport size and raw text items.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextLayer {
    /// Viewport width in pixels.
    #[cfg_attr(feature = "serde", serde(default))]
    pub width: f64,
    /// Viewport height in pixels.
    pub height: f64,
    /// Text items in content-stream order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<TextItem>,
}

impl TextLayer {
    /// Create a text layer for a viewport of the given size.
    pub fn new(width: f64, height: f64, items: Vec<TextItem>) -> Self {
        Self {
            width,
            height,
            items,
        }
    }
}

/// One positioned run of text in top-left page coordinates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphRecord {
    /// Trimmed, non-empty text content.
    pub text: String,
    /// Left edge.
    pub x: f64,
    /// Baseline distance from the top of the page.
    pub y: f64,
    /// Advance width.
    pub width: f64,
    /// Line height (equal to the font size).
    pub height: f64,
    /// Font size, rounded to one decimal.
    pub font_size: f64,
    /// Font face name.
    pub font_name: String,
    /// Whether the face name marks a bold weight.
    pub is_bold: bool,
}

impl GlyphRecord {
    /// Right edge (`x + width`).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Returns `true` if a font face name denotes a bold (or heavier) weight.
pub fn is_bold_font(font_name: &str) -> bool {
    let lower = font_name.to_ascii_lowercase();
    ["bold", "black", "heavy"]
        .iter()
        .any(|weight| lower.contains(weight))
}

fn round_one_decimal(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Collect glyph records from a page's text layer.
///
/// Items with blank text are skipped. Items whose transform has fewer than
/// six entries or non-finite components are skipped too, and counted in a
/// single [`ExtractWarningCode::MalformedItem`] warning.
pub fn collect_glyphs(layer: &TextLayer) -> ExtractResult<Vec<GlyphRecord>> {
    let mut glyphs = Vec::with_capacity(layer.items.len());
    let mut malformed = 0usize;

    for item in &layer.items {
        let text = item.text.trim();
        if text.is_empty() {
            continue;
        }
        if !item.has_valid_transform() {
            malformed += 1;
            continue;
        }

        let t = &item.transform;
        let font_size = round_one_decimal(t[0].hypot(t[1]));
        let width = match item.width {
            Some(w) if w.is_finite() && w > 0.0 => w,
            _ => text.chars().count() as f64 * font_size * FALLBACK_CHAR_WIDTH,
        };

        glyphs.push(GlyphRecord {
            text: text.to_string(),
            x: t[4],
            y: layer.height - t[5],
            width,
            height: font_size,
            font_size,
            font_name: item.font_name.clone(),
            is_bold: is_bold_font(&item.font_name),
        });
    }

    let mut warnings = Vec::new();
    if malformed > 0 {
        warnings.push(ExtractWarning::with_code(
            ExtractWarningCode::MalformedItem,
            format!("{malformed} text item(s) with malformed transforms skipped"),
        ));
    }
    ExtractResult::with_warnings(glyphs, warnings)
}
