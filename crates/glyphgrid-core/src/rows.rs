//! Row clustering: grouping glyphs that share a visual text line.

use std::cmp::Ordering;

use crate::glyph::GlyphRecord;

/// Options for row clustering.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RowOptions {
    /// Fraction of the average line height allowed as vertical drift. Default: 0.25.
    pub tolerance_factor: f64,
    /// Lower clamp for the vertical tolerance, in pixels. Default: 2.0.
    pub min_tolerance: f64,
    /// Upper clamp for the vertical tolerance, in pixels. Default: 10.0.
    pub max_tolerance: f64,
    /// Line height as a multiple of font size. Default: 1.2.
    pub line_height_factor: f64,
    /// Maximum relative font-size difference within a row (exclusive). Default: 0.25.
    pub max_font_size_ratio: f64,
    /// Horizontal slack around a row's span, in pixels. Default: 50.0.
    pub x_margin: f64,
}

impl Default for RowOptions {
    fn default() -> Self {
        Self {
            tolerance_factor: 0.25,
            min_tolerance: 2.0,
            max_tolerance: 10.0,
            line_height_factor: 1.2,
            max_font_size_ratio: 0.25,
            x_margin: 50.0,
        }
    }
}

/// A visual row of glyphs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowCluster {
    /// Font-size-weighted centroid of member `y` values.
    pub y: f64,
    /// Representative (mean) font size of the members.
    pub font_size: f64,
    /// Members, sorted by ascending `x`.
    pub items: Vec<GlyphRecord>,
    /// Leftmost member `x`.
    pub min_x: f64,
    /// Rightmost member right edge.
    pub max_x: f64,
}

impl RowCluster {
    /// Number of glyphs in the row.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the row has no glyphs.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Member texts joined by single spaces, left to right.
    pub fn text(&self) -> String {
        self.items
            .iter()
            .map(|g| g.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Accumulates a row while clustering is in progress.
struct RowBuilder {
    weighted_y: f64,
    weight: f64,
    font_size_sum: f64,
    items: Vec<GlyphRecord>,
    min_x: f64,
    max_x: f64,
}

impl RowBuilder {
    fn start(glyph: GlyphRecord) -> Self {
        let mut row = Self {
            weighted_y: 0.0,
            weight: 0.0,
            font_size_sum: 0.0,
            items: Vec::new(),
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
        };
        row.push(glyph);
        row
    }

    fn centroid(&self) -> f64 {
        self.weighted_y / self.weight
    }

    fn font_size(&self) -> f64 {
        self.font_size_sum / self.items.len() as f64
    }

    fn accepts(&self, glyph: &GlyphRecord, options: &RowOptions) -> bool {
        let row_size = self.font_size();
        let line_height = options.line_height_factor * (glyph.font_size + row_size) / 2.0;
        let tolerance = (options.tolerance_factor * line_height)
            .clamp(options.min_tolerance, options.max_tolerance);

        let dy = (glyph.y - self.centroid()).abs();
        if dy > tolerance {
            return false;
        }

        let larger = glyph.font_size.max(row_size);
        if larger > 0.0
            && (glyph.font_size - row_size).abs() / larger >= options.max_font_size_ratio
        {
            return false;
        }

        // Baseline-aligned glyphs share the line wherever they sit horizontally.
        if dy <= tolerance / 2.0 {
            return true;
        }
        glyph.x >= self.min_x - options.x_margin && glyph.x <= self.max_x + options.x_margin
    }

    fn push(&mut self, glyph: GlyphRecord) {
        let weight = if glyph.font_size > 0.0 {
            glyph.font_size
        } else {
            1.0
        };
        self.weighted_y += glyph.y * weight;
        self.weight += weight;
        self.font_size_sum += glyph.font_size;
        self.min_x = self.min_x.min(glyph.x);
        self.max_x = self.max_x.max(glyph.right());
        self.items.push(glyph);
    }

    fn finish(mut self) -> RowCluster {
        self.items.sort_by(|a, b| a.x.total_cmp(&b.x));
        RowCluster {
            y: self.centroid(),
            font_size: self.font_size(),
            items: self.items,
            min_x: self.min_x,
            max_x: self.max_x,
        }
    }
}

fn reading_order(a: &GlyphRecord, b: &GlyphRecord) -> Ordering {
    a.y.total_cmp(&b.y)
        .then(a.x.total_cmp(&b.x))
        .then_with(|| a.text.cmp(&b.text))
        .then(a.font_size.total_cmp(&b.font_size))
        .then(a.width.total_cmp(&b.width))
        .then_with(|| a.font_name.cmp(&b.font_name))
}

/// Cluster glyphs into visual rows, ordered top to bottom.
///
/// Glyphs are visited top of page first and compared with the row being
/// built. A glyph joins that row when it is within an adaptive vertical
/// tolerance of the row centroid, has a similar font size, and either
/// sits on the row's baseline or lies within `x_margin` of the row's
/// horizontal span. Otherwise it starts a new row.
///
/// Because glyphs are sorted by `(y, x, text)` first, the result does
/// not depend on input order.
pub fn cluster_rows(glyphs: &[GlyphRecord], options: &RowOptions) -> Vec<RowCluster> {
    let mut sorted: Vec<GlyphRecord> = glyphs
        .iter()
        .filter(|g| g.x.is_finite() && g.y.is_finite())
        .cloned()
        .collect();
    sorted.sort_by(reading_order);

    let mut rows = Vec::new();
    let mut current: Option<RowBuilder> = None;

    for glyph in sorted {
        match current.as_mut() {
            Some(row) if row.accepts(&glyph, options) => row.push(glyph),
            _ => {
                if let Some(done) = current.replace(RowBuilder::start(glyph)) {
                    rows.push(done.finish());
                }
            }
        }
    }
    if let Some(done) = current {
        rows.push(done.finish());
    }

    rows
}
