//! Header/footer suppression.
//!
//! Running headers, footers and page numbers sit in the page margins and
//! would otherwise distort row and column geometry. Two passes are
//! provided: a per-page pass that removes text repeated within one
//! margin of one page, and an opt-in cross-page pass that removes margin
//! text repeated across many pages of a document.

use std::collections::{HashMap, HashSet};

use crate::glyph::GlyphRecord;

/// Configuration for per-page furniture suppression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FurnitureOptions {
    /// Whether suppression runs at all. Default: true.
    pub enabled: bool,
    /// Glyphs with `y` below this fraction of the page height are in the header. Default: 0.1.
    pub header_fraction: f64,
    /// Glyphs with `y` above this fraction of the page height are in the footer. Default: 0.9.
    pub footer_fraction: f64,
    /// Text seen more than this many times in one region is furniture. Default: 2.
    pub max_repeats: usize,
}

impl Default for FurnitureOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            header_fraction: 0.1,
            footer_fraction: 0.9,
            max_repeats: 2,
        }
    }
}

/// Configuration for cross-page furniture detection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CrossPageOptions {
    /// Minimum number of pages a margin text must appear on. Default: 3.
    pub min_pages: usize,
}

impl Default for CrossPageOptions {
    fn default() -> Self {
        Self { min_pages: 3 }
    }
}

/// Vertical page region a glyph falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarginRegion {
    Header,
    Body,
    Footer,
}

impl MarginRegion {
    /// Classify a top-left `y` coordinate on a page of the given height.
    pub fn classify(y: f64, page_height: f64, options: &FurnitureOptions) -> Self {
        if y < page_height * options.header_fraction {
            MarginRegion::Header
        } else if y > page_height * options.footer_fraction {
            MarginRegion::Footer
        } else {
            MarginRegion::Body
        }
    }
}

fn furniture_key(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Remove text that repeats more than `max_repeats` times within the
/// header or footer region of a single page.
///
/// Non-repeating margin text is kept. A non-positive or non-finite page
/// height disables the pass.
pub fn suppress_page_furniture(
    glyphs: Vec<GlyphRecord>,
    page_height: f64,
    options: &FurnitureOptions,
) -> Vec<GlyphRecord> {
    if !options.enabled || !page_height.is_finite() || page_height <= 0.0 {
        return glyphs;
    }

    let regions: Vec<MarginRegion> = glyphs
        .iter()
        .map(|g| MarginRegion::classify(g.y, page_height, options))
        .collect();

    let mut counts: HashMap<(MarginRegion, String), usize> = HashMap::new();
    for (glyph, &region) in glyphs.iter().zip(&regions) {
        if region != MarginRegion::Body {
            *counts.entry((region, furniture_key(&glyph.text))).or_insert(0) += 1;
        }
    }

    glyphs
        .into_iter()
        .zip(regions)
        .filter(|(glyph, region)| {
            *region == MarginRegion::Body
                || counts
                    .get(&(*region, furniture_key(&glyph.text)))
                    .is_none_or(|&count| count <= options.max_repeats)
        })
        .map(|(glyph, _)| glyph)
        .collect()
}

/// Mask variable elements in text for fuzzy comparison.
///
/// Lowercases, collapses each run of digits to `#` and each run of
/// whitespace to one space, so `"Page 12 of 40"` and `"page 3 of 40"`
/// compare equal.
pub fn mask_variable_elements(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_digit_run = false;
    let mut in_space_run = false;

    for ch in text.trim().chars() {
        if ch.is_ascii_digit() {
            if !in_digit_run {
                result.push('#');
            }
            in_digit_run = true;
            in_space_run = false;
        } else if ch.is_whitespace() {
            if !in_space_run {
                result.push(' ');
            }
            in_space_run = true;
            in_digit_run = false;
        } else {
            result.extend(ch.to_lowercase());
            in_digit_run = false;
            in_space_run = false;
        }
    }

    result
}

/// Margin texts that repeat across enough pages of a document to be
/// treated as running headers or footers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepeatedMarginText {
    keys: HashSet<(MarginRegion, String)>,
}

impl RepeatedMarginText {
    /// Detect repeated margin text from `(glyphs, page_height)` per page.
    ///
    /// A masked text counts once per page it appears on (in the same
    /// region); it is furniture when that count reaches `min_pages`.
    pub fn detect(
        pages: &[(&[GlyphRecord], f64)],
        furniture: &FurnitureOptions,
        options: &CrossPageOptions,
    ) -> Self {
        if pages.len() < options.min_pages {
            return Self::default();
        }

        let mut page_counts: HashMap<(MarginRegion, String), usize> = HashMap::new();
        for (glyphs, height) in pages {
            if !height.is_finite() || *height <= 0.0 {
                continue;
            }
            let on_page: HashSet<(MarginRegion, String)> = glyphs
                .iter()
                .filter_map(|g| {
                    let region = MarginRegion::classify(g.y, *height, furniture);
                    (region != MarginRegion::Body)
                        .then(|| (region, mask_variable_elements(&g.text)))
                })
                .filter(|(_, key)| !key.is_empty())
                .collect();
            for key in on_page {
                *page_counts.entry(key).or_insert(0) += 1;
            }
        }

        let keys = page_counts
            .into_iter()
            .filter(|(_, count)| *count >= options.min_pages)
            .map(|(key, _)| key)
            .collect();
        Self { keys }
    }

    /// Returns true if nothing repeats.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of distinct repeated texts.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Remove repeated margin text from one page's glyphs.
    pub fn strip(
        &self,
        glyphs: Vec<GlyphRecord>,
        page_height: f64,
        furniture: &FurnitureOptions,
    ) -> Vec<GlyphRecord> {
        if self.keys.is_empty() || !page_height.is_finite() || page_height <= 0.0 {
            return glyphs;
        }
        glyphs
            .into_iter()
            .filter(|g| {
                let region = MarginRegion::classify(g.y, page_height, furniture);
                region == MarginRegion::Body
                    || !self
                        .keys
                        .contains(&(region, mask_variable_elements(&g.text)))
            })
            .collect()
    }
}
