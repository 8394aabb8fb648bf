//! Shared helpers for integration tests.
//!
//! Pages are described in top-left coordinates (as they appear on screen)
//! and converted into PDF.js-style text items.

#![allow(dead_code)]

use glyphgrid::{TextItem, TextLayer};
use proptest::prelude::*;

pub const PAGE_WIDTH: f64 = 612.0;
pub const PAGE_HEIGHT: f64 = 792.0;

/// A text item whose baseline sits `y` pixels below the top of the page.
pub fn item(text: &str, x: f64, y: f64, font_size: f64) -> TextItem {
    TextItem::new(text, x, PAGE_HEIGHT - y, font_size)
}

/// A letter-sized page holding 10pt items at top-left `(text, x, y)`.
pub fn page(items: &[(&str, f64, f64)]) -> TextLayer {
    TextLayer::new(
        PAGE_WIDTH,
        PAGE_HEIGHT,
        items.iter().map(|&(t, x, y)| item(t, x, y, 10.0)).collect(),
    )
}

/// A page with a table laid out on a regular grid.
pub fn grid_page(cells: &[&[&str]], xs: &[f64], top: f64, row_gap: f64) -> TextLayer {
    let mut items = Vec::new();
    for (r, row) in cells.iter().enumerate() {
        for (c, text) in row.iter().enumerate() {
            if !text.is_empty() {
                items.push(item(text, xs[c], top + r as f64 * row_gap, 10.0));
            }
        }
    }
    TextLayer::new(PAGE_WIDTH, PAGE_HEIGHT, items)
}

const WORDS: &[&str] = &[
    "Total", "42", "Widget", "नमस्ते", "東京", "สวัสดี", "مرحبا", "3.5%", "end.", "Café",
];
const COLUMNS: [f64; 4] = [60.0, 180.0, 300.0, 420.0];

/// Pages of scattered words, mostly aligned to four columns with some
/// strays, the odd larger font and gaps.
pub fn noisy_page() -> impl Strategy<Value = TextLayer> {
    let cell = (
        prop_oneof![4 => -3.0f64..3.0, 1 => -60.0f64..60.0],
        0..WORDS.len(),
        prop::bool::weighted(0.1),
    );
    let row = (
        -1.0f64..1.0,
        prop::collection::vec(prop::option::weighted(0.8, cell), COLUMNS.len()),
    );
    prop::collection::vec(row, 3..15).prop_map(|rows| {
        let mut items = Vec::new();
        for (r, (dy, cells)) in rows.into_iter().enumerate() {
            let y = 80.0 + r as f64 * 18.0 + dy;
            for (x, cell) in COLUMNS.iter().zip(cells) {
                if let Some((jitter, word, large)) = cell {
                    let size = if large { 14.0 } else { 10.0 };
                    items.push(item(WORDS[word], x + jitter, y, size));
                }
            }
        }
        TextLayer::new(PAGE_WIDTH, PAGE_HEIGHT, items)
    })
}
