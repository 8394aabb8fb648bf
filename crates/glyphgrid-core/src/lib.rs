//! glyphgrid-core: data types and algorithms for rebuilding tables from a
//! PDF page's text layer.
//!
//! The pipeline runs per page, each stage a pure function:
//!
//! 1. [`collect_glyphs`] turns raw [`TextItem`]s into [`GlyphRecord`]s.
//! 2. [`suppress_page_furniture`] drops repeated header and footer text.
//! 3. [`cluster_rows`] groups glyphs into visual rows.
//! 4. [`detect_columns`] infers column boundaries, optionally from rulings.
//! 5. [`build_table`] places glyphs into a rectangular grid.
//! 6. [`resolve_table`] normalizes text and assigns scripts and fonts.
//!
//! [`TablePipeline`] runs all six with one set of [`PipelineSettings`].

pub mod builder;
pub mod columns;
pub mod error;
pub mod furniture;
pub mod glyph;
pub mod pipeline;
pub mod resolver;
pub mod rows;
pub mod script;
pub mod table;

pub use builder::{BuildOptions, BuildOutcome, PlacementStats, build_table, is_numeric_text};
pub use columns::{ColumnBoundaries, ColumnOptions, RulingHints, VerticalRuling, detect_columns};
pub use error::{ExtractResult, ExtractWarning, ExtractWarningCode};
pub use furniture::{
    CrossPageOptions, FurnitureOptions, MarginRegion, RepeatedMarginText, mask_variable_elements,
    suppress_page_furniture,
};
pub use glyph::{
    FALLBACK_CHAR_WIDTH, GlyphRecord, TextItem, TextLayer, collect_glyphs, is_bold_font,
};
pub use pipeline::{PageAnalysis, PipelineSettings, TablePipeline};
pub use resolver::{
    ResolveOptions, SAFE_FONTS, fallback_font, normalize_cell_text, resolve_cell, resolve_table,
    safe_font_family,
};
pub use rows::{RowCluster, RowOptions, cluster_rows};
pub use script::{Script, TextDirection, detect_direction, detect_script};
pub use table::{Cell, Table};
