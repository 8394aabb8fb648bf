//! glyphgrid: rebuild tables from the text layer of PDF pages.
//!
//! This is the public API facade. It re-exports the pipeline types from
//! glyphgrid-core and adds document-level extraction over a [`PageSource`].
//!
//! # Architecture
//!
//! - **glyphgrid-core**: data types and the per-page pipeline stages
//! - **glyphgrid** (this crate): page sources, JSON dumps, and the
//!   document driver with cross-page header/footer detection
//!
//! # Example
//!
//! ```
//! use glyphgrid::{DocumentExtractor, JsonDocument};
//!
//! let dump = br#"{"pages": [{"width": 612, "height": 792, "items": [
//!     {"str": "Name", "transform": [10, 0, 0, 10, 100, 592]},
//!     {"str": "Age", "transform": [10, 0, 0, 10, 250, 592]},
//!     {"str": "Alice", "transform": [10, 0, 0, 10, 100, 572]},
//!     {"str": "30", "transform": [10, 0, 0, 10, 250, 572]}
//! ]}]}"#;
//! let doc = JsonDocument::from_slice(dump).unwrap();
//! let result = DocumentExtractor::default().extract(&doc);
//! let (_, table) = result.tables().next().unwrap();
//! assert_eq!(table.text_grid(), vec![vec!["Name", "Age"], vec!["Alice", "30"]]);
//! ```

mod document;
mod error;
mod json;
mod source;

pub use document::{DocumentExtractor, DocumentTables, PageOutcome, PageResult};
pub use error::SourceError;
pub use json::JsonDocument;
pub use source::PageSource;

pub use glyphgrid_core;
pub use glyphgrid_core::{
    BuildOptions, Cell, ColumnBoundaries, ColumnOptions, CrossPageOptions, ExtractResult,
    ExtractWarning, ExtractWarningCode, FurnitureOptions, GlyphRecord, PageAnalysis,
    PipelineSettings, PlacementStats, ResolveOptions, RowCluster, RowOptions, RulingHints, Script,
    Table, TablePipeline, TextDirection, TextItem, TextLayer, VerticalRuling,
};
