//! The per-page table reconstruction pipeline.
//!
//! Collector, suppressor, clusterer, detector, builder and resolver run in
//! sequence, each a pure function of the previous stage's output.

use crate::builder::{BuildOptions, PlacementStats, build_table};
use crate::columns::{ColumnBoundaries, ColumnOptions, RulingHints, detect_columns};
use crate::error::ExtractResult;
use crate::furniture::{FurnitureOptions, suppress_page_furniture};
use crate::glyph::{GlyphRecord, TextLayer, collect_glyphs};
use crate::resolver::{ResolveOptions, resolve_table};
use crate::rows::{RowCluster, RowOptions, cluster_rows};
use crate::table::Table;

/// Settings for every pipeline stage.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PipelineSettings {
    /// Header/footer suppression.
    pub furniture: FurnitureOptions,
    /// Row clustering.
    pub rows: RowOptions,
    /// Column detection.
    pub columns: ColumnOptions,
    /// Table building.
    pub build: BuildOptions,
    /// Script and font resolution.
    pub resolve: ResolveOptions,
    /// Pages with fewer rows than this hold no table. Default: 2.
    pub min_rows: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            furniture: FurnitureOptions::default(),
            rows: RowOptions::default(),
            columns: ColumnOptions::default(),
            build: BuildOptions::default(),
            resolve: ResolveOptions::default(),
            min_rows: 2,
        }
    }
}

/// Every intermediate result of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageAnalysis {
    /// Glyphs left after furniture suppression.
    pub glyphs: Vec<GlyphRecord>,
    /// Row clusters, top to bottom.
    pub rows: Vec<RowCluster>,
    /// Detected column boundaries.
    pub columns: ColumnBoundaries,
    /// Glyph placement counts. Zero when no table was built.
    pub placement: PlacementStats,
    /// The resolved table, if the page holds one.
    pub table: Option<Table>,
}

/// Table reconstruction pipeline for single pages.
///
/// ```
/// use glyphgrid_core::{TablePipeline, TextItem, TextLayer};
///
/// let layer = TextLayer::new(612.0, 792.0, vec![
///     TextItem::new("Name", 100.0, 692.0, 10.0),
///     TextItem::new("Age", 250.0, 692.0, 10.0),
///     TextItem::new("Alice", 100.0, 672.0, 10.0),
///     TextItem::new("30", 250.0, 672.0, 10.0),
/// ]);
/// let table = TablePipeline::default().extract(&layer, None).value.unwrap();
/// assert_eq!(table.text_grid(), vec![vec!["Name", "Age"], vec!["Alice", "30"]]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TablePipeline {
    settings: PipelineSettings,
}

impl TablePipeline {
    /// Create a pipeline with the given settings.
    pub fn new(settings: PipelineSettings) -> Self {
        Self { settings }
    }

    /// The pipeline's settings.
    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Collect glyphs from a text layer and drop same-page furniture.
    pub fn collect(&self, layer: &TextLayer) -> ExtractResult<Vec<GlyphRecord>> {
        collect_glyphs(layer)
            .map(|glyphs| suppress_page_furniture(glyphs, layer.height, &self.settings.furniture))
    }

    /// Run every stage on a text layer, keeping intermediate results.
    pub fn analyze(
        &self,
        layer: &TextLayer,
        hints: Option<&RulingHints>,
    ) -> ExtractResult<PageAnalysis> {
        let mut warnings = Vec::new();
        let glyphs = self.collect(layer).drain_into(&mut warnings);
        let mut analysis = self.analyze_glyphs(glyphs, hints);
        warnings.append(&mut analysis.warnings);
        ExtractResult::with_warnings(analysis.value, warnings)
    }

    /// Run the stages after collection on already suppressed glyphs.
    pub fn analyze_glyphs(
        &self,
        glyphs: Vec<GlyphRecord>,
        hints: Option<&RulingHints>,
    ) -> ExtractResult<PageAnalysis> {
        let settings = &self.settings;
        let mut warnings = Vec::new();

        let rows = cluster_rows(&glyphs, &settings.rows);
        let columns = detect_columns(&rows, hints, &settings.columns);
        let mut analysis = PageAnalysis {
            glyphs,
            rows,
            columns,
            placement: PlacementStats::default(),
            table: None,
        };

        if analysis.rows.len() < settings.min_rows.max(1) || analysis.columns.is_empty() {
            return ExtractResult::ok(analysis);
        }

        let built = build_table(&analysis.rows, &analysis.columns, &settings.build)
            .drain_into(&mut warnings);
        analysis.placement = built.stats;
        if built.table.is_empty() {
            return ExtractResult::with_warnings(analysis, warnings);
        }

        let mut table = resolve_table(built.table, &settings.resolve).drain_into(&mut warnings);
        // Normalization can empty a cell that only held zero-width joiners.
        table.retain_filled_rows();
        analysis.table = (!table.is_empty()).then_some(table);
        ExtractResult::with_warnings(analysis, warnings)
    }

    /// Extract the table on a page, or `None` if it holds no table.
    pub fn extract(
        &self,
        layer: &TextLayer,
        hints: Option<&RulingHints>,
    ) -> ExtractResult<Option<Table>> {
        self.analyze(layer, hints).map(|analysis| analysis.table)
    }

    /// Extract a table from already collected and suppressed glyphs.
    pub fn extract_from_glyphs(
        &self,
        glyphs: Vec<GlyphRecord>,
        hints: Option<&RulingHints>,
    ) -> ExtractResult<Option<Table>> {
        self.analyze_glyphs(glyphs, hints)
            .map(|analysis| analysis.table)
    }
}
