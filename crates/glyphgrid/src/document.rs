//! Document-level extraction: running the pipeline over every page of a
//! [`PageSource`].

use glyphgrid_core::{
    CrossPageOptions, ExtractWarning, ExtractWarningCode, GlyphRecord, PipelineSettings,
    RepeatedMarginText, RulingHints, Table, TablePipeline,
};
use serde::{Deserialize, Serialize};

use crate::source::PageSource;

/// What a page yielded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageOutcome {
    /// The page holds a table.
    Table(Table),
    /// The page was read but holds no table.
    NoTable,
    /// The page could not be read; the rest of the document is unaffected.
    Failed {
        /// Why the page could not be read.
        error: String,
    },
}

/// Extraction result for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    /// 0-based page index.
    pub page: usize,
    /// What the page yielded.
    pub outcome: PageOutcome,
    /// Warnings raised while processing the page.
    pub warnings: Vec<ExtractWarning>,
}

impl PageResult {
    /// The page's table, if it has one.
    pub fn table(&self) -> Option<&Table> {
        match &self.outcome {
            PageOutcome::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Returns true if the page could not be read.
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, PageOutcome::Failed { .. })
    }
}

/// Extraction results for a document, ordered by page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentTables {
    /// One entry per requested page.
    pub pages: Vec<PageResult>,
}

impl DocumentTables {
    /// Pages with a table, as `(page index, table)`.
    pub fn tables(&self) -> impl Iterator<Item = (usize, &Table)> {
        self.pages
            .iter()
            .filter_map(|result| result.table().map(|table| (result.page, table)))
    }

    /// Number of pages that could not be read.
    pub fn failed_count(&self) -> usize {
        self.pages.iter().filter(|result| result.is_failed()).count()
    }

    /// All warnings, in page order.
    pub fn warnings(&self) -> impl Iterator<Item = &ExtractWarning> {
        self.pages.iter().flat_map(|result| result.warnings.iter())
    }
}

/// A page after collection and same-page furniture suppression.
struct CollectedPage {
    page: usize,
    height: f64,
    glyphs: Result<Vec<GlyphRecord>, String>,
    hints: Option<RulingHints>,
    warnings: Vec<ExtractWarning>,
}

/// Runs a [`TablePipeline`] over the pages of a [`PageSource`].
///
/// With cross-page detection enabled, margin text repeated on enough
/// pages is removed from every page before row clustering.
#[derive(Debug, Clone, Default)]
pub struct DocumentExtractor {
    pipeline: TablePipeline,
    cross_page: Option<CrossPageOptions>,
}

impl DocumentExtractor {
    /// Create an extractor with the given pipeline settings.
    pub fn new(settings: PipelineSettings) -> Self {
        Self {
            pipeline: TablePipeline::new(settings),
            cross_page: None,
        }
    }

    /// Enable cross-page header/footer detection (builder pattern).
    pub fn with_cross_page(mut self, options: CrossPageOptions) -> Self {
        self.cross_page = Some(options);
        self
    }

    /// The underlying single-page pipeline.
    pub fn pipeline(&self) -> &TablePipeline {
        &self.pipeline
    }

    /// Extract tables from every page.
    pub fn extract<S: PageSource + ?Sized>(&self, source: &S) -> DocumentTables {
        let indices: Vec<usize> = (0..source.page_count()).collect();
        self.extract_pages(source, &indices)
    }

    /// Extract tables from the given 0-based pages, in the order given.
    ///
    /// Indices past the end of the source produce failed pages.
    pub fn extract_pages<S: PageSource + ?Sized>(
        &self,
        source: &S,
        indices: &[usize],
    ) -> DocumentTables {
        let collected: Vec<CollectedPage> = indices
            .iter()
            .map(|&index| self.collect_page(source, index))
            .collect();
        let repeated = self.repeated_margin_text(&collected);
        let pages = collected
            .into_iter()
            .map(|page| self.finish_page(page, &repeated))
            .collect();
        DocumentTables { pages }
    }

    /// Extract tables from every page, processing pages concurrently.
    ///
    /// Results are ordered by page index, identical to [`extract`](Self::extract).
    #[cfg(feature = "parallel")]
    pub fn extract_parallel<S: PageSource + Sync + ?Sized>(&self, source: &S) -> DocumentTables {
        use rayon::prelude::*;

        let collected: Vec<CollectedPage> = (0..source.page_count())
            .into_par_iter()
            .map(|index| self.collect_page(source, index))
            .collect();
        let repeated = self.repeated_margin_text(&collected);
        let pages = collected
            .into_par_iter()
            .map(|page| self.finish_page(page, &repeated))
            .collect();
        DocumentTables { pages }
    }

    fn collect_page<S: PageSource + ?Sized>(&self, source: &S, index: usize) -> CollectedPage {
        let mut warnings = Vec::new();
        let (height, glyphs) = match source.text_layer(index) {
            Ok(layer) => {
                let glyphs = self.pipeline.collect(&layer).drain_into(&mut warnings);
                (layer.height, Ok(glyphs))
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(page = index, error = %err, "text layer unavailable");
                warnings.push(ExtractWarning::with_code(
                    ExtractWarningCode::PageFailed,
                    err.to_string(),
                ));
                (0.0, Err(err.to_string()))
            }
        };
        CollectedPage {
            page: index,
            height,
            glyphs,
            hints: source.ruling_hints(index),
            warnings,
        }
    }

    fn repeated_margin_text(&self, collected: &[CollectedPage]) -> RepeatedMarginText {
        let Some(options) = &self.cross_page else {
            return RepeatedMarginText::default();
        };
        let pages: Vec<(&[GlyphRecord], f64)> = collected
            .iter()
            .filter_map(|page| match &page.glyphs {
                Ok(glyphs) => Some((glyphs.as_slice(), page.height)),
                Err(_) => None,
            })
            .collect();
        let repeated =
            RepeatedMarginText::detect(&pages, &self.pipeline.settings().furniture, options);
        #[cfg(feature = "tracing")]
        tracing::debug!(repeated = repeated.len(), "cross-page margin text detected");
        repeated
    }

    fn finish_page(&self, collected: CollectedPage, repeated: &RepeatedMarginText) -> PageResult {
        let CollectedPage {
            page,
            height,
            glyphs,
            hints,
            mut warnings,
        } = collected;

        let outcome = match glyphs {
            Err(error) => PageOutcome::Failed { error },
            Ok(glyphs) => {
                let glyphs = repeated.strip(glyphs, height, &self.pipeline.settings().furniture);
                let table = self
                    .pipeline
                    .extract_from_glyphs(glyphs, hints.as_ref())
                    .drain_into(&mut warnings);
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    page,
                    rows = table.as_ref().map_or(0, Table::row_count),
                    columns = table.as_ref().map_or(0, Table::column_count),
                    "page processed"
                );
                match table {
                    Some(table) => PageOutcome::Table(table),
                    None => PageOutcome::NoTable,
                }
            }
        };

        let warnings = warnings.into_iter().map(|w| w.on_page(page)).collect();
        PageResult {
            page,
            outcome,
            warnings,
        }
    }
}
