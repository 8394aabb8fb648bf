//! Table building: assigning row glyphs to column cells.

use crate::columns::ColumnBoundaries;
use crate::error::{ExtractResult, ExtractWarning, ExtractWarningCode};
use crate::glyph::GlyphRecord;
use crate::rows::RowCluster;
use crate::script::is_spaceless_script;
use crate::table::{Cell, Table};

/// Characters that end a sentence; a cell ending in one is never continued.
const SENTENCE_END: &[char] = &['.', '!', '?', '\u{0964}', '\u{0965}', '。', '！', '？'];

/// Options for table building.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BuildOptions {
    /// Placement tolerance as a fraction of the average column spacing. Default: 0.3.
    pub spacing_factor: f64,
    /// Upper bound on the placement tolerance, in pixels. Also used for
    /// single-column tables. Default: 40.0.
    pub max_tolerance: f64,
    /// Glyphs within this multiple of the tolerance are still placed. Default: 2.0.
    pub degraded_factor: f64,
    /// Merge wrapped cell text across adjacent rows. Default: true.
    pub merge_wrapped_cells: bool,
    /// Upper cells at least this many characters long are not continued. Default: 80.
    pub max_merge_length: usize,
    /// Only merge when the lower row has fewer filled cells than the upper. Default: false.
    pub continuation_rows_only: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            spacing_factor: 0.3,
            max_tolerance: 40.0,
            degraded_factor: 2.0,
            merge_wrapped_cells: true,
            max_merge_length: 80,
            continuation_rows_only: false,
        }
    }
}

impl BuildOptions {
    /// Placement tolerance for the given boundaries.
    pub fn tolerance(&self, columns: &ColumnBoundaries) -> f64 {
        match columns.average_spacing() {
            Some(spacing) => (self.spacing_factor * spacing).min(self.max_tolerance),
            None => self.max_tolerance,
        }
    }
}

/// Counts of how glyphs were placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementStats {
    /// Glyphs placed within tolerance.
    pub placed: usize,
    /// Glyphs placed outside tolerance but within the degraded band.
    pub degraded: usize,
    /// Glyphs too far from every column.
    pub dropped: usize,
}

/// A built table together with placement statistics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildOutcome {
    /// The table, before script and font resolution.
    pub table: Table,
    /// How glyphs were placed.
    pub stats: PlacementStats,
}

/// Build a rectangular table from row clusters and column boundaries.
///
/// Every glyph goes to the cell of its nearest boundary when within
/// tolerance, or within `degraded_factor` times the tolerance; further
/// glyphs are dropped with a [`ExtractWarningCode::DroppedGlyph`] warning.
/// Wrapped cell text is then merged upward and blank rows removed.
pub fn build_table(
    rows: &[RowCluster],
    columns: &ColumnBoundaries,
    options: &BuildOptions,
) -> ExtractResult<BuildOutcome> {
    let mut stats = PlacementStats::default();
    let mut warnings = Vec::new();
    let tolerance = options.tolerance(columns);

    let mut grid: Vec<Vec<Cell>> = Vec::with_capacity(rows.len());
    for (row_idx, row) in rows.iter().enumerate() {
        let mut cells = vec![Cell::default(); columns.len()];
        for glyph in &row.items {
            let Some((col, distance)) = columns.nearest(glyph.x) else {
                stats.dropped += 1;
                continue;
            };
            if distance <= tolerance {
                stats.placed += 1;
            } else if distance <= tolerance * options.degraded_factor {
                stats.degraded += 1;
            } else {
                stats.dropped += 1;
                warnings.push(
                    ExtractWarning::with_code(
                        ExtractWarningCode::DroppedGlyph,
                        format!(
                            "glyph '{}' is {distance:.1}px from the nearest column",
                            glyph.text
                        ),
                    )
                    .at(format!("row {row_idx}")),
                );
                continue;
            }
            append_glyph(&mut cells[col], glyph);
        }
        grid.push(cells);
    }

    if stats.degraded > 0 {
        warnings.push(ExtractWarning::with_code(
            ExtractWarningCode::DegradedPlacement,
            format!(
                "{} glyph(s) placed beyond the {tolerance:.1}px column tolerance",
                stats.degraded
            ),
        ));
    }

    if options.merge_wrapped_cells {
        merge_wrapped_cells(&mut grid, options);
    }
    let mut table = Table {
        columns: columns.clone(),
        rows: grid,
    };
    table.retain_filled_rows();

    ExtractResult::with_warnings(BuildOutcome { table, stats }, warnings)
}

fn append_glyph(cell: &mut Cell, glyph: &GlyphRecord) {
    if cell.text.is_empty() {
        cell.text = glyph.text.clone();
        cell.font_name = glyph.font_name.clone();
        cell.is_bold = glyph.is_bold;
        cell.font_size = glyph.font_size;
        return;
    }
    join_text(&mut cell.text, &glyph.text);
    cell.font_size = cell.font_size.max(glyph.font_size);
}

/// Append `next` to `text`, separated by a space unless the combined text
/// is in a script written without word spaces.
fn join_text(text: &mut String, next: &str) {
    if !is_spaceless_script(text) && !is_spaceless_script(next) {
        text.push(' ');
    }
    text.push_str(next);
}

fn filled(row: &[Cell]) -> usize {
    row.iter().filter(|cell| !cell.is_blank()).count()
}

/// Returns true for text made of digits and numeric punctuation only.
pub fn is_numeric_text(text: &str) -> bool {
    let text = text.trim();
    text.chars().any(|c| c.is_ascii_digit())
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | '+' | '%' | '$' | ' '))
}

fn ends_sentence(text: &str) -> bool {
    text.trim_end().ends_with(SENTENCE_END)
}

fn continues(upper: &Cell, lower: &Cell, options: &BuildOptions) -> bool {
    !upper.is_blank()
        && !lower.is_blank()
        && !upper.is_bold
        && !ends_sentence(&upper.text)
        && !(is_numeric_text(&upper.text) && is_numeric_text(&lower.text))
        && upper.text.chars().count() < options.max_merge_length
}

/// Merge each cell into the one above it when it looks like wrapped text.
///
/// Row 0 is treated as a header and never continued. A merged lower cell
/// is left empty, so a cell is merged at most once per pass.
fn merge_wrapped_cells(grid: &mut [Vec<Cell>], options: &BuildOptions) {
    for r in 1..grid.len().saturating_sub(1) {
        let (head, tail) = grid.split_at_mut(r + 1);
        let upper_row = &mut head[r];
        let lower_row = &mut tail[0];

        if options.continuation_rows_only && filled(lower_row) >= filled(upper_row) {
            continue;
        }

        for (upper, lower) in upper_row.iter_mut().zip(lower_row.iter_mut()) {
            if !continues(upper, lower, options) {
                continue;
            }
            let moved = std::mem::take(lower);
            join_text(&mut upper.text, &moved.text);
            upper.font_size = upper.font_size.max(moved.font_size);
        }
    }
}
