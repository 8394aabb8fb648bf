//! Column boundary detection.
//!
//! Column positions are inferred by clustering glyph x-coordinates across
//! all rows, optionally guided by vertical ruling lines detected from the
//! rendered page.

use std::collections::{BTreeMap, BTreeSet};

use crate::rows::RowCluster;

/// A vertical ruling line detected from rendered pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerticalRuling {
    /// Horizontal position of the line.
    pub x: f64,
}

/// Ruling lines supplied by an external line detector.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulingHints {
    /// Vertical rulings, in any order.
    pub vertical: Vec<VerticalRuling>,
}

impl RulingHints {
    /// Build hints from vertical ruling x-positions.
    pub fn from_vertical(xs: impl IntoIterator<Item = f64>) -> Self {
        Self {
            vertical: xs.into_iter().map(|x| VerticalRuling { x }).collect(),
        }
    }

    /// Returns true if there are no usable rulings.
    pub fn is_empty(&self) -> bool {
        self.vertical.iter().all(|r| !r.x.is_finite())
    }

    fn sorted_xs(&self) -> Vec<f64> {
        let mut xs: Vec<f64> = self
            .vertical
            .iter()
            .map(|r| r.x)
            .filter(|x| x.is_finite())
            .collect();
        xs.sort_by(f64::total_cmp);
        xs.dedup();
        xs
    }
}

/// Options for column detection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ColumnOptions {
    /// Average glyph advance as a fraction of font size. Default: 0.6.
    pub char_width_factor: f64,
    /// Clustering threshold in average character widths, without rulings. Default: 3.0.
    pub threshold_chars: f64,
    /// Minimum clustering threshold without rulings, in pixels. Default: 15.0.
    pub min_threshold: f64,
    /// Clustering threshold in average character widths, with rulings. Default: 2.0.
    pub ruled_threshold_chars: f64,
    /// Minimum clustering threshold with rulings, in pixels. Default: 10.0.
    pub ruled_min_threshold: f64,
    /// A ruling this close to an x-position forces a cluster split. Default: 5.0.
    pub ruling_split_distance: f64,
    /// Boundaries this close to a ruling snap onto it. Default: 10.0.
    pub ruling_snap_distance: f64,
    /// Minimum fraction of rows a text-derived boundary must appear in. Default: 0.1.
    pub min_row_fraction: f64,
    /// Boundaries closer than this are treated as duplicates. Default: 2.0.
    pub boundary_epsilon: f64,
}

impl Default for ColumnOptions {
    fn default() -> Self {
        Self {
            char_width_factor: 0.6,
            threshold_chars: 3.0,
            min_threshold: 15.0,
            ruled_threshold_chars: 2.0,
            ruled_min_threshold: 10.0,
            ruling_split_distance: 5.0,
            ruling_snap_distance: 10.0,
            min_row_fraction: 0.1,
            boundary_epsilon: 2.0,
        }
    }
}

impl ColumnOptions {
    /// Clustering threshold for the given average font size.
    pub fn threshold(&self, average_font_size: f64, ruled: bool) -> f64 {
        if ruled {
            (self.char_width_factor * average_font_size * self.ruled_threshold_chars)
                .max(self.ruled_min_threshold)
        } else {
            (self.char_width_factor * average_font_size * self.threshold_chars)
                .max(self.min_threshold)
        }
    }
}

/// Column start positions: strictly ascending, no two closer than the
/// epsilon they were built with.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<f64>", into = "Vec<f64>"))]
pub struct ColumnBoundaries(Vec<f64>);

impl ColumnBoundaries {
    /// Build boundaries from arbitrary positions.
    ///
    /// Non-finite values are dropped, the rest sorted, and any value within
    /// `epsilon` of the previously kept one is discarded.
    pub fn new(values: impl IntoIterator<Item = f64>, epsilon: f64) -> Self {
        let mut xs: Vec<f64> = values.into_iter().filter(|x| x.is_finite()).collect();
        xs.sort_by(f64::total_cmp);
        let epsilon = epsilon.max(0.0);
        let mut kept: Vec<f64> = Vec::with_capacity(xs.len());
        for x in xs {
            match kept.last() {
                Some(&last) if x - last <= epsilon => {}
                _ => kept.push(x),
            }
        }
        Self(kept)
    }

    /// Boundaries as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no column was found.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate boundaries left to right.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Mean distance between consecutive boundaries, if there are at least two.
    pub fn average_spacing(&self) -> Option<f64> {
        if self.0.len() < 2 {
            return None;
        }
        let span = self.0[self.0.len() - 1] - self.0[0];
        Some(span / (self.0.len() - 1) as f64)
    }

    /// Index of the boundary nearest to `x` and the absolute distance to it.
    pub fn nearest(&self, x: f64) -> Option<(usize, f64)> {
        if self.0.is_empty() || !x.is_finite() {
            return None;
        }
        let idx = self.0.partition_point(|&b| b < x);
        let candidates = [idx.checked_sub(1), (idx < self.0.len()).then_some(idx)];
        candidates
            .into_iter()
            .flatten()
            .map(|i| (i, (self.0[i] - x).abs()))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

impl From<Vec<f64>> for ColumnBoundaries {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values, 0.0)
    }
}

impl From<ColumnBoundaries> for Vec<f64> {
    fn from(boundaries: ColumnBoundaries) -> Self {
        boundaries.0
    }
}

/// Glyphs sharing one rounded x-position.
#[derive(Debug, Default)]
struct Position {
    frequency: usize,
    rows: BTreeSet<usize>,
}

/// A boundary candidate before filtering.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    x: f64,
    row_support: usize,
    from_ruling: bool,
}

/// Detect column boundaries for a page's rows.
///
/// 1. Glyph x-positions are rounded and counted, remembering which rows
///    contribute to each.
/// 2. Sorted positions are merged greedily while consecutive gaps stay
///    below the threshold; a ruling near a position forces a split once the
///    gap exceeds half the threshold.
/// 3. Each cluster collapses to its frequency-weighted mean.
/// 4. With rulings, boundaries snap to nearby rulings and unmatched
///    rulings become boundaries of their own.
/// 5. Text-derived boundaries supported by too few rows are dropped;
///    if that removes everything, the unfiltered set is used.
pub fn detect_columns(
    rows: &[RowCluster],
    hints: Option<&RulingHints>,
    options: &ColumnOptions,
) -> ColumnBoundaries {
    let rulings = hints.map(RulingHints::sorted_xs).unwrap_or_default();
    let ruled = !rulings.is_empty();

    let mut positions: BTreeMap<i64, Position> = BTreeMap::new();
    let mut font_size_sum = 0.0;
    let mut glyph_count = 0usize;
    for (row_idx, row) in rows.iter().enumerate() {
        for glyph in row.items.iter().filter(|g| g.x.is_finite()) {
            let entry = positions.entry(glyph.x.round() as i64).or_default();
            entry.frequency += 1;
            entry.rows.insert(row_idx);
            font_size_sum += glyph.font_size;
            glyph_count += 1;
        }
    }
    if glyph_count == 0 && !ruled {
        return ColumnBoundaries::default();
    }

    let average_font_size = if glyph_count > 0 {
        font_size_sum / glyph_count as f64
    } else {
        0.0
    };
    let threshold = options.threshold(average_font_size, ruled);

    let mut clusters: Vec<Vec<(f64, &Position)>> = Vec::new();
    for (&key, position) in &positions {
        let x = key as f64;
        let joins = clusters.last().and_then(|c| c.last()).is_some_and(|&(prev, _)| {
            let gap = x - prev;
            let ruling_here = rulings
                .iter()
                .any(|r| (r - x).abs() <= options.ruling_split_distance);
            gap < threshold && !(ruling_here && gap > threshold / 2.0)
        });
        match clusters.last_mut() {
            Some(cluster) if joins => cluster.push((x, position)),
            _ => clusters.push(vec![(x, position)]),
        }
    }

    let mut candidates: Vec<Candidate> = clusters
        .iter()
        .map(|cluster| {
            let total: usize = cluster.iter().map(|(_, p)| p.frequency).sum();
            let weighted: f64 = cluster.iter().map(|(x, p)| x * p.frequency as f64).sum();
            let support: BTreeSet<usize> =
                cluster.iter().flat_map(|(_, p)| p.rows.iter().copied()).collect();
            Candidate {
                x: weighted / total as f64,
                row_support: support.len(),
                from_ruling: false,
            }
        })
        .collect();

    if ruled {
        snap_to_rulings(&mut candidates, &rulings, options.ruling_snap_distance);
    }

    let min_support = options.min_row_fraction * rows.len() as f64;
    let filtered: Vec<Candidate> = candidates
        .iter()
        .copied()
        .filter(|c| c.from_ruling || c.row_support as f64 >= min_support)
        .collect();
    let chosen = if filtered.is_empty() {
        candidates
    } else {
        filtered
    };

    normalize(chosen, options.boundary_epsilon)
}

fn snap_to_rulings(candidates: &mut Vec<Candidate>, rulings: &[f64], snap_distance: f64) {
    for candidate in candidates.iter_mut() {
        let nearest = rulings
            .iter()
            .map(|&r| (r, (r - candidate.x).abs()))
            .min_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((ruling, distance)) = nearest {
            if distance <= snap_distance {
                candidate.x = ruling;
                candidate.from_ruling = true;
            }
        }
    }

    for &ruling in rulings {
        let covered = candidates
            .iter()
            .any(|c| (c.x - ruling).abs() <= snap_distance);
        if !covered {
            candidates.push(Candidate {
                x: ruling,
                row_support: 0,
                from_ruling: true,
            });
        }
    }
}

/// Sort candidates and collapse near-duplicates, preferring ruling-derived ones.
fn normalize(mut candidates: Vec<Candidate>, epsilon: f64) -> ColumnBoundaries {
    candidates.sort_by(|a, b| a.x.total_cmp(&b.x));
    let mut kept: Vec<Candidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match kept.last_mut() {
            Some(last) if candidate.x - last.x <= epsilon => {
                if candidate.from_ruling && !last.from_ruling {
                    *last = candidate;
                }
            }
            _ => kept.push(candidate),
        }
    }
    ColumnBoundaries::new(kept.into_iter().map(|c| c.x), epsilon)
}
