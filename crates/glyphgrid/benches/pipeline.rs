//! Performance benchmarks for glyphgrid.
//!
//! Benchmarks cover the per-page pipeline stages and document extraction
//! over three synthetic text layers:
//! - Small: 5x3 table
//! - Medium: 40x6 table with a running header and footer
//! - Dense: 120x10 table with multi-line cells

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glyphgrid::glyphgrid_core::{cluster_rows, collect_glyphs, detect_columns};
use glyphgrid::{
    ColumnOptions, CrossPageOptions, DocumentExtractor, PipelineSettings, RowOptions,
    TablePipeline, TextItem, TextLayer,
};

// ---------------------------------------------------------------------------
// Text layer generators
// ---------------------------------------------------------------------------

/// Build a page holding a `rows` x `cols` table of 8pt text.
fn table_layer(rows: usize, cols: usize, furniture: bool) -> TextLayer {
    let height = 120.0 + rows as f64 * 12.0;
    let mut items = Vec::with_capacity(rows * cols + 2);
    for r in 0..rows {
        let y = height - 80.0 - r as f64 * 12.0;
        for c in 0..cols {
            let x = 40.0 + c as f64 * 70.0;
            let text = if r % 7 == 3 && c == 1 {
                "continued".to_string()
            } else {
                format!("R{}C{}", r + 1, c + 1)
            };
            items.push(TextItem::new(text, x, y, 8.0).with_font("Helvetica"));
        }
    }
    if furniture {
        items.push(TextItem::new("Quarterly Report", 40.0, height - 10.0, 8.0));
        items.push(TextItem::new("Page 1 of 9", 300.0, 10.0, 8.0));
    }
    TextLayer::new(40.0 + cols as f64 * 70.0, height, items)
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_stages(c: &mut Criterion) {
    let dense = table_layer(120, 10, false);
    let glyphs = collect_glyphs(&dense).value;
    let rows = cluster_rows(&glyphs, &RowOptions::default());

    let mut group = c.benchmark_group("stages");

    group.bench_function("collect_dense", |b| {
        b.iter(|| black_box(collect_glyphs(&dense).value.len()));
    });

    group.bench_function("cluster_rows_dense", |b| {
        b.iter(|| black_box(cluster_rows(&glyphs, &RowOptions::default()).len()));
    });

    group.bench_function("detect_columns_dense", |b| {
        b.iter(|| black_box(detect_columns(&rows, None, &ColumnOptions::default()).len()));
    });

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let small = table_layer(5, 3, false);
    let medium = table_layer(40, 6, true);
    let dense = table_layer(120, 10, false);
    let pipeline = TablePipeline::default();

    let mut group = c.benchmark_group("pipeline");

    for (name, layer) in [("small", &small), ("medium", &medium), ("dense", &dense)] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(pipeline.extract(layer, None).value.is_some()));
        });
    }

    group.finish();
}

fn bench_document(c: &mut Criterion) {
    let pages: Vec<TextLayer> = (0..10).map(|_| table_layer(40, 6, true)).collect();
    let extractor = DocumentExtractor::new(PipelineSettings::default())
        .with_cross_page(CrossPageOptions::default());

    let mut group = c.benchmark_group("document");

    group.bench_function("medium_10page", |b| {
        b.iter(|| black_box(extractor.extract(&pages).tables().count()));
    });

    #[cfg(feature = "parallel")]
    group.bench_function("medium_10page_parallel", |b| {
        b.iter(|| black_box(extractor.extract_parallel(pages.as_slice()).tables().count()));
    });

    group.finish();
}

criterion_group!(benches, bench_stages, bench_pipeline, bench_document);
criterion_main!(benches);
