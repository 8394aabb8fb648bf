//! End-to-end scenarios and properties of the single-page pipeline.

mod common;

use common::{grid_page, item, noisy_page, page};
use glyphgrid::glyphgrid_core::{
    cluster_rows, collect_glyphs, detect_columns, resolve_table, suppress_page_furniture,
};
use glyphgrid::{
    ColumnOptions, FurnitureOptions, PipelineSettings, ResolveOptions, RowOptions, RulingHints,
    Script, TablePipeline, TextDirection, TextLayer,
};
use proptest::prelude::*;

#[test]
fn single_glyph_is_one_row_and_no_table() {
    let layer = page(&[("Hello", 100.0, 200.0)]);
    let glyphs = collect_glyphs(&layer).value;
    let rows = cluster_rows(&glyphs, &RowOptions::default());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].items.len(), 1);
    assert!(TablePipeline::default().extract(&layer, None).value.is_none());
}

#[test]
fn two_rows_on_matching_columns_form_a_two_by_two_table() {
    let layer = page(&[
        ("Name", 100.0, 200.0),
        ("Age", 250.0, 200.0),
        ("Alice", 100.0, 220.0),
        ("30", 250.0, 220.0),
    ]);
    let table = TablePipeline::default()
        .extract(&layer, None)
        .value
        .expect("table");
    assert_eq!(
        table.text_grid(),
        vec![vec!["Name", "Age"], vec!["Alice", "30"]]
    );
    assert_eq!(table.columns.as_slice(), &[100.0, 250.0]);
}

#[test]
fn repeated_header_text_is_removed_before_clustering() {
    let layer = page(&[
        ("Report", 40.0, 20.0),
        ("Report", 300.0, 30.0),
        ("Report", 500.0, 50.0),
        ("Name", 100.0, 200.0),
        ("Age", 250.0, 200.0),
        ("Alice", 100.0, 220.0),
        ("30", 250.0, 220.0),
    ]);
    let glyphs = collect_glyphs(&layer).value;
    let kept = suppress_page_furniture(glyphs, layer.height, &FurnitureOptions::default());
    assert!(kept.iter().all(|g| g.text != "Report"));

    let analysis = TablePipeline::default().analyze(&layer, None).value;
    assert_eq!(analysis.rows.len(), 2);
    let table = analysis.table.expect("table");
    assert!(table.text_grid().iter().flatten().all(|t| t != "Report"));
}

#[test]
fn margin_text_seen_twice_is_kept() {
    let layer = page(&[("Draft", 40.0, 20.0), ("Draft", 300.0, 30.0)]);
    let glyphs = collect_glyphs(&layer).value;
    let kept = suppress_page_furniture(glyphs, layer.height, &FurnitureOptions::default());
    assert_eq!(kept.len(), 2);
}

#[test]
fn devanagari_cells_get_a_unicode_font() {
    let mut layer = page(&[
        ("नाम", 100.0, 200.0),
        ("शहर", 250.0, 200.0),
        ("राम", 100.0, 220.0),
        ("दिल्ली", 250.0, 220.0),
    ]);
    layer.items[0].font_name = "Mangal".to_string();
    layer.items[1].font_name = "ABCDEF+Tahoma".to_string();

    let table = TablePipeline::default()
        .extract(&layer, None)
        .value
        .expect("table");
    let header = &table.rows[0];
    assert_eq!(header[0].language, Script::Devanagari);
    assert_eq!(header[0].font_name, "Arial Unicode MS");
    assert_eq!(header[1].language, Script::Devanagari);
    assert_eq!(header[1].font_name, "Tahoma");
}

#[test]
fn sentence_punctuation_prevents_merging() {
    let layer = grid_page(
        &[&["Step", "Note"], &["1", "Mix well."], &["2", "Bake"]],
        &[100.0, 250.0],
        200.0,
        20.0,
    );
    let table = TablePipeline::default()
        .extract(&layer, None)
        .value
        .expect("table");
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.rows[1][1].text, "Mix well.");
    assert_eq!(table.rows[2][1].text, "Bake");
}

#[test]
fn wrapped_cell_is_merged_into_the_row_above() {
    let layer = grid_page(
        &[
            &["Item", "Description"],
            &["Widget", "ships in"],
            &["", "two weeks"],
        ],
        &[100.0, 250.0],
        200.0,
        20.0,
    );
    let table = TablePipeline::default()
        .extract(&layer, None)
        .value
        .expect("table");
    assert_eq!(
        table.text_grid(),
        vec![
            vec!["Item", "Description"],
            vec!["Widget", "ships in two weeks"]
        ]
    );
}

#[test]
fn arabic_cells_are_right_to_left() {
    let layer = page(&[
        ("الاسم", 100.0, 200.0),
        ("Name", 250.0, 200.0),
        ("علي", 100.0, 220.0),
        ("Ali", 250.0, 220.0),
    ]);
    let table = TablePipeline::default()
        .extract(&layer, None)
        .value
        .expect("table");
    assert_eq!(table.rows[0][0].language, Script::Arabic);
    assert_eq!(table.rows[0][0].direction, TextDirection::Rtl);
    assert_eq!(table.rows[0][1].direction, TextDirection::Ltr);
}

#[test]
fn vertical_rulings_guide_columns() {
    let layer = page(&[
        ("a", 104.0, 200.0),
        ("b", 104.0, 220.0),
        ("c", 104.0, 240.0),
    ]);
    let hints = RulingHints::from_vertical([98.0, 300.0]);
    let table = TablePipeline::default()
        .extract(&layer, Some(&hints))
        .value
        .expect("table");
    assert_eq!(table.columns.as_slice(), &[98.0, 300.0]);
    assert!(table.is_rectangular());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn tables_are_always_rectangular(layer in noisy_page()) {
        if let Some(table) = TablePipeline::default().extract(&layer, None).value {
            prop_assert!(table.is_rectangular());
            prop_assert!(table.rows.iter().all(|row| row.iter().any(|c| !c.is_blank())));
        }
    }

    #[test]
    fn column_boundaries_are_strictly_ascending(
        layer in noisy_page(),
        rulings in prop::option::of((40.0f64..450.0, 40.0f64..450.0))
    ) {
        let options = ColumnOptions::default();
        let glyphs = collect_glyphs(&layer).value;
        let rows = cluster_rows(&glyphs, &RowOptions::default());
        let hints = rulings.map(|(a, b)| RulingHints::from_vertical([a, b]));
        let columns = detect_columns(&rows, hints.as_ref(), &options);
        for pair in columns.as_slice().windows(2) {
            prop_assert!(pair[1] - pair[0] > options.boundary_epsilon, "{:?}", pair);
        }
    }

    #[test]
    fn clustering_ignores_input_order(
        (layer, shuffled) in noisy_page().prop_flat_map(|layer| {
            let items = layer.items.clone();
            (Just(layer), Just(items).prop_shuffle())
        })
    ) {
        let reordered = TextLayer::new(layer.width, layer.height, shuffled);
        let a = cluster_rows(&collect_glyphs(&layer).value, &RowOptions::default());
        let b = cluster_rows(&collect_glyphs(&reordered).value, &RowOptions::default());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn resolving_a_resolved_table_changes_nothing(layer in noisy_page()) {
        if let Some(table) = TablePipeline::default().extract(&layer, None).value {
            let again = resolve_table(table.clone(), &ResolveOptions::default()).value;
            prop_assert_eq!(again, table);
        }
    }
}

#[test]
fn settings_change_pipeline_behavior() {
    let layer = page(&[("A", 100.0, 200.0), ("B", 250.0, 200.0)]);
    let settings = PipelineSettings {
        min_rows: 1,
        ..PipelineSettings::default()
    };
    let table = TablePipeline::new(settings).extract(&layer, None).value;
    assert_eq!(table.map(|t| t.column_count()), Some(2));
}

#[test]
fn items_with_explicit_widths_keep_them() {
    let layer = TextLayer::new(
        612.0,
        792.0,
        vec![item("wide", 100.0, 200.0, 10.0).with_width(120.0)],
    );
    let glyphs = collect_glyphs(&layer).value;
    assert_eq!(glyphs[0].right(), 220.0);
}
