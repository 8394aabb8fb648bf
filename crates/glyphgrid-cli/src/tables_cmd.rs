use std::path::Path;

use glyphgrid::{CrossPageOptions, DocumentExtractor, DocumentTables, PageSource, Table};

use crate::cli::OutputFormat;
use crate::shared::{
    csv_escape, load_settings, open_document, pad, print_json, report_warnings, resolve_pages,
};

pub fn run(
    file: &Path,
    pages: Option<&str>,
    format: OutputFormat,
    config: Option<&Path>,
    cross_page_furniture: bool,
) -> Result<(), i32> {
    let doc = open_document(file)?;
    let page_indices = resolve_pages(pages, doc.page_count())?;
    let settings = load_settings(config)?;

    let mut extractor = DocumentExtractor::new(settings);
    if cross_page_furniture {
        extractor = extractor.with_cross_page(CrossPageOptions::default());
    }
    #[cfg(feature = "parallel")]
    let result = if pages.is_none() {
        extractor.extract_parallel(&doc)
    } else {
        extractor.extract_pages(&doc, &page_indices)
    };
    #[cfg(not(feature = "parallel"))]
    let result = extractor.extract_pages(&doc, &page_indices);

    report_warnings(result.warnings());
    match format {
        OutputFormat::Text => write_grid(&result),
        OutputFormat::Json => print_json(&result),
        OutputFormat::Csv => write_csv(&result),
    }
}

fn write_grid(result: &DocumentTables) -> Result<(), i32> {
    let mut table_num = 0;

    for (page, table) in result.tables() {
        table_num += 1;
        println!(
            "--- Table {} (page {}, {} rows x {} columns) ---",
            table_num,
            page + 1,
            table.row_count(),
            table.column_count()
        );
        print_grid(table);
        println!();
    }

    if table_num == 0 {
        println!("No tables found.");
    }
    Ok(())
}

fn print_grid(table: &Table) {
    let grid = table.text_grid();
    let mut widths = vec![1usize; table.column_count()];
    for row in &grid {
        for (width, text) in widths.iter_mut().zip(row) {
            *width = (*width).max(text.chars().count());
        }
    }

    for row in &grid {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(text, &width)| pad(text, width))
            .collect();
        println!("| {} |", cells.join(" | "));
    }
}

fn write_csv(result: &DocumentTables) -> Result<(), i32> {
    let mut first_table = true;

    for (_, table) in result.tables() {
        if !first_table {
            println!();
        }
        first_table = false;

        for row in &table.rows {
            let cells: Vec<String> = row.iter().map(|cell| csv_escape(&cell.text)).collect();
            println!("{}", cells.join(","));
        }
    }
    Ok(())
}
