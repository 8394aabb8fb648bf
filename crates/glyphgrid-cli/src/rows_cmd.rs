use std::path::Path;

use glyphgrid::{PageAnalysis, PageSource, TablePipeline};

use crate::cli::OutputFormat;
use crate::shared::{
    csv_escape, load_settings, open_document, print_json, report_warnings, resolve_pages,
};

pub fn run(
    file: &Path,
    pages: Option<&str>,
    format: OutputFormat,
    config: Option<&Path>,
) -> Result<(), i32> {
    let doc = open_document(file)?;
    let page_indices = resolve_pages(pages, doc.page_count())?;
    let pipeline = TablePipeline::new(load_settings(config)?);

    let mut analyses: Vec<(usize, PageAnalysis)> = Vec::with_capacity(page_indices.len());
    for &idx in &page_indices {
        let layer = match doc.text_layer(idx) {
            Ok(layer) => layer,
            Err(e) => {
                eprintln!("Error reading page {}: {e}", idx + 1);
                continue;
            }
        };
        let hints = doc.ruling_hints(idx);
        let result = pipeline.analyze(&layer, hints.as_ref());
        report_warnings(&result.warnings);
        analyses.push((idx, result.value));
    }

    match format {
        OutputFormat::Text => {
            write_text(&analyses);
            Ok(())
        }
        OutputFormat::Json => {
            let json: Vec<serde_json::Value> = analyses
                .iter()
                .map(|(idx, analysis)| {
                    serde_json::json!({
                        "page": idx + 1,
                        "columns": analysis.columns,
                        "rows": analysis.rows,
                        "placement": analysis.placement,
                        "has_table": analysis.table.is_some(),
                    })
                })
                .collect();
            print_json(&json)
        }
        OutputFormat::Csv => {
            write_csv(&analyses);
            Ok(())
        }
    }
}

fn write_text(analyses: &[(usize, PageAnalysis)]) {
    for (idx, analysis) in analyses {
        let columns: Vec<String> = analysis.columns.iter().map(|x| format!("{x:.1}")).collect();
        println!(
            "--- Page {} ({} rows, columns: [{}]) ---",
            idx + 1,
            analysis.rows.len(),
            columns.join(", ")
        );
        for (r, row) in analysis.rows.iter().enumerate() {
            println!(
                "{:>4} y={:<8.1} size={:<5.1} {}",
                r + 1,
                row.y,
                row.font_size,
                row.text()
            );
        }
    }
}

fn write_csv(analyses: &[(usize, PageAnalysis)]) {
    println!("page,row,y,font_size,min_x,max_x,text");
    for (idx, analysis) in analyses {
        for (r, row) in analysis.rows.iter().enumerate() {
            println!(
                "{},{},{:.2},{:.1},{:.2},{:.2},{}",
                idx + 1,
                r + 1,
                row.y,
                row.font_size,
                row.min_x,
                row.max_x,
                csv_escape(&row.text())
            );
        }
    }
}
