use std::path::Path;

use glyphgrid::{GlyphRecord, PageSource, TablePipeline};

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

    let mut pages_out: Vec<(usize, Vec<GlyphRecord>)> = Vec::with_capacity(page_indices.len());
    for &idx in &page_indices {
        let layer = match doc.text_layer(idx) {
            Ok(layer) => layer,
            Err(e) => {
                eprintln!("Error reading page {}: {e}", idx + 1);
                continue;
            }
        };
        let result = pipeline.collect(&layer);
        report_warnings(&result.warnings);
        pages_out.push((idx, result.value));
    }

    match format {
        OutputFormat::Text => {
            write_text(&pages_out);
            Ok(())
        }
        OutputFormat::Json => {
            let json: Vec<serde_json::Value> = pages_out
                .iter()
                .map(|(idx, glyphs)| serde_json::json!({ "page": idx + 1, "glyphs": glyphs }))
                .collect();
            print_json(&json)
        }
        OutputFormat::Csv => {
            write_csv(&pages_out);
            Ok(())
        }
    }
}

fn write_text(pages: &[(usize, Vec<GlyphRecord>)]) {
    for (idx, glyphs) in pages {
        println!("--- Page {} ({} glyphs) ---", idx + 1, glyphs.len());
        for g in glyphs {
            println!(
                "{:>8.1} {:>8.1} {:>7.1} {:>5.1} {:<4} {}",
                g.x,
                g.y,
                g.width,
                g.font_size,
                if g.is_bold { "bold" } else { "" },
                g.text
            );
        }
    }
}

fn write_csv(pages: &[(usize, Vec<GlyphRecord>)]) {
    println!("page,text,x,y,width,font_size,font_name,is_bold");
    for (idx, glyphs) in pages {
        for g in glyphs {
            println!(
                "{},{},{:.2},{:.2},{:.2},{:.1},{},{}",
                idx + 1,
                csv_escape(&g.text),
                g.x,
                g.y,
                g.width,
                g.font_size,
                csv_escape(&g.font_name),
                g.is_bold
            );
        }
    }
}
