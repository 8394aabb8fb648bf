use std::path::Path;

use glyphgrid::{ExtractWarning, JsonDocument, PipelineSettings};
use tracing_subscriber::EnvFilter;

use crate::page_range::parse_page_range;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `-v` selects debug and `-vv`
/// trace for glyphgrid crates, and warnings only without either.
pub fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "warn,glyphgrid=debug,glyphgrid_core=debug",
        _ => "warn,glyphgrid=trace,glyphgrid_core=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Open a text-layer dump with user-friendly error messages.
///
/// Returns `Err(1)` with a message printed to stderr if the file is missing
/// or is not a dump.
pub fn open_document(file: &Path) -> Result<JsonDocument, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }

    JsonDocument::open_file(file).map_err(|e| {
        eprintln!("Error: failed to read text-layer dump: {e}");
        1
    })
}

/// Resolve an optional page range string into 0-indexed page indices.
///
/// If `pages` is `None`, returns all pages (0..page_count).
pub fn resolve_pages(pages: Option<&str>, page_count: usize) -> Result<Vec<usize>, i32> {
    match pages {
        Some(range) => parse_page_range(range, page_count).map_err(|e| {
            eprintln!("Error: {e}");
            1
        }),
        None => Ok((0..page_count).collect()),
    }
}

/// Load pipeline settings from a JSON file, or the defaults.
pub fn load_settings(config: Option<&Path>) -> Result<PipelineSettings, i32> {
    let Some(path) = config else {
        return Ok(PipelineSettings::default());
    };
    let text = std::fs::read_to_string(path).map_err(|e| {
        eprintln!("Error: failed to read config {}: {e}", path.display());
        1
    })?;
    let settings = serde_json::from_str(&text).map_err(|e| {
        eprintln!("Error: invalid config {}: {e}", path.display());
        1
    })?;
    tracing::debug!(path = %path.display(), "loaded pipeline settings");
    Ok(settings)
}

/// Print warnings to stderr.
pub fn report_warnings<'a>(warnings: impl IntoIterator<Item = &'a ExtractWarning>) {
    for warning in warnings {
        eprintln!("Warning: {warning}");
    }
}

/// Print a serializable value as one line of JSON.
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), i32> {
    let json = serde_json::to_string(value).map_err(|e| {
        eprintln!("Error: failed to serialize output: {e}");
        1
    })?;
    println!("{json}");
    Ok(())
}

/// Escape a string for CSV output.
///
/// If the text contains commas, double quotes, or line breaks, wraps it in
/// double quotes and doubles any internal double quotes.
pub fn csv_escape(text: &str) -> String {
    if text.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// Pad `text` to `width` characters for aligned text output.
pub fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let mut padded = text.to_string();
    padded.extend(std::iter::repeat_n(' ', width.saturating_sub(len)));
    padded
}
