//! WebAssembly/JavaScript bindings for glyphgrid.
//!
//! Takes PDF.js `getTextContent()` output straight from the browser and
//! returns reconstructed tables. Complex types cross the boundary as
//! JsValue using serde_wasm_bindgen.

use wasm_bindgen::prelude::*;

use glyphgrid::{
    CrossPageOptions, DocumentExtractor, JsonDocument, PageSource, PipelineSettings, RulingHints,
    TablePipeline, TextLayer,
};

fn js_error(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

/// A table pipeline configured from JavaScript (WASM binding).
///
/// # JavaScript Usage
///
/// ```js
/// const pipeline = new WasmPipeline({ min_rows: 1 });
/// const content = await page.getTextContent();
/// const vp = page.getViewport({ scale: 1 });
/// const table = pipeline.extractTable({ width: vp.width, height: vp.height, items: content.items });
/// ```
#[wasm_bindgen]
pub struct WasmPipeline {
    inner: TablePipeline,
}

#[wasm_bindgen]
impl WasmPipeline {
    /// Create a pipeline. `settings` may be omitted or a partial settings
    /// object; missing fields use defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(settings: JsValue) -> Result<WasmPipeline, JsError> {
        let settings: PipelineSettings = if settings.is_undefined() || settings.is_null() {
            PipelineSettings::default()
        } else {
            serde_wasm_bindgen::from_value(settings).map_err(js_error)?
        };
        Ok(WasmPipeline {
            inner: TablePipeline::new(settings),
        })
    }

    /// Current settings as a JavaScript object.
    #[wasm_bindgen(getter)]
    pub fn settings(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(self.inner.settings()).map_err(js_error)
    }

    /// Reconstruct the table on one page.
    ///
    /// Returns the table object, or `null` if the page holds no table.
    /// `rulings` is an optional `{ vertical: [{ x }] }` object.
    #[wasm_bindgen(js_name = "extractTable")]
    pub fn extract_table(&self, layer: JsValue, rulings: JsValue) -> Result<JsValue, JsError> {
        let layer: TextLayer = serde_wasm_bindgen::from_value(layer).map_err(js_error)?;
        let hints = parse_rulings(rulings)?;
        let result = self.inner.extract(&layer, hints.as_ref());
        match result.value {
            Some(table) => serde_wasm_bindgen::to_value(&table).map_err(js_error),
            None => Ok(JsValue::NULL),
        }
    }

    /// Run every stage on one page and return glyphs, rows, columns,
    /// placement counts and the table.
    pub fn analyze(&self, layer: JsValue, rulings: JsValue) -> Result<JsValue, JsError> {
        let layer: TextLayer = serde_wasm_bindgen::from_value(layer).map_err(js_error)?;
        let hints = parse_rulings(rulings)?;
        let result = self.inner.analyze(&layer, hints.as_ref());
        serde_wasm_bindgen::to_value(&result.value).map_err(js_error)
    }
}

fn parse_rulings(rulings: JsValue) -> Result<Option<RulingHints>, JsError> {
    if rulings.is_undefined() || rulings.is_null() {
        return Ok(None);
    }
    let hints: RulingHints = serde_wasm_bindgen::from_value(rulings).map_err(js_error)?;
    Ok((!hints.is_empty()).then_some(hints))
}

/// A multi-page text-layer dump (WASM binding).
///
/// # JavaScript Usage
///
/// ```js
/// const doc = WasmDocument.open(new TextEncoder().encode(JSON.stringify(dump)));
/// console.log(`Pages: ${doc.pageCount}`);
/// const result = doc.extractTables(true);
/// ```
#[wasm_bindgen]
pub struct WasmDocument {
    inner: JsonDocument,
    settings: PipelineSettings,
}

#[wasm_bindgen]
impl WasmDocument {
    /// Parse a JSON dump from UTF-8 bytes.
    pub fn open(data: &[u8]) -> Result<WasmDocument, JsError> {
        let inner = JsonDocument::from_slice(data).map_err(js_error)?;
        Ok(WasmDocument {
            inner,
            settings: PipelineSettings::default(),
        })
    }

    /// Number of pages in the dump.
    #[wasm_bindgen(getter, js_name = "pageCount")]
    pub fn page_count(&self) -> usize {
        self.inner.page_count()
    }

    /// Replace the pipeline settings used by `extractTables`.
    #[wasm_bindgen(js_name = "setSettings")]
    pub fn set_settings(&mut self, settings: JsValue) -> Result<(), JsError> {
        self.settings = serde_wasm_bindgen::from_value(settings).map_err(js_error)?;
        Ok(())
    }

    /// Extract tables from every page.
    ///
    /// When `crossPage` is true, headers and footers repeated across pages
    /// are removed first.
    #[wasm_bindgen(js_name = "extractTables")]
    pub fn extract_tables(&self, cross_page: Option<bool>) -> Result<JsValue, JsError> {
        let result = self.extractor(cross_page.unwrap_or(false)).extract(&self.inner);
        serde_wasm_bindgen::to_value(&result).map_err(js_error)
    }
}

impl WasmDocument {
    fn extractor(&self, cross_page: bool) -> DocumentExtractor {
        let extractor = DocumentExtractor::new(self.settings.clone());
        if cross_page {
            extractor.with_cross_page(CrossPageOptions::default())
        } else {
            extractor
        }
    }
}

/// Detect the writing system of a string: `"latin"`, `"devanagari"`,
/// `"arabic"`, `"cjk"`, `"thai"`, `"mixed"` or `"unknown"`.
#[wasm_bindgen(js_name = "detectScript")]
pub fn detect_script(text: &str) -> String {
    glyphgrid::glyphgrid_core::detect_script(text).as_str().to_string()
}

/// Export font family for a cell: the face itself when it is spreadsheet
/// safe, otherwise the fallback for the text's script.
#[wasm_bindgen(js_name = "exportFont")]
pub fn export_font(text: &str, font_name: &str) -> String {
    use glyphgrid::glyphgrid_core::{fallback_font, safe_font_family};

    safe_font_family(font_name)
        .unwrap_or_else(|| fallback_font(glyphgrid::glyphgrid_core::detect_script(text)))
        .to_string()
}
