#![allow(dead_code)]

use std::io::Write;

use assert_cmd::Command;
use serde_json::{Value, json};
use tempfile::NamedTempFile;

pub fn cmd() -> Command {
    Command::cargo_bin("glyphgrid").unwrap()
}

/// A PDF.js text item at a bottom-left `(x, y)` with font size 10.
pub fn item(text: &str, x: f64, y: f64) -> Value {
    json!({ "str": text, "transform": [10, 0, 0, 10, x, y], "fontName": "Helvetica" })
}

pub fn page(items: Vec<Value>) -> Value {
    json!({ "width": 612, "height": 792, "items": items })
}

/// Item/Qty header with two numeric rows.
pub fn inventory_page() -> Value {
    page(vec![
        item("Item", 100.0, 600.0),
        item("Qty", 250.0, 600.0),
        item("101", 100.0, 580.0),
        item("5", 250.0, 580.0),
        item("102", 100.0, 560.0),
        item("7", 250.0, 560.0),
    ])
}

pub fn city_page() -> Value {
    page(vec![
        item("City", 100.0, 600.0),
        item("Pop", 250.0, 600.0),
        item("Oslo", 100.0, 580.0),
        item("700", 250.0, 580.0),
    ])
}

pub fn write_json(value: &Value) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(value.to_string().as_bytes()).unwrap();
    tmp
}

pub fn write_dump(pages: Vec<Value>) -> NamedTempFile {
    write_json(&json!({ "pages": pages }))
}

pub fn path(tmp: &NamedTempFile) -> &str {
    tmp.path().to_str().unwrap()
}
