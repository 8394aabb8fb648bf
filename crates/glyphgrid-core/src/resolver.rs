//! Script and font resolution for spreadsheet export.
//!
//! Each non-empty cell is normalized (NFC, zero-width joiners removed,
//! known-bad Devanagari sequences repaired), tagged with its script and
//! text direction, and given a font family that spreadsheet applications
//! render for that script.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::error::{ExtractResult, ExtractWarning, ExtractWarningCode};
use crate::script::{Script, detect_direction, detect_script};
use crate::table::{Cell, Table};

/// Font families that render every script this crate detects.
pub const SAFE_FONTS: &[&str] = &["Arial Unicode MS", "Calibri", "Times New Roman", "Tahoma"];

const ZERO_WIDTH_JOINERS: &[char] = &['\u{200C}', '\u{200D}'];

/// Options for cell resolution.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResolveOptions {
    /// Apply Devanagari sequence fixups. Default: true.
    pub devanagari_fixups: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            devanagari_fixups: true,
        }
    }
}

/// Known-bad Devanagari sequences produced by text-layer extraction,
/// with their replacements.
static DEVANAGARI_FIXUPS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        // Short-i matras emitted before their consonant (visual order).
        (
            r"(^|[^\x{0915}-\x{0939}\x{0958}-\x{095F}\x{093C}])(\x{093F}+)([\x{0915}-\x{0939}\x{0958}-\x{095F}]\x{093C}?)",
            "${1}${3}${2}",
        ),
        (r"\x{094D}{2,}", "\u{094D}"),
        // Dotted circle left in front of a dependent sign.
        (r"\x{25CC}([\x{093E}-\x{094D}])", "${1}"),
        (r"\x{0905}\x{093E}", "\u{0906}"),
        (r"\x{0905}\x{094B}", "\u{0913}"),
        (r"\x{0905}\x{094C}", "\u{0914}"),
        (r"\x{090F}\x{0947}", "\u{0910}"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (
            Regex::new(pattern).expect("valid devanagari fixup regex"),
            replacement,
        )
    })
    .collect()
});

fn apply_devanagari_fixups(text: &str) -> String {
    DEVANAGARI_FIXUPS
        .iter()
        .fold(text.to_string(), |acc, (re, replacement)| {
            re.replace_all(&acc, *replacement).into_owned()
        })
}

/// Normalize cell text for export.
///
/// Returns `None` when the text contains U+FFFD, which marks an upstream
/// decoding failure; such text is left untouched.
pub fn normalize_cell_text(text: &str, options: &ResolveOptions) -> Option<String> {
    if text.contains('\u{FFFD}') {
        return None;
    }

    let mut current: String = text
        .nfc()
        .filter(|c| !ZERO_WIDTH_JOINERS.contains(c))
        .collect();
    if !options.devanagari_fixups {
        return Some(current);
    }

    // Every fixup either shortens the text or moves a matra rightward, so
    // this reaches a fixpoint.
    loop {
        let next: String = apply_devanagari_fixups(&current).nfc().collect();
        if next == current {
            return Some(current);
        }
        current = next;
    }
}

fn font_key(name: &str) -> String {
    let bytes = name.as_bytes();
    let unprefixed = if bytes.len() > 7
        && bytes[6] == b'+'
        && bytes[..6].iter().all(|b| b.is_ascii_uppercase())
    {
        &name[7..]
    } else {
        name
    };
    unprefixed
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// The safe family a font face name belongs to, if any.
///
/// Subset prefixes (`ABCDEF+`) and style suffixes (`-Bold`, `,Italic`,
/// `PSMT`) are ignored.
pub fn safe_font_family(font_name: &str) -> Option<&'static str> {
    let key = font_key(font_name);
    if key.is_empty() {
        return None;
    }
    SAFE_FONTS
        .iter()
        .copied()
        .find(|family| key.starts_with(&font_key(family)))
}

/// Fallback font family for a script.
pub fn fallback_font(script: Script) -> &'static str {
    match script {
        Script::Devanagari | Script::Arabic | Script::Cjk | Script::Mixed => "Arial Unicode MS",
        Script::Thai => "Tahoma",
        Script::Latin | Script::Unknown => "Calibri",
    }
}

/// Resolve one cell in place. Returns false if normalization was skipped.
pub fn resolve_cell(cell: &mut Cell, options: &ResolveOptions) -> bool {
    let normalized = match normalize_cell_text(&cell.text, options) {
        Some(text) => {
            cell.text = text;
            true
        }
        None => false,
    };
    cell.language = detect_script(&cell.text);
    cell.direction = detect_direction(&cell.text);
    cell.font_name = safe_font_family(&cell.font_name)
        .unwrap_or_else(|| fallback_font(cell.language))
        .to_string();
    normalized
}

/// Resolve script, direction and font for every non-empty cell.
///
/// Resolving an already resolved table returns it unchanged.
pub fn resolve_table(mut table: Table, options: &ResolveOptions) -> ExtractResult<Table> {
    let mut warnings = Vec::new();
    for (r, row) in table.rows.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            if cell.is_blank() {
                continue;
            }
            if !resolve_cell(cell, options) {
                warnings.push(
                    ExtractWarning::with_code(
                        ExtractWarningCode::NormalizationSkipped,
                        "cell text contains U+FFFD; kept as extracted",
                    )
                    .at(format!("row {r}, column {c}")),
                );
            }
        }
    }
    ExtractResult::with_warnings(table, warnings)
}
