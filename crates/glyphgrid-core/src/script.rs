//! Writing-system detection for cell text.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use unicode_bidi::BidiInfo;

/// Writing system detected for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Script {
    /// Latin letters, digits and ASCII punctuation.
    Latin,
    /// Devanagari (U+0900–U+097F).
    Devanagari,
    /// Arabic (U+0600–U+06FF and supplements).
    Arabic,
    /// Chinese, Japanese or Korean.
    Cjk,
    /// Thai (U+0E00–U+0E7F).
    Thai,
    /// Anything that is not purely one of the above.
    Mixed,
    /// Empty text.
    #[default]
    Unknown,
}

impl Script {
    /// Lowercase tag used in exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Script::Latin => "latin",
            Script::Devanagari => "devanagari",
            Script::Arabic => "arabic",
            Script::Cjk => "cjk",
            Script::Thai => "thai",
            Script::Mixed => "mixed",
            Script::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base direction of a cell's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum TextDirection {
    /// Left-to-right.
    #[default]
    Ltr,
    /// Right-to-left.
    Rtl,
}

/// Returns `true` for Devanagari code points.
pub fn is_devanagari(c: char) -> bool {
    matches!(c, '\u{0900}'..='\u{097F}')
}

/// Returns `true` for Arabic code points, including presentation forms.
pub fn is_arabic(c: char) -> bool {
    matches!(c,
        '\u{0600}'..='\u{06FF}'
        | '\u{0750}'..='\u{077F}' // Arabic Supplement
        | '\u{08A0}'..='\u{08FF}' // Arabic Extended-A
        | '\u{FB50}'..='\u{FDFF}' // Presentation Forms-A
        | '\u{FE70}'..='\u{FEFF}' // Presentation Forms-B
    )
}

/// Returns `true` if the character is a CJK character.
///
/// Covers CJK ideographs with extensions A and B, compatibility
/// ideographs, kana, Hangul, Bopomofo and the radical blocks.
pub fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{3040}'..='\u{309F}' // Hiragana
        | '\u{30A0}'..='\u{30FF}' // Katakana
        | '\u{AC00}'..='\u{D7AF}' // Hangul Syllables
        | '\u{1100}'..='\u{11FF}' // Hangul Jamo
        | '\u{3100}'..='\u{312F}' // Bopomofo
        | '\u{2E80}'..='\u{2EFF}'
        | '\u{2F00}'..='\u{2FDF}'
        | '\u{20000}'..='\u{2A6DF}'
    )
}

/// Returns `true` for Thai code points.
pub fn is_thai(c: char) -> bool {
    matches!(c, '\u{0E00}'..='\u{0E7F}')
}

/// Returns `true` for Khmer code points.
pub fn is_khmer(c: char) -> bool {
    matches!(c, '\u{1780}'..='\u{17FF}' | '\u{19E0}'..='\u{19FF}')
}

/// Returns `true` if the text contains a script written without spaces
/// between words (Thai or Khmer).
pub fn is_spaceless_script(text: &str) -> bool {
    text.chars().any(|c| is_thai(c) || is_khmer(c))
}

static LATIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\x20-\x7E\t\n\r\u{00A0}-\u{024F}]+$").expect("valid latin regex")
});

/// Detect the writing system of `text`.
///
/// Checks run in priority order: any Devanagari, Arabic, CJK or Thai
/// character decides the script. Otherwise text made only of ASCII and
/// Latin-1/Latin Extended characters is Latin, and anything else is
/// Mixed. Empty text is Unknown.
pub fn detect_script(text: &str) -> Script {
    if text.is_empty() {
        Script::Unknown
    } else if text.chars().any(is_devanagari) {
        Script::Devanagari
    } else if text.chars().any(is_arabic) {
        Script::Arabic
    } else if text.chars().any(is_cjk) {
        Script::Cjk
    } else if text.chars().any(is_thai) {
        Script::Thai
    } else if LATIN.is_match(text) {
        Script::Latin
    } else {
        Script::Mixed
    }
}

/// Base paragraph direction of `text` per the Unicode bidi algorithm.
pub fn detect_direction(text: &str) -> TextDirection {
    let info = BidiInfo::new(text, None);
    match info.paragraphs.first() {
        Some(paragraph) if paragraph.level.is_rtl() => TextDirection::Rtl,
        _ => TextDirection::Ltr,
    }
}
