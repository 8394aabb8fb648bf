//! Warning types for the table-reconstruction pipeline.
//!
//! No stage in this crate fails: malformed input is dropped, absence of a
//! table is `None`, and anything worth reporting travels as an
//! [`ExtractWarning`] inside an [`ExtractResult`].

use std::fmt;

/// What kind of problem a pipeline stage ran into.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "detail")
)]
pub enum ExtractWarningCode {
    /// A text-layer item had a malformed transform and was skipped.
    MalformedItem,
    /// A glyph was placed in a column outside the normal tolerance.
    DegradedPlacement,
    /// A glyph was too far from every column boundary and was dropped.
    DroppedGlyph,
    /// Cell text looked corrupted, so Unicode normalization was skipped.
    NormalizationSkipped,
    /// The text layer for a page could not be obtained.
    PageFailed,
    /// Free-form warning from a caller-provided stage.
    Other(String),
}

impl ExtractWarningCode {
    /// Stable upper-snake-case tag, used in logs and CLI output.
    pub fn as_str(&self) -> &str {
        match self {
            ExtractWarningCode::MalformedItem => "MALFORMED_ITEM",
            ExtractWarningCode::DegradedPlacement => "DEGRADED_PLACEMENT",
            ExtractWarningCode::DroppedGlyph => "DROPPED_GLYPH",
            ExtractWarningCode::NormalizationSkipped => "NORMALIZATION_SKIPPED",
            ExtractWarningCode::PageFailed => "PAGE_FAILED",
            ExtractWarningCode::Other(_) => "OTHER",
        }
    }
}

impl fmt::Display for ExtractWarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal issue encountered while reconstructing a table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractWarning {
    /// Problem category.
    pub code: ExtractWarningCode,
    /// What happened, for humans.
    pub description: String,
    /// Page number where the warning occurred (0-indexed), if known.
    pub page: Option<usize>,
    /// Element context (e.g., "row 3, column 1").
    pub element: Option<String>,
}

impl ExtractWarning {
    /// Warning with an explicit code.
    pub fn with_code(code: ExtractWarningCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            page: None,
            element: None,
        }
    }

    /// Create an uncategorized warning.
    pub fn new(description: impl Into<String>) -> Self {
        let desc = description.into();
        Self::with_code(ExtractWarningCode::Other(desc.clone()), desc)
    }

    /// Attach a page index (builder pattern).
    pub fn on_page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    /// Attach element context (builder pattern).
    pub fn at(mut self, element: impl Into<String>) -> Self {
        self.element = Some(element.into());
        self
    }
}

impl fmt::Display for ExtractWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)?;
        if let Some(page) = self.page {
            write!(f, " (page {})", page + 1)?;
        }
        if let Some(ref element) = self.element {
            write!(f, " [{element}]")?;
        }
        Ok(())
    }
}

/// A stage's output together with the warnings it raised.
#[derive(Debug, Clone)]
pub struct ExtractResult<T> {
    /// Stage output.
    pub value: T,
    /// Warnings, in the order raised.
    pub warnings: Vec<ExtractWarning>,
}

impl<T> ExtractResult<T> {
    /// Wrap a value that raised no warnings.
    pub fn ok(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Wrap a value together with its warnings.
    pub fn with_warnings(value: T, warnings: Vec<ExtractWarning>) -> Self {
        Self { value, warnings }
    }

    /// Returns true if no stage raised a warning.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Apply `f` to the value, keeping the warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ExtractResult<U> {
        ExtractResult {
            value: f(self.value),
            warnings: self.warnings,
        }
    }

    /// Move this result's warnings into `sink` and return the bare value.
    pub fn drain_into(self, sink: &mut Vec<ExtractWarning>) -> T {
        sink.extend(self.warnings);
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_code_tags() {
        assert_eq!(ExtractWarningCode::MalformedItem.as_str(), "MALFORMED_ITEM");
        assert_eq!(
            ExtractWarningCode::DegradedPlacement.as_str(),
            "DEGRADED_PLACEMENT"
        );
        assert_eq!(ExtractWarningCode::DroppedGlyph.as_str(), "DROPPED_GLYPH");
        assert_eq!(
            ExtractWarningCode::NormalizationSkipped.as_str(),
            "NORMALIZATION_SKIPPED"
        );
        assert_eq!(ExtractWarningCode::PageFailed.as_str(), "PAGE_FAILED");
        assert_eq!(ExtractWarningCode::Other("x".into()).as_str(), "OTHER");
    }

    #[test]
    fn warning_new_defaults_to_other() {
        let w = ExtractWarning::new("something odd");
        assert!(matches!(w.code, ExtractWarningCode::Other(_)));
        assert_eq!(w.page, None);
        assert_eq!(w.to_string(), "[OTHER] something odd");
    }

    #[test]
    fn warning_display_is_one_indexed_with_context() {
        let w = ExtractWarning::with_code(ExtractWarningCode::DroppedGlyph, "glyph 'x' dropped")
            .on_page(2)
            .at("row 4");
        assert_eq!(
            w.to_string(),
            "[DROPPED_GLYPH] glyph 'x' dropped (page 3) [row 4]"
        );
    }

    #[test]
    fn extract_result_ok_is_clean() {
        let result = ExtractResult::ok(7);
        assert!(result.is_clean());
        assert_eq!(result.value, 7);
    }

    #[test]
    fn extract_result_map_preserves_warnings() {
        let result = ExtractResult::with_warnings(10, vec![ExtractWarning::new("w")]);
        let mapped = result.map(|v| v * 3);
        assert_eq!(mapped.value, 30);
        assert_eq!(mapped.warnings.len(), 1);
    }

    #[test]
    fn drain_into_moves_warnings() {
        let mut sink = vec![ExtractWarning::new("first")];
        let value = ExtractResult::with_warnings("v", vec![ExtractWarning::new("second")])
            .drain_into(&mut sink);
        assert_eq!(value, "v");
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[1].description, "second");
    }
}
