//! Right-to-left text preparation.
//!
//! Arabic-script text arrives in logical order. Rendering it into a PDF
//! needs contextual letter joining followed by visual reordering; both are
//! delegated — joining to `ar_reshaper`, reordering to `unicode_bidi`.

use ar_reshaper::ArabicReshaper;
use once_cell::sync::Lazy;
use unicode_bidi::BidiInfo;

static RESHAPER: Lazy<ArabicReshaper> = Lazy::new(ArabicReshaper::default);

/// Prepare a logical-order string for visual rendering.
///
/// Text without right-to-left content passes through unchanged.
pub(crate) fn reshape(text: &str) -> String {
    let joined = RESHAPER.reshape(text);
    let bidi = BidiInfo::new(&joined, None);
    if !bidi.has_rtl() {
        return joined;
    }
    let Some(paragraph) = bidi.paragraphs.first() else {
        return joined;
    };
    bidi.reorder_line(paragraph, paragraph.range.clone())
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_text_is_unchanged() {
        assert_eq!(reshape("John Doe"), "John Doe");
        assert_eq!(reshape("42"), "42");
        assert_eq!(reshape(""), "");
    }

    #[test]
    fn test_arabic_text_becomes_presentation_forms() {
        let shaped = reshape("سلام");
        assert!(!shaped.is_empty());
        assert!(
            shaped
                .chars()
                .all(|c| ('\u{FB50}'..='\u{FEFF}').contains(&c))
        );
    }

    #[test]
    fn test_spaces_survive_reshaping() {
        let shaped = reshape("نام خانوادگی");
        assert_eq!(shaped.matches(' ').count(), 1);
    }
}
