//! Filename normalization for substring-based grouping.
//!
//! A clean key is the comparable "title" part of a filename: bracketed
//! author tags, the extension, and everything from the first digit or
//! marker symbol onward are stripped before comparison.

use std::path::Path;

use unicode_normalization::UnicodeNormalization;

use crate::path_to_file_stem_string;

/// Characters that end the comparable part of a filename:
/// digits, brackets and symbols that tend to mark the end of a
/// document title.
pub const GROUPING_CUT_CHARS: &str = "0123456789[]()@#%&";

/// Derive the clean comparison key for a filename.
///
/// Steps, in order:
/// 1. Drop a leading `[author]` tag (an unmatched `[` is left alone).
/// 2. Strip the file extension.
/// 3. Normalize to Unicode NFC so composed and decomposed forms compare equal.
/// 4. Truncate at the earliest occurrence of any character in `cut_chars`.
/// 5. Trim and collapse whitespace runs to single spaces.
///
/// The result may be empty, e.g. for purely numeric filenames.
#[must_use]
pub fn clean_key(filename: &str, cut_chars: &str) -> String {
    let mut name = filename;
    if let Some(rest) = name.strip_prefix('[') {
        if let Some(end) = rest.find(']') {
            name = rest[end + 1..].trim_start();
        }
    }

    let stem = path_to_file_stem_string(Path::new(name));
    let normalized: String = stem.nfc().collect();

    let truncated = normalized
        .find(|c| cut_chars.contains(c))
        .map_or(normalized.as_str(), |pos| &normalized[..pos]);

    truncated.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod normalize_tests {
    use super::*;

    #[test]
    fn test_clean_key_strips_bracketed_author() {
        assert_eq!(clean_key("[AuthorA] Report2024.pdf", GROUPING_CUT_CHARS), "Report");
    }

    #[test]
    fn test_clean_key_unmatched_bracket_kept() {
        // No closing bracket: the leading "[" becomes the first cut character instead.
        assert_eq!(clean_key("[AuthorA Report.pdf", GROUPING_CUT_CHARS), "");
    }

    #[test]
    fn test_clean_key_strips_extension() {
        assert_eq!(clean_key("My Novel.epub", GROUPING_CUT_CHARS), "My Novel");
    }

    #[test]
    fn test_clean_key_truncates_at_first_digit() {
        assert_eq!(clean_key("History vol 2 of 3.pdf", GROUPING_CUT_CHARS), "History vol");
    }

    #[test]
    fn test_clean_key_truncates_at_parenthesis() {
        assert_eq!(clean_key("Thesis (final draft).pdf", GROUPING_CUT_CHARS), "Thesis");
    }

    #[test]
    fn test_clean_key_cut_set_is_a_parameter() {
        assert_eq!(clean_key("Notes #draft.txt", GROUPING_CUT_CHARS), "Notes");
        // A narrower cut set keeps "#" intact.
        assert_eq!(clean_key("Notes #draft.txt", "0123456789[]()@"), "Notes #draft");
    }

    #[test]
    fn test_clean_key_collapses_whitespace() {
        assert_eq!(clean_key("Deep   Learning   Basics.pdf", GROUPING_CUT_CHARS), "Deep Learning Basics");
    }

    #[test]
    fn test_clean_key_purely_numeric_is_empty() {
        assert_eq!(clean_key("123.pdf", GROUPING_CUT_CHARS), "");
        assert_eq!(clean_key("456.pdf", GROUPING_CUT_CHARS), "");
    }

    #[test]
    fn test_clean_key_nfc_normalization() {
        // "å" decomposed (a + combining ring) normalizes to the composed form.
        let decomposed = "Ga\u{30a}rd.pdf";
        assert_eq!(clean_key(decomposed, GROUPING_CUT_CHARS), "G\u{e5}rd");
    }

    #[test]
    fn test_clean_key_fixed_point_for_clean_string() {
        // A string with no extension dot, no brackets and no cut characters
        // is a fixed point of the normalization.
        let clean = "My Novel";
        assert_eq!(clean_key(clean, GROUPING_CUT_CHARS), clean);
        assert_eq!(
            clean_key(&clean_key(clean, GROUPING_CUT_CHARS), GROUPING_CUT_CHARS),
            clean
        );
    }
}
