//! Partition a flat file listing into groups of related filenames.
//!
//! Files are compared by the longest common substring of their clean keys
//! and every input filename ends up in exactly one group. Each group also
//! gets a filesystem-safe folder label derived from its members.

use std::path::Path;

use crate::normalize::{GROUPING_CUT_CHARS, clean_key};
use crate::path_to_file_stem_string;
use crate::similarity::{DEFAULT_MIN_COMMON_LEN, longest_common_substring};

/// Maximum length of a derived folder label, in chars.
const MAX_LABEL_LEN: usize = 50;

/// Characters that are not allowed in folder names.
const UNSAFE_LABEL_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Last-resort label when nothing usable can be derived from a group.
const FALLBACK_LABEL: &str = "Organized_Files";

/// Tuning knobs for grouping and folder naming.
///
/// The defaults come from the empirically tuned values used in practice:
/// the folder-label minimum is deliberately shorter than the grouping
/// minimum so that a label can still be derived for loosely related files.
#[derive(Debug, Clone, Copy)]
pub struct GroupingOptions {
    /// Minimum common substring length for two files to share a group.
    pub min_common_len: usize,
    /// Fraction of either clean key the common substring must exceed.
    pub overlap_ratio: f64,
    /// Minimum accepted length for a derived folder label.
    pub min_label_len: usize,
}

impl Default for GroupingOptions {
    fn default() -> Self {
        Self {
            min_common_len: DEFAULT_MIN_COMMON_LEN,
            overlap_ratio: 0.3,
            min_label_len: 3,
        }
    }
}

/// Partition `filenames` into groups of related files.
///
/// Filenames are processed in `(clean key, original name)` order so that
/// group membership does not depend on directory listing order. Each
/// not-yet-assigned file seeds a group and pulls in every later unassigned
/// file whose clean key shares a significant common substring with it:
/// at least `min_common_len` chars long and longer than `overlap_ratio`
/// of either key. Files with an empty clean key become singletons.
///
/// Every input filename appears in exactly one returned group.
#[must_use]
pub fn group_files(filenames: &[String], options: &GroupingOptions) -> Vec<Vec<String>> {
    let mut entries: Vec<(String, &String)> = filenames
        .iter()
        .map(|name| (clean_key(name, GROUPING_CUT_CHARS), name))
        .collect();
    entries.sort_by(|a, b| (&a.0, a.1).cmp(&(&b.0, b.1)));

    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut assigned = vec![false; entries.len()];

    for first in 0..entries.len() {
        if assigned[first] {
            continue;
        }
        let (key1, name1) = &entries[first];
        let mut group = vec![(*name1).clone()];
        assigned[first] = true;

        // An empty clean key cannot match anything: forced singleton.
        if !key1.is_empty() {
            let key1_len = key1.chars().count();
            for second in first + 1..entries.len() {
                if assigned[second] {
                    continue;
                }
                let (key2, name2) = &entries[second];
                if key2.is_empty() {
                    continue;
                }
                let common = longest_common_substring(key1, key2, options.min_common_len);
                if common.is_empty() {
                    continue;
                }
                let common_len = common.chars().count() as f64;
                let key2_len = key2.chars().count();
                if common_len > options.overlap_ratio * key1_len as f64
                    || common_len > options.overlap_ratio * key2_len as f64
                {
                    group.push((*name2).clone());
                    assigned[second] = true;
                }
            }
        }
        groups.push(group);
    }
    groups
}

/// Derive a folder label for a group of filenames.
///
/// Tries, in order: the single non-empty clean key, the common prefix of
/// all clean keys, a sequential longest-common-substring fold over them,
/// the first member's clean key, and finally the first member's filename
/// stem. The chosen label is sanitized for filesystem use and truncated
/// to [`MAX_LABEL_LEN`] chars; a generic placeholder is the last resort.
#[must_use]
pub fn label_for(group: &[String], options: &GroupingOptions) -> String {
    let Some(first_name) = group.first() else {
        return FALLBACK_LABEL.to_string();
    };

    let keys: Vec<String> = group
        .iter()
        .map(|name| clean_key(name, GROUPING_CUT_CHARS))
        .filter(|key| !key.is_empty())
        .collect();

    if keys.is_empty() {
        return stem_label(first_name);
    }
    if keys.len() == 1 {
        let label = sanitize_label(&keys[0]);
        return if label.is_empty() { stem_label(first_name) } else { label };
    }

    let prefix = common_prefix(&keys);
    let prefix = prefix.trim_matches([' ', '-', '_']);
    if prefix.chars().count() >= options.min_label_len {
        return sanitize_label(prefix);
    }

    let mut folded = keys[0].clone();
    for key in &keys[1..] {
        folded = longest_common_substring(&folded, key, options.min_label_len);
        if folded.is_empty() {
            break;
        }
    }
    let folded = folded.trim_matches([' ', '-', '_']);
    if folded.chars().count() >= options.min_label_len {
        return sanitize_label(folded);
    }

    let label = sanitize_label(&keys[0]);
    if label.is_empty() { stem_label(first_name) } else { label }
}

/// Label from the sanitized stem of an original filename.
fn stem_label(filename: &str) -> String {
    let label = sanitize_label(&path_to_file_stem_string(Path::new(filename)));
    if label.is_empty() { FALLBACK_LABEL.to_string() } else { label }
}

/// Replace filesystem-unsafe characters, truncate and trim.
fn sanitize_label(label: &str) -> String {
    let safe: String = label
        .chars()
        .map(|c| if UNSAFE_LABEL_CHARS.contains(&c) { '_' } else { c })
        .take(MAX_LABEL_LEN)
        .collect();
    safe.trim().to_string()
}

/// Longest common prefix of all strings, char-wise.
fn common_prefix(strings: &[String]) -> String {
    let Some(first) = strings.first() else {
        return String::new();
    };
    let mut prefix = first.as_str();
    for other in &strings[1..] {
        let mut end = 0;
        for (a, b) in prefix.chars().zip(other.chars()) {
            if a == b {
                end += a.len_utf8();
            } else {
                break;
            }
        }
        prefix = &prefix[..end];
        if prefix.is_empty() {
            break;
        }
    }
    prefix.to_string()
}
