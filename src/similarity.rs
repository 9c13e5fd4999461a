//! Longest common substring matching between cleaned filenames.

/// Default minimum match length for grouping comparisons.
pub const DEFAULT_MIN_COMMON_LEN: usize = 5;

/// Find the longest contiguous run of characters common to both strings.
///
/// Uses a rolling-array dynamic programming scan: O(|a|·|b|) time and
/// O(|b|) space, counted in chars rather than bytes. The scan stops early
/// once the best match already spans the whole shorter string, since no
/// longer match can exist.
///
/// Returns the matched substring only when its length is at least
/// `min_length` chars, otherwise an empty string. Tie-break between
/// equal-length matches: the match ending earliest in `a` wins, which is
/// the first one found in a top-to-bottom scan of `a`. Swapping the
/// arguments can therefore select a different tied match; only the match
/// length is symmetric, and the content too when the longest match is
/// unique.
#[must_use]
pub fn longest_common_substring(a: &str, b: &str, min_length: usize) -> String {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    if a_chars.is_empty() || b_chars.is_empty() {
        return String::new();
    }

    let max_possible = a_chars.len().min(b_chars.len());
    let mut prev = vec![0usize; b_chars.len() + 1];
    let mut best_len = 0usize;
    let mut best_end = 0usize;

    for (i, &ca) in a_chars.iter().enumerate() {
        let mut current = vec![0usize; b_chars.len() + 1];
        for (j, &cb) in b_chars.iter().enumerate() {
            if ca == cb {
                let run = prev[j] + 1;
                current[j + 1] = run;
                if run > best_len {
                    best_len = run;
                    best_end = i + 1;
                }
            }
        }
        if best_len == max_possible {
            break;
        }
        prev = current;
    }

    if best_len >= min_length {
        a_chars[best_end - best_len..best_end].iter().collect()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod similarity_tests {
    use super::*;

    #[test]
    fn test_common_substring_identical() {
        assert_eq!(longest_common_substring("abcde", "abcde", 5), "abcde");
    }

    #[test]
    fn test_common_substring_below_threshold() {
        // Longest common run "abcd" has length 4 < 5.
        assert_eq!(longest_common_substring("abcde", "abcdx", 5), "");
    }

    #[test]
    fn test_common_substring_in_middle() {
        assert_eq!(
            longest_common_substring("xx Linear Algebra yy", "zz Linear Algebra", 5),
            " Linear Algebra"
        );
    }

    #[test]
    fn test_common_substring_contiguous_not_subsequence() {
        // "ace" is a common subsequence but not a substring.
        assert_eq!(longest_common_substring("abcdef", "axcxex", 2), "");
    }

    #[test]
    fn test_common_substring_symmetry() {
        let a = "Deep Learning Basics";
        let b = "Advanced Deep Learning";
        let forward = longest_common_substring(a, b, 5);
        let backward = longest_common_substring(b, a, 5);
        assert_eq!(forward, backward);
        assert_eq!(forward, "Deep Learning");
    }

    #[test]
    fn test_common_substring_empty_inputs() {
        assert_eq!(longest_common_substring("", "abcde", 1), "");
        assert_eq!(longest_common_substring("abcde", "", 1), "");
    }

    #[test]
    fn test_common_substring_min_length_one() {
        assert_eq!(longest_common_substring("xay", "zaw", 1), "a");
    }

    #[test]
    fn test_common_substring_multibyte_chars() {
        assert_eq!(longest_common_substring("日本語の本", "日本語の雑誌", 3), "日本語の");
    }

    #[test]
    fn test_common_substring_tie_break_earliest_in_a() {
        // Both "abz" and "cdy" are length-3 matches; the one ending
        // earliest in the first argument wins.
        assert_eq!(longest_common_substring("abz_cdy", "cdy_abz", 3), "abz");
    }

    #[test]
    fn test_common_substring_tie_content_depends_on_argument_order() {
        // On equal-length ties only the match length is symmetric:
        // each direction picks the match ending earliest in its first
        // argument, so the returned content differs.
        let forward = longest_common_substring("abz_cdy", "cdy_abz", 3);
        let backward = longest_common_substring("cdy_abz", "abz_cdy", 3);
        assert_eq!(forward, "abz");
        assert_eq!(backward, "cdy");
        assert_eq!(forward.chars().count(), backward.chars().count());
    }
}
