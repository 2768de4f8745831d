//! Sliding-window n-grams over a token stream, checksummed with CRC-32 for
//! cheap cross-reference during candidate selection.

use std::collections::HashMap;

use crate::license_detection::token::Token;

/// A contiguous window of `n` token values (half-open `[start, end)` over
/// token indices, in both the sliding and degenerate-short-license case —
/// see `NGram::end` below for why that matters).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NGram {
    /// Space-joined token values with a trailing space, e.g. `"the mit license "`.
    pub text: String,
    /// CRC-32/IEEE checksum of `text`'s UTF-8 bytes.
    pub checksum: u32,
    /// First token index covered by this window.
    pub start: usize,
    /// One past the last token index covered (`end - start == n`, except in
    /// the degenerate short-license case where `end == tokens.len()`).
    pub end: usize,
}

/// CRC-32 (IEEE 802.3 polynomial, reflected, 0xEDB88320) of a byte slice.
///
/// This exact checksum is required for cross-corpus identity of indices: a
/// corpus rebuilt elsewhere from the same reference texts must produce
/// identical checksums.
pub fn crc32(bytes: &[u8]) -> u32 {
    crc32fast::hash(bytes)
}

fn ngram_text(tokens: &[Token], range: std::ops::Range<usize>) -> String {
    let mut text = String::new();
    for token in &tokens[range] {
        text.push_str(&token.value);
        text.push(' ');
    }
    text
}

/// Build the sliding-window n-grams for `tokens` at width `n`.
///
/// If `tokens.len() < n`, a single degenerate n-gram covering the whole
/// stream is produced instead (§4.3's short-license case): its `end` equals
/// `tokens.len()`, kept half-open like the sliding case for a uniform
/// convention.
pub fn build_ngrams(tokens: &[Token], n: usize) -> Vec<NGram> {
    if tokens.is_empty() {
        return Vec::new();
    }
    if tokens.len() < n {
        let text = ngram_text(tokens, 0..tokens.len());
        let checksum = crc32(text.as_bytes());
        return vec![NGram {
            text,
            checksum,
            start: 0,
            end: tokens.len(),
        }];
    }

    let windows = tokens.len() - n + 1;
    let mut ngrams = Vec::with_capacity(windows);
    for start in 0..windows {
        let end = start + n;
        let text = ngram_text(tokens, start..end);
        let checksum = crc32(text.as_bytes());
        ngrams.push(NGram {
            text,
            checksum,
            start,
            end,
        });
    }
    ngrams
}

/// Index n-grams by checksum. Collisions (real or CRC-32-birthday) coexist
/// in insertion order; that order is observable only for diagnostics, never
/// for correctness.
pub fn build_checksum_map(ngrams: &[NGram]) -> HashMap<u32, Vec<usize>> {
    let mut map: HashMap<u32, Vec<usize>> = HashMap::new();
    for (i, ngram) in ngrams.iter().enumerate() {
        map.entry(ngram.checksum).or_default().push(i);
    }
    map
}

/// Choose the n-gram width for a target confidence threshold.
///
/// `n = max(1, floor((1 - c) * base_window))`. At `c = 1.0`, `n = 1` (every
/// token participates in candidate selection). Larger `n` is cheaper to
/// index and scan but less tolerant of edits between candidate selection
/// anchors.
pub fn compute_granularity(threshold: f32, base_window: usize) -> usize {
    let scaled = (1.0 - threshold) * base_window as f32;
    (scaled.floor() as isize).max(1) as usize
}

/// The tuned default for `base_window`. Kept near the tens rather than the
/// thirties: candidate selection only records an anchor for a window that
/// is byte-identical end to end, so a large window at low thresholds starves
/// a heavily edited candidate of any anchor at all, dropping it before
/// scoring ever sees it. Ten tokens is small enough that an edited copy
/// still has an unbroken run that long somewhere in its body.
pub const DEFAULT_BASE_WINDOW: usize = 10;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::license_detection::token::tokenize;

    #[test]
    fn sliding_window_count_matches_formula() {
        let tokens = tokenize("the quick brown fox jumps over the lazy dog");
        let ngrams = build_ngrams(&tokens, 3);
        assert_eq!(ngrams.len(), tokens.len() - 3 + 1);
        for ng in &ngrams {
            assert_eq!(ng.end - ng.start, 3);
        }
    }

    #[test]
    fn degenerate_case_for_short_token_streams() {
        let tokens = tokenize("mit license");
        let ngrams = build_ngrams(&tokens, 10);
        assert_eq!(ngrams.len(), 1);
        assert_eq!(ngrams[0].start, 0);
        assert_eq!(ngrams[0].end, tokens.len());
    }

    #[test]
    fn empty_tokens_yield_no_ngrams() {
        assert!(build_ngrams(&[], 3).is_empty());
    }

    #[test]
    fn checksum_map_groups_collisions() {
        let tokens = tokenize("a b a b a b");
        let ngrams = build_ngrams(&tokens, 2);
        let map = build_checksum_map(&ngrams);
        for positions in map.values() {
            assert!(!positions.is_empty());
        }
        let total: usize = map.values().map(|v| v.len()).sum();
        assert_eq!(total, ngrams.len());
    }

    #[test]
    fn granularity_is_one_at_full_confidence() {
        assert_eq!(compute_granularity(1.0, DEFAULT_BASE_WINDOW), 1);
    }

    #[test]
    fn granularity_grows_as_threshold_drops() {
        let n_strict = compute_granularity(0.95, DEFAULT_BASE_WINDOW);
        let n_loose = compute_granularity(0.5, DEFAULT_BASE_WINDOW);
        assert!(n_loose > n_strict);
    }

    #[test]
    fn crc32_is_stable() {
        assert_eq!(crc32(b"hello world "), crc32(b"hello world "));
        assert_ne!(crc32(b"hello world "), crc32(b"hello there "));
    }
}
