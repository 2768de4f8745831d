//! Arbiter: merges same-identifier duplicates, then greedily removes
//! cross-identifier overlaps so the final result is an ordered,
//! non-overlapping set of matches.

use crate::license_detection::license_match::LicenseMatch;

/// The "more than" fraction used to decide whether two same-identifier
/// matches are really the same occurrence, e.g. the AGPL-3.0
/// with/without optional-tail pair.
pub const DUPLICATE_OVERLAP_EPSILON: f32 = 0.5;

/// Arbitrate a flat list of above-threshold matches into the final,
/// non-overlapping, `token_range.start`-ordered result.
pub fn arbitrate(matches: Vec<LicenseMatch>) -> Vec<LicenseMatch> {
    let deduped = merge_same_identifier_duplicates(matches, DUPLICATE_OVERLAP_EPSILON);
    let sorted = sort_by_confidence_then_length(deduped);
    let accepted = remove_cross_identifier_overlaps(sorted);
    sort_by_start(accepted)
}

/// Step 1: for matches sharing an `identifier` whose token ranges overlap by
/// more than `fraction`, keep only the one with the greater `tokens_claimed`.
fn merge_same_identifier_duplicates(matches: Vec<LicenseMatch>, fraction: f32) -> Vec<LicenseMatch> {
    let mut survivors: Vec<LicenseMatch> = Vec::with_capacity(matches.len());

    'next: for candidate in matches {
        for existing in survivors.iter_mut() {
            if existing.identifier != candidate.identifier {
                continue;
            }
            if !existing.overlaps_by_more_than(&candidate, fraction) {
                continue;
            }
            if candidate.tokens_claimed > existing.tokens_claimed {
                *existing = candidate;
            }
            continue 'next;
        }
        survivors.push(candidate);
    }

    survivors
}

/// Step 2: sort by `confidence` descending, then by `tokens_claimed`
/// descending.
fn sort_by_confidence_then_length(mut matches: Vec<LicenseMatch>) -> Vec<LicenseMatch> {
    matches.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.tokens_claimed.cmp(&a.tokens_claimed))
    });
    matches
}

/// Step 3: walk the sorted list, accepting a match iff its `token_range`
/// doesn't overlap any already-accepted match.
fn remove_cross_identifier_overlaps(matches: Vec<LicenseMatch>) -> Vec<LicenseMatch> {
    let mut accepted: Vec<LicenseMatch> = Vec::with_capacity(matches.len());
    for candidate in matches {
        if accepted.iter().any(|a| a.overlaps(&candidate)) {
            continue;
        }
        accepted.push(candidate);
    }
    accepted
}

/// Step 4: re-sort accepted matches by `token_range.start` ascending.
fn sort_by_start(mut matches: Vec<LicenseMatch>) -> Vec<LicenseMatch> {
    matches.sort_by_key(|m| m.token_range.start);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::license_detection::diff::DiffEntry;

    fn make_match(identifier: &str, confidence: f32, range: std::ops::Range<usize>) -> LicenseMatch {
        let tokens_claimed = range.end - range.start;
        LicenseMatch {
            identifier: identifier.to_string(),
            tokens: Vec::new(),
            confidence,
            diffs: Vec::<DiffEntry>::new(),
            diff_range: 0..0,
            tokens_claimed,
            token_range: range,
            start: 0,
            end: 0,
        }
    }

    #[test]
    fn merges_same_identifier_overlapping_matches_keeping_the_longer() {
        let matches = vec![
            make_match("AGPL-3.0", 0.99, 0..100),
            make_match("AGPL-3.0", 0.99, 0..140),
        ];
        let result = arbitrate(matches);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].tokens_claimed, 140);
    }

    #[test]
    fn does_not_merge_same_identifier_matches_with_little_overlap() {
        let matches = vec![
            make_match("MIT", 0.99, 0..50),
            make_match("MIT", 0.99, 200..260),
        ];
        let result = arbitrate(matches);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn removes_overlap_across_different_identifiers_keeping_higher_confidence() {
        let matches = vec![make_match("MIT", 0.99, 0..50), make_match("BSD-3-Clause", 0.6, 10..60)];
        let result = arbitrate(matches);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].identifier, "MIT");
    }

    #[test]
    fn keeps_non_overlapping_matches_from_different_identifiers() {
        let matches = vec![make_match("MIT", 0.99, 0..50), make_match("BSD-3-Clause", 0.95, 60..120)];
        let result = arbitrate(matches);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn output_is_sorted_by_start_ascending() {
        let matches = vec![make_match("BSD-3-Clause", 0.95, 60..120), make_match("MIT", 0.99, 0..50)];
        let result = arbitrate(matches);
        assert_eq!(result[0].identifier, "MIT");
        assert_eq!(result[1].identifier, "BSD-3-Clause");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(arbitrate(Vec::new()).is_empty());
    }
}
