//! Aligner / Scorer: for each shortlisted candidate, locate the tightest
//! aligned sub-range of the unknown text, diff it against the reference,
//! and derive a confidence score.

use crate::license_detection::candidate::Candidate;
use crate::license_detection::diff::{DiffEntry, DiffKind, diff_tokens};
use crate::license_detection::license_match::LicenseMatch;
use crate::license_detection::token::Token;

/// Locate the region, diff it, trim, score, and emit a `LicenseMatch` for
/// one candidate, or `None` if its confidence falls below `threshold`.
pub fn score_candidate(unknown: &[Token], candidate: &Candidate<'_>, threshold: f32) -> Option<LicenseMatch> {
    let (unknown_range, reference_range) = locate_region(unknown, candidate);

    let reference_slice = &candidate.indexed.license.tokens[reference_range];
    let unknown_slice = &unknown[unknown_range.clone()];

    let diffs = diff_tokens(reference_slice, unknown_slice);
    let diff_range = trim_to_equal_bounds(&diffs)?;

    let (equal, edits) = count_equal_and_edits(&diffs[diff_range.clone()]);
    let confidence = if equal + edits > 0 {
        equal as f32 / (equal + edits) as f32
    } else {
        0.0
    };
    if confidence < threshold {
        return None;
    }

    let matched_unknown_indices: Vec<usize> = diffs[diff_range.clone()]
        .iter()
        .filter_map(|d| d.unknown_index)
        .collect();
    let (first_local, last_local) = match (matched_unknown_indices.first(), matched_unknown_indices.last()) {
        (Some(&f), Some(&l)) => (f, l),
        _ => return None,
    };

    let tokens: Vec<Token> = unknown_slice[first_local..=last_local].to_vec();
    let token_range = (unknown_range.start + first_local)..(unknown_range.start + last_local + 1);
    let start = tokens.first().map(|t| t.span.start).unwrap_or(0);
    let end = tokens.last().map(|t| t.span.end).unwrap_or(0);

    Some(LicenseMatch {
        identifier: candidate.indexed.license.identifier.clone(),
        tokens,
        confidence,
        diffs,
        diff_range,
        tokens_claimed: token_range.end - token_range.start,
        token_range,
        start,
        end,
    })
}

/// Derive the initial `(unknown token range, reference token range)` from a
/// candidate's anchors, expanding conservatively by up to one reference
/// length in the unknown stream to catch prefix/suffix drift.
fn locate_region(unknown: &[Token], candidate: &Candidate<'_>) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
    let n = candidate.indexed.granularity.max(1);
    let reference_len = candidate.indexed.license.tokens.len();

    let (mut u_min, mut u_max, mut r_min, mut r_max) = (usize::MAX, 0usize, usize::MAX, 0usize);
    for &(pos_u, pos_l) in &candidate.anchors {
        let ngram_u_end = (pos_u + n).min(unknown.len());
        let ngram_l_end = candidate.indexed.ngrams.get(pos_l).map(|ng| ng.end).unwrap_or((pos_l + n).min(reference_len));
        let ngram_l_start = candidate.indexed.ngrams.get(pos_l).map(|ng| ng.start).unwrap_or(pos_l);

        u_min = u_min.min(pos_u);
        u_max = u_max.max(ngram_u_end);
        r_min = r_min.min(ngram_l_start);
        r_max = r_max.max(ngram_l_end);
    }

    if candidate.anchors.is_empty() {
        return (0..unknown.len(), 0..reference_len);
    }

    let expand = reference_len;
    let unknown_start = u_min.saturating_sub(expand);
    let unknown_end = (u_max + expand).min(unknown.len());

    (unknown_start..unknown_end, r_min..r_max)
}

/// Walk inward from both ends, dropping leading/trailing runs of non-equal
/// entries. Returns the `[firstEqual, lastEqual]` inclusive range converted
/// to a half-open `Range`, or `None` if there is no equal entry at all.
fn trim_to_equal_bounds(diffs: &[DiffEntry]) -> Option<std::ops::Range<usize>> {
    let first = diffs.iter().position(|d| d.kind == DiffKind::Equal)?;
    let last = diffs.iter().rposition(|d| d.kind == DiffKind::Equal)?;
    Some(first..(last + 1))
}

fn count_equal_and_edits(diffs: &[DiffEntry]) -> (usize, usize) {
    let mut equal = 0;
    let mut edits = 0;
    for d in diffs {
        match d.kind {
            DiffKind::Equal => equal += 1,
            DiffKind::Insert | DiffKind::Delete => edits += 1,
        }
    }
    (equal, edits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::license_detection::candidate::select_candidates_default;
    use crate::license_detection::reference::License;
    use crate::license_detection::token::tokenize;

    fn mit_reference() -> License {
        License::parse(
            "MIT",
            "Permission is hereby granted, free of charge, to any person obtaining a copy \
             of this software and associated documentation files, to deal in the Software \
             without restriction, including the rights to use, copy, modify, merge, publish, \
             distribute, sublicense, and sell copies of the Software.",
        )
    }

    #[test]
    fn exact_text_scores_confidence_one() {
        let license = mit_reference();
        let licenses = vec![license.clone()];
        let unknown = tokenize(&license.content);
        let candidates = select_candidates_default(&unknown, &licenses, 0.9);
        let m = score_candidate(&unknown, &candidates[0], 0.9).unwrap();
        assert_eq!(m.identifier, "MIT");
        assert!((m.confidence - 1.0).abs() < 1e-6);
        assert_eq!(m.token_range, 0..unknown.len());
    }

    #[test]
    fn leading_copyright_noise_is_trimmed_out_of_the_match() {
        let license = mit_reference();
        let licenses = vec![license.clone()];
        let input = format!("Copyright 2021 Example Corp.\n\n{}", license.content);
        let unknown = tokenize(&input);
        let candidates = select_candidates_default(&unknown, &licenses, 0.9);
        let m = score_candidate(&unknown, &candidates[0], 0.9).unwrap();
        assert!(m.confidence > 0.9);
        assert!(m.start > 0);
    }

    #[test]
    fn heavily_altered_text_falls_below_threshold() {
        let license = mit_reference();
        let licenses = vec![license.clone()];
        let unknown = tokenize("completely unrelated lorem ipsum text about cooking recipes and gardening tips");
        let candidates = select_candidates_default(&unknown, &licenses, 0.5);
        let scored: Vec<_> = candidates
            .iter()
            .filter_map(|c| score_candidate(&unknown, c, 0.95))
            .collect();
        assert!(scored.is_empty());
    }
}
