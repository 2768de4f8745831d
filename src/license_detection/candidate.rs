//! Candidate selection: rank the whole corpus by n-gram checksum overlap
//! and return a shortlist cheap enough to diff in full.
//!
//! This is the only phase that sweeps the entire corpus; everything
//! downstream operates per candidate.

use crate::license_detection::index::IndexedLicense;
use crate::license_detection::ngram::{DEFAULT_BASE_WINDOW, build_ngrams, compute_granularity};
use crate::license_detection::reference::License;
use crate::license_detection::token::Token;

/// The coarse prefilter constant `k`: a reference is retained if its
/// normalised anchor score is at least `threshold * k`.
///
/// Tuned low rather than close to 1: a heavily edited candidate earns an
/// anchor only from whatever unbroken run of unedited tokens survives the
/// editing, so its anchor count is a small fraction of the reference's full
/// token count even when the candidate is a genuine match. A prefilter
/// constant near 1 would demand near-exact overlap just to reach scoring,
/// defeating the point of a tolerant low threshold; a small `k` just means
/// more candidates reach the real, diff-based scorer, which is the stage
/// that actually decides confidence.
pub const DEFAULT_PREFILTER_K: f32 = 0.1;

/// One shortlisted reference and the anchor pairs that earned it a place.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub indexed: IndexedLicense<'a>,
    /// `(position in unknown n-grams, position in reference n-grams)` pairs
    /// where checksums matched.
    pub anchors: Vec<(usize, usize)>,
    /// Anchor count normalised by the reference's token count.
    pub score: f32,
}

/// Rank `licenses` against the unknown token stream `unknown`, returning an
/// ordered shortlist (highest score first, ties broken by identifier for
/// determinism).
pub fn select_candidates<'a>(
    unknown: &[Token],
    licenses: &'a [License],
    threshold: f32,
    base_window: usize,
    prefilter_k: f32,
) -> Vec<Candidate<'a>> {
    let n_u = compute_granularity(threshold, base_window);
    let unknown_ngrams = build_ngrams(unknown, n_u);

    let mut candidates: Vec<Candidate<'a>> = Vec::new();
    for license in licenses {
        if license.tokens.is_empty() {
            continue;
        }
        let indexed = IndexedLicense::build(license, n_u);

        let mut anchors = Vec::new();
        for (pos_in_u, ngram) in unknown_ngrams.iter().enumerate() {
            if let Some(positions) = indexed.checksum_map.get(&ngram.checksum) {
                for &pos_in_l in positions {
                    anchors.push((pos_in_u, pos_in_l));
                }
            }
        }

        let score = anchors.len() as f32 / license.tokens.len() as f32;
        if score >= threshold * prefilter_k {
            candidates.push(Candidate {
                indexed,
                anchors,
                score,
            });
        }
    }

    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.indexed.license.identifier.cmp(&b.indexed.license.identifier))
    });
    candidates
}

/// Shorthand over [`select_candidates`] using the library's tuned defaults.
pub fn select_candidates_default<'a>(
    unknown: &[Token],
    licenses: &'a [License],
    threshold: f32,
) -> Vec<Candidate<'a>> {
    select_candidates(unknown, licenses, threshold, DEFAULT_BASE_WINDOW, DEFAULT_PREFILTER_K)
}
