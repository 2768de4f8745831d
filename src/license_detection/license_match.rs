//! `LicenseMatch`: one detected license occurrence.

use std::ops::Range;

use serde::Serialize;

use crate::license_detection::diff::DiffEntry;
use crate::license_detection::token::Token;

/// One detected occurrence of a reference license inside the unknown text.
///
/// Owned and self-contained (no lifetime tied to the `Corpus` it came
/// from), so it can be collected, serialised, and returned from
/// [`crate::license_detection::Detector::detect`] without entangling
/// callers in the corpus's borrow.
#[derive(Debug, Clone, Serialize)]
pub struct LicenseMatch {
    /// SPDX identifier of the matched reference license.
    pub identifier: String,
    /// The matched slice of the unknown token stream.
    pub tokens: Vec<Token>,
    /// Fraction of equal tokens within the aligned region, in `[0, 1]`.
    pub confidence: f32,
    /// The full edit script between the aligned reference window and the
    /// aligned unknown window (includes the trimmed extraneous prefix/suffix).
    #[serde(skip)]
    pub diffs: Vec<DiffEntry>,
    /// The `[first, last]` inclusive bounds within `diffs` that are equal
    /// entries or interior edits (the extraneous prefix/suffix is outside
    /// this range).
    #[serde(skip)]
    pub diff_range: Range<usize>,
    /// `token_range.end - token_range.start`. Authoritative for
    /// arbitration; may disagree with `tokens.len()` after the arbiter
    /// adjusts `token_range` without rebuilding `tokens`.
    pub tokens_claimed: usize,
    /// Token indices (into the unknown stream) this match occupies.
    pub token_range: Range<usize>,
    /// Byte offset of the first matched token's span, in the original input.
    pub start: usize,
    /// Byte offset one past the last matched token's span.
    pub end: usize,
}

impl LicenseMatch {
    /// Whether `self` and `other`'s token ranges overlap by more than
    /// `fraction` of the shorter match's length.
    pub fn overlaps_by_more_than(&self, other: &LicenseMatch, fraction: f32) -> bool {
        let start = self.token_range.start.max(other.token_range.start);
        let end = self.token_range.end.min(other.token_range.end);
        if end <= start {
            return false;
        }
        let overlap = end - start;
        let shorter = self.tokens_claimed.min(other.tokens_claimed);
        if shorter == 0 {
            return false;
        }
        (overlap as f32 / shorter as f32) > fraction
    }

    /// Whether `self`'s token range overlaps `other`'s at all.
    pub fn overlaps(&self, other: &LicenseMatch) -> bool {
        self.token_range.start < other.token_range.end && other.token_range.start < self.token_range.end
    }
}
