//! The public `Detector` API: ties tokeniser, candidate selection, scoring
//! and arbitration together into one `detect` call.

use crate::error::DetectError;
use crate::license_detection::arbiter::arbitrate;
use crate::license_detection::candidate::{DEFAULT_PREFILTER_K, select_candidates};
use crate::license_detection::corpus::Corpus;
use crate::license_detection::license_match::LicenseMatch;
use crate::license_detection::ngram::DEFAULT_BASE_WINDOW;
use crate::license_detection::scorer::score_candidate;
use crate::license_detection::token::tokenize;

/// Bundles an immutable [`Corpus`] with the tuning constants used to derive
/// n-gram granularity and the candidate-selection prefilter.
///
/// Single-threaded per call and pure: no global mutable state, no I/O after
/// the corpus is built. The corpus is read-only and may be shared (e.g. via
/// `Arc<Detector>`) across an unbounded number of concurrent detections.
#[derive(Debug, Clone)]
pub struct Detector {
    corpus: Corpus,
    base_window: usize,
    prefilter_k: f32,
}

impl Detector {
    /// Build a detector over `corpus` using the library's tuned defaults for
    /// n-gram granularity and candidate prefiltering.
    pub fn new(corpus: Corpus) -> Detector {
        Detector {
            corpus,
            base_window: DEFAULT_BASE_WINDOW,
            prefilter_k: DEFAULT_PREFILTER_K,
        }
    }

    /// Build a detector with explicit tuning constants, mainly for tests
    /// that want to exercise non-default granularity/prefilter behaviour.
    pub fn with_tuning(corpus: Corpus, base_window: usize, prefilter_k: f32) -> Detector {
        Detector {
            corpus,
            base_window,
            prefilter_k,
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Detect which reference licenses occur in `text`, at confidence
    /// `threshold`.
    ///
    /// `threshold` must be in `(0, 1]`; values outside that range are
    /// rejected with [`DetectError::InvalidArgument`] rather than clamped,
    /// since silently clamping a caller-supplied threshold would mask the
    /// mistake of e.g. passing a percentage (`95`) instead of a fraction
    /// (`0.95`).
    ///
    /// Total on well-formed input: any tokenisable text, including the
    /// empty string, returns a (possibly empty) ordered, non-overlapping
    /// list of matches. Never logs, never retries, never mutates the
    /// corpus.
    pub fn detect(&self, text: &str, threshold: f32) -> Result<Vec<LicenseMatch>, DetectError> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(DetectError::InvalidArgument {
                reason: format!("threshold must be in (0, 1], got {threshold}"),
            });
        }

        let unknown = tokenize(text);
        if unknown.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = select_candidates(
            &unknown,
            self.corpus.licenses(),
            threshold,
            self.base_window,
            self.prefilter_k,
        );

        let matches: Vec<LicenseMatch> = candidates
            .iter()
            .filter_map(|c| score_candidate(&unknown, c, threshold))
            .collect();

        Ok(arbitrate(matches))
    }
}
