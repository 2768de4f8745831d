//! Indexed License: a reference license augmented with a sliding-window
//! n-gram table.
//!
//! This crate represents "License" and "License with n-grams" as a single
//! record that always carries the n-gram index, rather than a
//! license/indexed-license subtype pair — there is no path in this crate
//! that needs the index-less form on its own.

use std::collections::HashMap;

use crate::license_detection::ngram::{NGram, build_checksum_map, build_ngrams};
use crate::license_detection::reference::License;

/// A reference license plus its n-gram index at a particular granularity.
///
/// Built fresh for each [`crate::license_detection::Detector::detect`] call
/// rather than cached on [`crate::license_detection::Corpus`]: the window
/// width `n` is a function of the caller's confidence threshold, so a
/// corpus shared across calls with different thresholds cannot keep a
/// single n-gram index valid for all of them. Token streams and frequency
/// tables (the expensive, threshold-independent part) still live once on
/// [`License`] and are borrowed here.
#[derive(Debug, Clone)]
pub struct IndexedLicense<'a> {
    pub license: &'a License,
    pub ngrams: Vec<NGram>,
    pub checksum_map: HashMap<u32, Vec<usize>>,
    pub granularity: usize,
}

impl<'a> IndexedLicense<'a> {
    /// Build the n-gram index for `license` at width `n`.
    ///
    /// `granularity` is recorded as `min(n, license.tokens.len())`.
    pub fn build(license: &'a License, n: usize) -> IndexedLicense<'a> {
        let ngrams = build_ngrams(&license.tokens, n);
        let checksum_map = build_checksum_map(&ngrams);
        let granularity = n.min(license.tokens.len());
        IndexedLicense {
            license,
            ngrams,
            checksum_map,
            granularity,
        }
    }
}
