//! # license-detect
//!
//! Fingerprints known open-source license texts inside arbitrary documents.
//!
//! Given a corpus of canonical license texts indexed by SPDX identifier,
//! `license-detect` identifies which licenses are present in an arbitrary
//! piece of text (typically a `LICENSE` file), reporting for each detection
//! an SPDX identifier, a confidence score, and the byte range it occupies.
//! It tolerates the edits a license text picks up in the wild: reformatting,
//! copyright-line substitutions, reflowed whitespace, punctuation drift,
//! embedded headers, and concatenation of multiple licenses in one file.
//!
//! ## Pipeline
//!
//! Leaves first: [`license_detection::token`] tokenises raw text into a
//! canonical stream; [`license_detection::reference::License`] wraps a
//! tokenised, copyright-stripped reference text; [`license_detection::index`]
//! augments it with a sliding-window n-gram index; [`license_detection::Corpus`]
//! collects references loaded from disk; [`license_detection::candidate`]
//! ranks the corpus by n-gram checksum overlap; [`license_detection::scorer`]
//! diffs and scores each candidate; [`license_detection::arbiter`] composes
//! the final, non-overlapping match set. [`license_detection::Detector`] ties
//! the whole pipeline together behind one `detect` call.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use license_detect::license_detection::{Corpus, Detector};
//!
//! # fn main() -> Result<(), license_detect::error::DetectError> {
//! let corpus = Corpus::load(["resources/licenses"])?;
//! let detector = Detector::new(corpus);
//! let matches = detector.detect("Copyright (c) 2024 Acme Corp.\n...", 0.9)?;
//! for m in &matches {
//!     println!("{} ({:.2}) @ {}..{}", m.identifier, m.confidence, m.start, m.end);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Scope
//!
//! This crate is not a general text-similarity engine: normalisation and
//! scoring are tuned for license prose. It is not a legal-compatibility
//! reasoner: it identifies text, nothing more. It is not a source-code
//! scanner: it accepts whole text blobs and does not strip comment syntax.
//!
//! The detector core is single-threaded per call and pure — no global
//! mutable state, no I/O after corpus construction. A built [`license_detection::Corpus`]
//! is immutable and safe to share read-only across concurrent detections.

pub mod cli;
pub mod error;
pub mod license_detection;
pub mod report;
